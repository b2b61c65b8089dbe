//! Instrumented HTTP service.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │               INSTRUMENTED SERVICE            │
//!                    │                                               │
//!   GET /foo         │  ┌──────────┐   ┌────────────┐   ┌─────────┐  │
//!   ─────────────────┼─▶│ liveness │──▶│  recovery  │──▶│ content │  │
//!   :8080            │  │  /ping   │   │ catch panic│   │  type   │  │
//!                    │  └──────────┘   └────────────┘   └────┬────┘  │
//!                    │                                       ▼       │
//!                    │  ┌──────────┐   ┌────────────┐   ┌─────────┐  │
//!                    │  │ handler  │◀──│   span     │◀──│ request │  │
//!                    │  │ count+bar│   │  (otel)    │   │   id    │  │
//!                    │  └────┬─────┘   └─────┬──────┘   └─────────┘  │
//!                    │       │               │                       │
//!                    │       ▼               ▼                       │
//!   GET /metrics     │  ┌──────────┐   ┌────────────┐                │
//!   ─────────────────┼─▶│prometheus│   │   batch    │────────────────┼──▶ OTLP
//!   :2222            │  │ registry │   │  exporter  │   gRPC :4317   │   collector
//!                    │  └──────────┘   └────────────┘                │
//!                    └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use instrumented_service::lifecycle;

#[derive(Parser)]
#[command(name = "instrumented-service")]
#[command(about = "HTTP service with Prometheus metrics and OTLP tracing", long_about = None)]
struct Args {
    /// Optional TOML config file; built-in defaults apply without it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let (config, telemetry) = lifecycle::bootstrap(args.config.as_deref())?;

    if let Err(e) = lifecycle::run(config, telemetry).await {
        tracing::error!(error = %e, "Fatal error, exiting");
        return Err(e.into());
    }

    Ok(())
}
