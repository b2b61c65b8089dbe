//! Shared utilities for integration and load testing.

use std::net::SocketAddr;

use axum::Router;
use bytes::Bytes;
use instrumented_service::config::ServiceConfig;
use instrumented_service::http::{AppServer, AppState};
use instrumented_service::net;
use instrumented_service::observability::MetricsRegistry;
use instrumented_service::scrape::MetricsListener;

/// Both listeners of a running service, bound to ephemeral ports.
pub struct TestService {
    pub app_addr: SocketAddr,
    pub metrics_addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestService {
    pub fn app_url(&self, path: &str) -> String {
        format!("http://{}{}", self.app_addr, path)
    }

    pub fn metrics_url(&self, path: &str) -> String {
        format!("http://{}{}", self.metrics_addr, path)
    }

    /// Scrape the metrics listener and return the body.
    pub async fn scrape(&self) -> String {
        let res = self
            .client
            .get(self.metrics_url("/metrics"))
            .send()
            .await
            .expect("Metrics listener unreachable");
        assert_eq!(res.status(), 200);
        res.text().await.unwrap()
    }

    /// Current value of the request counter, as scraped.
    pub async fn request_count(&self) -> u64 {
        counter_value(&self.scrape().await, "api_foo_requests_total")
            .expect("request counter missing from scrape")
    }
}

/// Find `name <value>` in a Prometheus text exposition.
pub fn counter_value(body: &str, name: &str) -> Option<u64> {
    body.lines()
        .find_map(|line| line.strip_prefix(name)?.strip_prefix(' '))
        .and_then(|value| value.trim().parse().ok())
}

/// Start the service with its default routes.
pub async fn start_service() -> TestService {
    start_service_with_routes(Router::new()).await
}

/// Start the service with extra application routes merged in before the
/// middleware chain is applied.
pub async fn start_service_with_routes(extra: Router) -> TestService {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.metrics.bind_address = "127.0.0.1:0".into();

    let registry = MetricsRegistry::new();
    let state = AppState {
        request_counter: registry.register_request_counter(&config.metrics),
        primary_body: Bytes::from(config.routes.primary_body.clone()),
    };
    let routes = AppServer::routes(&config, state).merge(extra);
    let server = AppServer::from_router(AppServer::instrument(routes, &config));

    let app_listener = net::bind(&config.listener.bind_address).await.unwrap();
    let metrics_listener = net::bind(&config.metrics.bind_address).await.unwrap();
    let app_addr = app_listener.local_addr().unwrap();
    let metrics_addr = metrics_listener.local_addr().unwrap();

    let metrics = MetricsListener::new(&config.metrics, registry.handle());
    tokio::spawn(async move {
        let _ = metrics.serve(metrics_listener).await;
    });
    tokio::spawn(async move {
        let _ = server.run(app_listener).await;
    });

    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap();

    TestService {
        app_addr,
        metrics_addr,
        client,
    }
}
