use std::time::Duration;

use reqwest::Client;

/// Proxies that buffer chunked responses break incremental streaming;
/// this env var forces direct connections.
const NO_PROXY_ENV: &str = "TRIPFLOW_NO_PROXY";

/// Connect timeout only. Total request time is unbounded because a
/// completion stream stays open for as long as the model generates.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn build_http_client() -> Client {
    let mut builder = Client::builder().connect_timeout(CONNECT_TIMEOUT);
    if std::env::var_os(NO_PROXY_ENV).is_some() || cfg!(test) {
        builder = builder.no_proxy();
    }
    builder.build().expect("Failed to build reqwest client")
}
