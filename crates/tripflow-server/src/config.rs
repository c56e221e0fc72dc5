use std::env;

/// Relay configuration. Everything comes from the environment; the relay
/// keeps no files.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY is not set"))?;
        let host = env::var("TRIPFLOW_HOST").unwrap_or_else(|_| default_host());
        let port = env::var("TRIPFLOW_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or_else(default_port);
        let model = env::var("TRIPFLOW_MODEL").unwrap_or_else(|_| default_model());
        let base_url =
            env::var("TRIPFLOW_OPENAI_BASE_URL").unwrap_or_else(|_| default_base_url());

        Ok(Self {
            host,
            port,
            api_key,
            model,
            base_url,
        })
    }
}
