use std::env;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PROVIDER_URL: &str = "https://api.llama3.com/groq";

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: String,
    pub provider_url: String,
    pub provider_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Config {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let provider_url =
            env::var("EXPLANATION_API_URL").unwrap_or_else(|_| DEFAULT_PROVIDER_URL.to_string());
        let provider_api_key = env::var("EXPLANATION_API_KEY").ok();

        Config {
            bind_addr,
            database_url,
            provider_url,
            provider_api_key,
        }
    }
}
