use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub backend_url: String,
    pub max_file_size: usize,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        let backend_url = std::env::var("BACKEND_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string());

        Ok(Config {
            backend_url,
            max_file_size: 16 * 1024 * 1024, // 16MB, matches the server ceiling
            request_timeout_secs: 120,
        })
    }
}
