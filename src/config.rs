use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

/// Process configuration, built once in `main` and handed to the
/// components that need it. The gateway server key is required: the
/// signature verifier refuses to run against an empty secret.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub gateway_server_key: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present

        Ok(Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            database_url: env::var("DATABASE_URL")?,
            gateway_server_key: env::var("GATEWAY_SERVER_KEY")?,
        })
    }
}
