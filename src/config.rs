use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub network: Network,
    pub credentials: Credentials,
    pub general: General,
}

#[derive(Debug, Deserialize)]
pub struct Network {
    /// Chain id used for registry lookups (100 = Gnosis).
    pub chain_id: u64,
    pub rpc_url: String,
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub private_key: String,
}

#[derive(Debug, Deserialize)]
pub struct General {
    pub log_level: String,
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;

        // Env wins over the file so the key can stay out of config.toml.
        if let Ok(key) = std::env::var("TELENOME_PRIVATE_KEY") {
            config.credentials.private_key = key;
        }

        Ok(config)
    }
}
