use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use telenome_rs::chain;
use telenome_rs::config::Config;
use telenome_rs::draft::MarketDraft;
use telenome_rs::flow::{CreateMarketFlow, FlowError};
use telenome_rs::notify::TracingNotifier;
use telenome_rs::registry::ContractRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cfg = Config::load("config.toml").context("failed to load config.toml")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&cfg.general.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Draft file stands in for the create form; defaults to draft.toml.
    let draft_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "draft.toml".to_string());
    let contents = std::fs::read_to_string(&draft_path)
        .with_context(|| format!("failed to read draft file {draft_path}"))?;
    let draft: MarketDraft =
        toml::from_str(&contents).with_context(|| format!("invalid draft file {draft_path}"))?;

    let registry = ContractRegistry::builtin();
    let (writer, identity) = chain::connect_writer(
        &registry,
        cfg.network.chain_id,
        &cfg.network.rpc_url,
        &cfg.credentials.private_key,
    )?;

    let mut flow = CreateMarketFlow::new();
    *flow.draft_mut() = draft;

    let now = chrono::Utc::now().timestamp();
    match flow
        .submit_draft(now, &identity, &writer, &TracingNotifier)
        .await
    {
        Ok(handle) => {
            println!("submitted: {}", handle.tx_hash);
            Ok(())
        }
        Err(FlowError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                eprintln!("{field}: {message}");
            }
            anyhow::bail!("draft is invalid")
        }
        Err(e) => Err(e.into()),
    }
}
