use alloy::network::EthereumWallet;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use alloy::transports::http::reqwest::Url;
use alloy_primitives::Address;
use anyhow::{anyhow, Context, Result};

use crate::registry::ContractRegistry;
use crate::request::MarketCreationRequest;
use crate::submit::{ContractWriter, PendingHandle, WriteFailure, CREATE_CATEGORICAL_MARKET};
use crate::wallet::StaticIdentity;

sol! {
    #[sol(rpc)]
    contract MarketFactory {
        /// Mirrors the MarketFactory ABI struct; field order is binding.
        struct CreateMarketParams {
            string marketName;
            string[] outcomes;
            string questionStart;
            string questionEnd;
            string outcomeType;
            uint256 parentOutcome;
            address parentMarket;
            string category;
            string lang;
            uint256 lowerBound;
            uint256 upperBound;
            uint256 minBond;
            uint32 openingTime;
            string[] tokenNames;
        }

        function createCategoricalMarket(CreateMarketParams params) external returns (address);
    }
}

/// Signing/broadcast collaborator backed by an alloy provider. Encoding and
/// transport belong to alloy; this is the integration seam.
#[derive(Debug, Clone)]
pub struct SeerWriter<P> {
    provider: P,
    factory: Address,
}

impl<P> SeerWriter<P> {
    pub fn new(provider: P, factory: Address) -> Self {
        Self { provider, factory }
    }
}

fn to_params(request: &MarketCreationRequest) -> MarketFactory::CreateMarketParams {
    MarketFactory::CreateMarketParams {
        marketName: request.market_name.clone(),
        outcomes: request.outcomes.clone(),
        questionStart: request.question_start.clone(),
        questionEnd: request.question_end.clone(),
        outcomeType: request.outcome_type.clone(),
        parentOutcome: request.parent_outcome,
        parentMarket: request.parent_market,
        category: request.category.clone(),
        lang: request.lang.clone(),
        lowerBound: request.lower_bound,
        upperBound: request.upper_bound,
        minBond: request.min_bond,
        openingTime: request.opening_time,
        tokenNames: request.token_names.clone(),
    }
}

impl<P> ContractWriter for SeerWriter<P>
where
    P: Provider + Clone + Send + Sync,
{
    async fn write(
        &self,
        function_name: &str,
        request: &MarketCreationRequest,
    ) -> Result<PendingHandle, WriteFailure> {
        if function_name != CREATE_CATEGORICAL_MARKET {
            return Err(WriteFailure::short(format!(
                "unsupported function: {function_name}"
            )));
        }

        let factory = MarketFactory::new(self.factory, self.provider.clone());
        let pending = factory
            .createCategoricalMarket(to_params(request))
            .send()
            .await
            .map_err(|e| WriteFailure::message(e.to_string()))?;

        let tx_hash = *pending.tx_hash();
        tracing::info!(%tx_hash, factory = %self.factory, "sent createCategoricalMarket");

        Ok(PendingHandle { tx_hash })
    }
}

/// Connect a wallet-backed writer for the given network, plus the identity
/// derived from the signing key.
pub fn connect_writer(
    registry: &ContractRegistry,
    chain_id: u64,
    rpc_url: &str,
    private_key: &str,
) -> Result<(SeerWriter<impl Provider + Clone>, StaticIdentity)> {
    let signer: PrivateKeySigner = private_key.parse().context("invalid private key")?;
    let identity = StaticIdentity::connected(signer.address());

    let entry = registry
        .lookup(chain_id, "MarketFactory")
        .ok_or_else(|| anyhow!("no MarketFactory deployment registered for network {chain_id}"))?;

    let url: Url = rpc_url.parse().context("invalid rpc url")?;
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(url);

    Ok((SeerWriter::new(provider, entry.address), identity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{MarketTemplate, ValidatedDraft};
    use crate::request::build_request;
    use alloy::sol_types::SolCall;
    use alloy_primitives::U256;

    #[test]
    fn test_call_signature_locks_field_order() {
        // The 14-field tuple order is an external contract; a change here
        // would silently break the call.
        assert_eq!(
            MarketFactory::createCategoricalMarketCall::SIGNATURE,
            "createCategoricalMarket((string,string[],string,string,string,uint256,address,\
             string,string,uint256,uint256,uint256,uint32,string[]))"
        );
    }

    #[test]
    fn test_to_params_maps_every_field() {
        let draft = ValidatedDraft {
            template: MarketTemplate::BinaryChoice,
            subject: "Will it rain tomorrow?".to_string(),
            description: "Airport station reading.".to_string(),
            outcomes_raw: "Yes, No".to_string(),
        };
        let request = build_request(&draft, 1_700_000_000).unwrap();
        let params = to_params(&request);

        assert_eq!(params.marketName, "Will it rain tomorrow?");
        assert_eq!(params.outcomes, vec!["Yes", "No"]);
        assert_eq!(params.questionStart, "1700000000");
        assert_eq!(params.questionEnd, "1700604800");
        assert_eq!(params.outcomeType, "categorical");
        assert_eq!(params.parentOutcome, U256::ZERO);
        assert_eq!(params.parentMarket, Address::ZERO);
        assert_eq!(params.category, "Default Category");
        assert_eq!(params.lang, "en");
        assert_eq!(params.lowerBound, U256::ZERO);
        assert_eq!(params.upperBound, U256::ZERO);
        assert_eq!(params.minBond, U256::from(100_000_000_000_000_000u128));
        assert_eq!(params.openingTime, 1_700_000_000);
        assert_eq!(params.tokenNames, vec!["Yes", "No"]);
    }
}
