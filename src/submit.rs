use alloy_primitives::B256;
use thiserror::Error;

use crate::request::MarketCreationRequest;
use crate::wallet::WalletIdentity;

/// Contract function this flow calls. The request struct is its single
/// positional argument.
pub const CREATE_CATEGORICAL_MARKET: &str = "createCategoricalMarket";

/// Opaque reference to a submitted-but-not-yet-confirmed transaction.
/// This layer never waits for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingHandle {
    pub tx_hash: B256,
}

/// Failure reported by the signing/broadcast collaborator. Carries whatever
/// human-readable text the collaborator could produce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteFailure {
    /// Short diagnostic, preferred when present.
    pub short_message: Option<String>,
    /// Longer generic error text.
    pub message: Option<String>,
}

impl WriteFailure {
    pub fn short(message: impl Into<String>) -> Self {
        Self {
            short_message: Some(message.into()),
            message: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            short_message: None,
            message: Some(message.into()),
        }
    }

    /// Most specific human-readable reason available: short message, else
    /// generic message, else a fixed fallback. Raw collaborator internals
    /// never leak unformatted.
    pub fn reason(&self) -> String {
        self.short_message
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

/// Signing/broadcast collaborator: encodes one contract call per the
/// external interface descriptor and sends it. Opaque to this crate.
pub trait ContractWriter {
    fn write(
        &self,
        function_name: &str,
        request: &MarketCreationRequest,
    ) -> impl std::future::Future<Output = Result<PendingHandle, WriteFailure>> + Send;
}

/// Errors from one submit attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("no wallet connected")]
    NoWalletConnected,
    #[error("market creation failed: {0}")]
    SubmitFailed(String),
}

/// Submit a built request through the signing collaborator.
///
/// Reads the wallet identity once; without a connected address the writer
/// is never contacted. Fire-and-forget: success means the transaction was
/// accepted for broadcast, not confirmed.
pub async fn submit<I, W>(
    request: &MarketCreationRequest,
    identity: &I,
    writer: &W,
) -> Result<PendingHandle, SubmitError>
where
    I: WalletIdentity,
    W: ContractWriter,
{
    let Some(address) = identity.connected_address() else {
        return Err(SubmitError::NoWalletConnected);
    };

    tracing::debug!(%address, market = %request.market_name, "submitting market creation");

    writer
        .write(CREATE_CATEGORICAL_MARKET, request)
        .await
        .map_err(|failure| SubmitError::SubmitFailed(failure.reason()))
}
