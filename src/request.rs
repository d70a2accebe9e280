use alloy_primitives::{Address, U256};
use thiserror::Error;

use crate::draft::ValidatedDraft;

/// Markets close for trading 7 days after creation.
pub const QUESTION_WINDOW_SECS: i64 = 604_800;

/// Minimum dispute bond: 0.1 of the chain's native unit, in wei.
pub const MIN_BOND_WEI: u128 = 100_000_000_000_000_000;

/// On-chain outcome token names are capped at 32 characters.
pub const TOKEN_NAME_MAX_CHARS: usize = 32;

/// Outcome type for this flow; scalar markets are created elsewhere.
pub const OUTCOME_TYPE_CATEGORICAL: &str = "categorical";

pub const DEFAULT_CATEGORY: &str = "Default Category";
pub const DEFAULT_LANG: &str = "en";

/// Parameters for one `createCategoricalMarket` call.
///
/// Field order is the MarketFactory ABI tuple order and must not change:
/// the struct is handed to the signing collaborator as a single positional
/// argument and encoded in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketCreationRequest {
    pub market_name: String,
    pub outcomes: Vec<String>,
    /// Unix seconds, decimal string (ABI: string).
    pub question_start: String,
    /// Unix seconds, decimal string (ABI: string).
    pub question_end: String,
    pub outcome_type: String,
    pub parent_outcome: U256,
    pub parent_market: Address,
    pub category: String,
    pub lang: String,
    pub lower_bound: U256,
    pub upper_bound: U256,
    pub min_bond: U256,
    /// Unix seconds (ABI: uint32).
    pub opening_time: u32,
    /// Parallel to `outcomes`, each entry truncated to 32 characters.
    pub token_names: Vec<String>,
}

/// Errors turning a validated draft into a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("at least two outcomes are required, got {0}")]
    InsufficientOutcomes(usize),
    #[error("opening time {0} does not fit in a uint32")]
    OpeningTimeOutOfRange(i64),
}

/// Split the raw comma-separated outcomes field: trim each entry, drop
/// empties, keep order, no deduplication.
fn split_outcomes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Truncate an outcome label to a valid on-chain token name.
/// Lossy by design: long labels silently shorten.
fn token_name(outcome: &str) -> String {
    outcome.chars().take(TOKEN_NAME_MAX_CHARS).collect()
}

/// Build a market-creation request from a validated draft.
///
/// Pure function of `(draft, now)`: `now` is injected unix seconds, so the
/// same inputs always produce the same request. The draft's description is
/// deliberately not part of the request.
pub fn build_request(
    draft: &ValidatedDraft,
    now: i64,
) -> Result<MarketCreationRequest, BuildError> {
    let outcomes = split_outcomes(&draft.outcomes_raw);
    if outcomes.len() < 2 {
        return Err(BuildError::InsufficientOutcomes(outcomes.len()));
    }

    let opening_time =
        u32::try_from(now).map_err(|_| BuildError::OpeningTimeOutOfRange(now))?;

    let token_names = outcomes.iter().map(|o| token_name(o)).collect();

    Ok(MarketCreationRequest {
        market_name: draft.subject.clone(),
        outcomes,
        question_start: now.to_string(),
        question_end: (now + QUESTION_WINDOW_SECS).to_string(),
        outcome_type: OUTCOME_TYPE_CATEGORICAL.to_string(),
        parent_outcome: U256::ZERO,
        parent_market: Address::ZERO,
        category: DEFAULT_CATEGORY.to_string(),
        lang: DEFAULT_LANG.to_string(),
        lower_bound: U256::ZERO,
        upper_bound: U256::ZERO,
        min_bond: U256::from(MIN_BOND_WEI),
        opening_time,
        token_names,
    })
}
