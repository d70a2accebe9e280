//! Create Telenome categorical markets on Seer.
//!
//! The core is a pure pipeline: a user-edited [`draft::MarketDraft`] is
//! validated, turned into an order-exact [`request::MarketCreationRequest`],
//! and handed once to a signing/broadcast collaborator. Wallet identity,
//! transaction transport, and status display are injected at the seams so
//! the pipeline tests without a chain.

pub mod chain;
pub mod config;
pub mod draft;
pub mod flow;
pub mod notify;
pub mod registry;
pub mod request;
pub mod submit;
pub mod wallet;
