use alloy_primitives::Address;

/// Read-only view of the currently connected wallet identity.
/// Injected into the submit path so it is testable without a live wallet.
pub trait WalletIdentity {
    /// The connected account address, if any.
    fn connected_address(&self) -> Option<Address>;
}

/// Identity backed by a fixed address, e.g. derived from a local signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticIdentity(Option<Address>);

impl StaticIdentity {
    pub fn connected(address: Address) -> Self {
        Self(Some(address))
    }

    pub fn disconnected() -> Self {
        Self(None)
    }
}

impl WalletIdentity for StaticIdentity {
    fn connected_address(&self) -> Option<Address> {
        self.0
    }
}
