use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Gnosis chain, where the Seer contracts this crate targets are deployed.
pub const GNOSIS_CHAIN_ID: u64 = 100;

/// One function in a contract's external interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    /// ABI input types, in call order.
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl FunctionDescriptor {
    pub fn new(name: &str, inputs: &[&str], outputs: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A deployed contract: where it lives and what it exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRegistryEntry {
    pub network_id: u64,
    pub contract_name: String,
    pub address: Address,
    pub interface: Vec<FunctionDescriptor>,
}

/// Static mapping (network id, contract name) -> deployed contract.
/// Built once at startup, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ContractRegistry {
    networks: HashMap<u64, HashMap<String, ContractRegistryEntry>>,
}

impl ContractRegistry {
    pub fn from_entries(entries: Vec<ContractRegistryEntry>) -> Self {
        let mut networks: HashMap<u64, HashMap<String, ContractRegistryEntry>> = HashMap::new();
        for entry in entries {
            networks
                .entry(entry.network_id)
                .or_default()
                .insert(entry.contract_name.clone(), entry);
        }
        Self { networks }
    }

    /// Load a registry from a JSON array of entries (the deployment data file).
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let entries: Vec<ContractRegistryEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    /// O(1) lookup. Missing entries are absence, not an error; callers decide
    /// how critical that is.
    pub fn lookup(&self, network_id: u64, contract_name: &str) -> Option<&ContractRegistryEntry> {
        self.networks.get(&network_id)?.get(contract_name)
    }

    pub fn len(&self) -> usize {
        self.networks.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// The Seer deployments on Gnosis baked into this build.
    pub fn builtin() -> Self {
        let params = "(string,string[],string,string,string,uint256,address,string,string,uint256,uint256,uint256,uint32,string[])";

        Self::from_entries(vec![
            ContractRegistryEntry {
                network_id: GNOSIS_CHAIN_ID,
                contract_name: "MarketFactory".to_string(),
                address: address!("0x83183DA839Ce8228E31Ae41222EaD9EDBb5cDcf1"),
                interface: vec![FunctionDescriptor::new(
                    "createCategoricalMarket",
                    &[params],
                    &["address"],
                )],
            },
            ContractRegistryEntry {
                network_id: GNOSIS_CHAIN_ID,
                contract_name: "Router".to_string(),
                address: address!("0xeC9048b59b3467415b1a38F63416407eA0c70fB8"),
                interface: vec![
                    FunctionDescriptor::new(
                        "splitPosition",
                        &["address", "address", "uint256"],
                        &[],
                    ),
                    FunctionDescriptor::new(
                        "mergePositions",
                        &["address", "address", "uint256"],
                        &[],
                    ),
                ],
            },
            ContractRegistryEntry {
                network_id: GNOSIS_CHAIN_ID,
                contract_name: "MarketView".to_string(),
                address: address!("0x995dC9c89B6605a1E8cc028B37cb8e568e27626f"),
                interface: vec![FunctionDescriptor::new(
                    "getMarket",
                    &["address", "address"],
                    &["tuple"],
                )],
            },
            ContractRegistryEntry {
                network_id: GNOSIS_CHAIN_ID,
                contract_name: "RealityProxy".to_string(),
                address: address!("0xc260ADfAC11f97c001dC143d2a4F45b98e0f2D6C"),
                interface: vec![FunctionDescriptor::new("resolve", &["address"], &[])],
            },
        ])
    }
}
