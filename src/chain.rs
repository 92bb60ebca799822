//! Chain metadata lookup keyed by genesis hash.

use serde::{Deserialize, Serialize};

/// Kind of chain, which decides how its addresses are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainType {
    #[default]
    Substrate,
    Ethereum,
}

/// Metadata of a known chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    pub genesis_hash: String,
    pub name: String,
    /// Address prefix of the chain
    pub ss58_format: u16,
    #[serde(default)]
    pub chain_type: ChainType,
    /// Banner colour (CSS style string)
    #[serde(default)]
    pub color: Option<String>,
    /// Identicon theme
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_icon() -> String {
    "polkadot".to_string()
}

impl Chain {
    pub fn is_ethereum(&self) -> bool {
        self.chain_type == ChainType::Ethereum
    }

    /// Name shown on the chain banner
    pub fn display_name(&self) -> String {
        self.name.replace(" Relay Chain", "")
    }
}

/// Resolves chain metadata from a genesis hash
pub trait ChainResolver {
    fn resolve(&self, genesis_hash: &str) -> Option<Chain>;
}

/// Entry of the network selection dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisOption {
    pub text: String,
    /// Genesis hash, empty for "any chain"
    pub value: String,
}

/// In-memory chain registry
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: Vec<Chain>,
}

impl ChainRegistry {
    pub fn new(chains: Vec<Chain>) -> Self {
        Self { chains }
    }

    /// Registry with the well-known relay chains
    pub fn with_defaults() -> Self {
        Self::new(default_chains())
    }

    /// Add or replace a chain definition
    pub fn insert(&mut self, chain: Chain) {
        match self
            .chains
            .iter_mut()
            .find(|c| c.genesis_hash == chain.genesis_hash)
        {
            Some(existing) => *existing = chain,
            None => self.chains.push(chain),
        }
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Options for the network dropdown, "any chain" first
    pub fn genesis_options(&self) -> Vec<GenesisOption> {
        let mut options = vec![GenesisOption {
            text: "Allow use on any chain".to_string(),
            value: String::new(),
        }];
        options.extend(self.chains.iter().map(|chain| GenesisOption {
            text: chain.name.clone(),
            value: chain.genesis_hash.clone(),
        }));
        options
    }
}

impl ChainResolver for ChainRegistry {
    fn resolve(&self, genesis_hash: &str) -> Option<Chain> {
        if genesis_hash.is_empty() {
            return None;
        }
        self.chains
            .iter()
            .find(|chain| chain.genesis_hash.eq_ignore_ascii_case(genesis_hash))
            .cloned()
    }
}

/// Built-in relay chain definitions
pub fn default_chains() -> Vec<Chain> {
    vec![
        Chain {
            genesis_hash: "0x91b171bb158e2d3848fa23a9f1c25182fb8e20313b2c1eb49219da7a70ce90c3"
                .to_string(),
            name: "Polkadot Relay Chain".to_string(),
            ss58_format: 0,
            chain_type: ChainType::Substrate,
            color: Some("#e6007a".to_string()),
            icon: "polkadot".to_string(),
        },
        Chain {
            genesis_hash: "0xb0a8d493285c2df73290dfb7e61f870f17b41801197a149ca93654499ea3dafe"
                .to_string(),
            name: "Kusama Relay Chain".to_string(),
            ss58_format: 2,
            chain_type: ChainType::Substrate,
            color: Some("#000000".to_string()),
            icon: "polkadot".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_and_unknown() {
        let registry = ChainRegistry::with_defaults();
        let polkadot = registry
            .resolve("0x91b171bb158e2d3848fa23a9f1c25182fb8e20313b2c1eb49219da7a70ce90c3")
            .expect("polkadot should resolve");
        assert_eq!(polkadot.ss58_format, 0);
        assert_eq!(polkadot.display_name(), "Polkadot");

        assert!(registry.resolve("").is_none());
        assert!(registry.resolve("0x1234").is_none());
    }

    #[test]
    fn test_genesis_options_start_with_any_chain() {
        let registry = ChainRegistry::with_defaults();
        let options = registry.genesis_options();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].value, "");
        assert_eq!(options[1].text, "Polkadot Relay Chain");
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut registry = ChainRegistry::with_defaults();
        let mut kusama = registry.chains()[1].clone();
        kusama.ss58_format = 7;
        registry.insert(kusama);
        assert_eq!(registry.chains().len(), 2);
        assert_eq!(registry.chains()[1].ss58_format, 7);
    }
}
