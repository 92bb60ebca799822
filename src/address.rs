//! Account Address Display
//!
//! Recodes an address for display under the right network prefix, matches it against
//! the known accounts and keeps the state of the account summary card (identicon theme,
//! chain banner, visibility toggle and actions menu).

use crate::account::{AccountRecord, KeyType, DEFAULT_TYPE};
use crate::chain::{Chain, ChainResolver};
use crate::codec::{base58_encode, decode_address, encode_address, DEFAULT_SS58_PREFIX};
use crate::config::Settings;
use crate::messaging::WalletApi;

/// Height of the accounts screen; a menu extending past it is flipped upwards
pub const ACCOUNTS_SCREEN_HEIGHT: u16 = 550;

/// Display record derived from a raw address
#[derive(Debug, Clone, PartialEq)]
pub struct RecodedAddress {
    /// Known account owning the address
    pub account: Option<AccountRecord>,
    /// Address encoded for display
    pub formatted: Option<String>,
    /// Plain base58 public key (Ğ1v1 format)
    pub legacy_encoding: Option<String>,
    pub genesis_hash: Option<String>,
    pub prefix: u16,
    pub key_type: KeyType,
}

impl Default for RecodedAddress {
    fn default() -> Self {
        Self {
            account: None,
            formatted: None,
            legacy_encoding: None,
            genesis_hash: None,
            prefix: DEFAULT_SS58_PREFIX,
            key_type: DEFAULT_TYPE,
        }
    }
}

/// Find a known account owning the given public key
fn find_account_by_public_key<'a>(
    accounts: &'a [AccountRecord],
    public_key: &[u8],
) -> Option<&'a AccountRecord> {
    accounts.iter().find(|account| {
        decode_address(&account.address)
            .map(|key| key == public_key)
            .unwrap_or(false)
    })
}

/// Recode an address for display
///
/// Malformed addresses produce the "no match" record; decoding errors never leave this
/// function.
pub fn recode(
    address: &str,
    accounts: &[AccountRecord],
    chain: Option<&Chain>,
    settings: &Settings,
    given_type: Option<KeyType>,
) -> RecodedAddress {
    let prefix = chain
        .map(|c| c.ss58_format)
        .unwrap_or_else(|| settings.resolved_prefix());

    let public_key = match decode_address(address) {
        Ok(key) => key,
        Err(e) => {
            tracing::debug!(error = %e, "Address does not decode, showing it unmatched");
            return RecodedAddress {
                prefix,
                ..RecodedAddress::default()
            };
        }
    };

    let account = find_account_by_public_key(accounts, &public_key).cloned();

    let is_ethereum = chain.map(Chain::is_ethereum).unwrap_or(false)
        || account
            .as_ref()
            .and_then(|a| a.key_type)
            .map(|t| t.is_ethereum())
            .unwrap_or(false)
        || (account.is_none() && given_type == Some(KeyType::Ethereum));

    let key_type = if is_ethereum {
        KeyType::Ethereum
    } else {
        account
            .as_ref()
            .and_then(|a| a.key_type)
            .unwrap_or(DEFAULT_TYPE)
    };

    let formatted = if is_ethereum {
        Some(address.to_string())
    } else {
        match encode_address(&public_key, prefix) {
            Ok(encoded) => Some(encoded),
            Err(e) => {
                tracing::debug!(error = %e, prefix, "Cannot re-encode address");
                None
            }
        }
    };

    RecodedAddress {
        genesis_hash: account.as_ref().and_then(|a| a.genesis_hash.clone()),
        account,
        formatted,
        legacy_encoding: Some(base58_encode(&public_key)),
        prefix,
        key_type,
    }
}

/// Inputs of the address card
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressProps {
    pub address: Option<String>,
    /// Chain to display the address for, overriding the account's own chain
    pub genesis_hash: Option<String>,
    pub name: Option<String>,
    pub parent_name: Option<String>,
    pub suri: Option<String>,
    pub is_external: bool,
    pub is_hardware: bool,
    pub is_hidden: bool,
    pub show_visibility_action: bool,
    /// Whether the card carries an actions menu
    pub has_actions: bool,
    /// Any change closes the actions menu
    pub toggle_actions: u32,
    pub given_type: Option<KeyType>,
}

/// Icon shown in front of the account name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountBadge {
    Hardware,
    External,
}

/// Chain banner shown under the account name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainBanner {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct RecodeInputs {
    address: Option<String>,
    accounts: Vec<AccountRecord>,
    chain: Option<Chain>,
    settings: Settings,
    given_type: Option<KeyType>,
}

/// State of an account summary card
///
/// The display record is recomputed by [`AddressView::sync`] only when one of its
/// inputs changed since the last call.
#[derive(Debug, Clone, Default)]
pub struct AddressView {
    props: AddressProps,
    recoded: RecodedAddress,
    chain: Option<Chain>,
    last_inputs: Option<RecodeInputs>,
    recode_count: usize,
    show_actions_menu: bool,
    move_menu_up: bool,
}

impl AddressView {
    pub fn new(props: AddressProps) -> Self {
        Self {
            props,
            ..Self::default()
        }
    }

    pub fn props(&self) -> &AddressProps {
        &self.props
    }

    /// Replace the card inputs; a changed `toggle_actions` closes the menu
    pub fn set_props(&mut self, props: AddressProps) {
        if props.toggle_actions != self.props.toggle_actions {
            self.close_actions_menu();
        }
        self.props = props;
    }

    /// Bring the display record up to date with the current inputs
    ///
    /// Returns `true` when the record was recomputed.
    pub fn sync(
        &mut self,
        accounts: &[AccountRecord],
        chains: &dyn ChainResolver,
        settings: &Settings,
    ) -> bool {
        let mut recomputed = false;

        // the account found by a recode may point at another chain, so settle on a
        // fixed point (at most one extra pass)
        for _ in 0..2 {
            let chain = self.resolve_chain(chains);
            let inputs = RecodeInputs {
                address: self.props.address.clone(),
                accounts: accounts.to_vec(),
                chain: chain.clone(),
                settings: settings.clone(),
                given_type: self.props.given_type,
            };

            if self.last_inputs.as_ref() == Some(&inputs) {
                break;
            }

            self.recoded = match self.props.address.as_deref() {
                Some(address) if !address.is_empty() => recode(
                    address,
                    accounts,
                    chain.as_ref(),
                    settings,
                    self.props.given_type,
                ),
                _ => RecodedAddress::default(),
            };
            self.chain = chain;
            self.last_inputs = Some(inputs);
            self.recode_count += 1;
            recomputed = true;
        }

        recomputed
    }

    fn resolve_chain(&self, chains: &dyn ChainResolver) -> Option<Chain> {
        self.props
            .genesis_hash
            .as_deref()
            .filter(|hash| !hash.is_empty())
            .or(self.recoded.genesis_hash.as_deref())
            .and_then(|hash| chains.resolve(hash))
    }

    pub fn recoded(&self) -> &RecodedAddress {
        &self.recoded
    }

    pub fn chain(&self) -> Option<&Chain> {
        self.chain.as_ref()
    }

    /// Number of recomputations so far
    pub fn recode_count(&self) -> usize {
        self.recode_count
    }

    fn account_name(&self) -> Option<&str> {
        self.props
            .name
            .as_deref()
            .or_else(|| self.recoded.account.as_ref().and_then(|a| a.name.as_deref()))
            .filter(|name| !name.is_empty())
    }

    pub fn display_name(&self) -> String {
        self.account_name().unwrap_or("<unknown>").to_string()
    }

    /// Hardware/external badge, only for named external accounts
    pub fn badge(&self) -> Option<AccountBadge> {
        self.account_name()?;

        let account = self.recoded.account.as_ref();
        let is_external = account.map(|a| a.is_external).unwrap_or(false) || self.props.is_external;
        if !is_external {
            return None;
        }

        let is_hardware = account.map(|a| a.is_hardware).unwrap_or(false) || self.props.is_hardware;
        Some(if is_hardware {
            AccountBadge::Hardware
        } else {
            AccountBadge::External
        })
    }

    pub fn icon_theme(&self) -> &str {
        if self.recoded.key_type.is_ethereum() {
            "ethereum"
        } else {
            self.chain
                .as_ref()
                .map(|c| c.icon.as_str())
                .unwrap_or("polkadot")
        }
    }

    /// Value the identicon is generated from
    pub fn identicon_value(&self) -> Option<&str> {
        self.recoded
            .formatted
            .as_deref()
            .or(self.props.address.as_deref())
    }

    pub fn chain_banner(&self) -> Option<ChainBanner> {
        self.chain.as_ref().map(|chain| ChainBanner {
            name: chain.display_name(),
            color: chain.color.clone(),
        })
    }

    /// "parent  //derivation" line of derived accounts
    pub fn parent_name_suri(&self) -> Option<String> {
        let parent = self.props.parent_name.as_deref()?;
        let suri = self.props.suri.as_deref().unwrap_or("");
        Some(format!("{}  {}", parent, suri).trim_end().to_string())
    }

    pub fn shows_visibility_action(&self) -> bool {
        self.props.has_actions || self.props.show_visibility_action
    }

    /// Visibility flag of the known account, falling back to the card input
    pub fn is_hidden(&self) -> bool {
        self.recoded
            .account
            .as_ref()
            .map(|a| a.is_hidden)
            .unwrap_or(self.props.is_hidden)
    }

    pub fn is_actions_menu_open(&self) -> bool {
        self.show_actions_menu
    }

    pub fn is_menu_moved_up(&self) -> bool {
        self.move_menu_up
    }

    pub fn toggle_actions_menu(&mut self) {
        if self.show_actions_menu {
            self.close_actions_menu();
        } else {
            self.show_actions_menu = true;
        }
    }

    pub fn close_actions_menu(&mut self) {
        self.show_actions_menu = false;
        self.move_menu_up = false;
    }

    /// Record where the open menu ended up; flips it up past the screen bottom
    pub fn on_menu_measured(&mut self, bottom: u16) {
        if self.show_actions_menu && bottom > ACCOUNTS_SCREEN_HEIGHT {
            self.move_menu_up = true;
        }
    }

    /// Flip the account's visibility through the wallet backend
    ///
    /// Failures are logged and otherwise ignored.
    pub async fn toggle_visibility(&self, api: &dyn WalletApi) {
        let Some(address) = self.props.address.as_deref() else {
            return;
        };

        if let Err(e) = api.show_account(address, self.is_hidden()).await {
            tracing::error!(error = %e, address, "Failed to change account visibility");
        }
    }
}
