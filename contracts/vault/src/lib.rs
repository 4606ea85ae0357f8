//! # Tokenized Vault Contract
//!
//! A NEAR smart contract and library for fungible token ledgers and a
//! NEP-621 tokenized vault built on them.
//!
//! - **Fungible Ledger**: balances, allowances and supply for one token
//! - **Vault Accounting**: custodies an external asset and issues shares as
//!   proportional claims on it, converting between the two at the live rate
//!   with rounding that always favors the pool
//!
//! ## Architecture
//!
//! - [`ledger`]: The fungible ledger used for both the asset and the shares
//! - [`vault_standards`]: NEP-621 vault standard, conversion math and events
//! - [`vault`]: The `Vault` type and the contract's vault and share endpoints
//! - [`asset`]: Contract endpoints for the hosted asset ledger
//! - [`error`]: Error taxonomy shared by the ledger and the vault
//!
//! The library types take the acting account explicitly. The contract maps
//! `env::predecessor_account_id()` onto them and turns errors into panics.

use near_sdk::{
    borsh::{self, BorshSerialize},
    env, near, require, AccountId, BorshStorageKey, PanicOnDefault,
};

use near_contract_standards::fungible_token::metadata::FungibleTokenMetadata;
use near_sdk::json_types::U128;

pub mod asset;
pub mod error;
pub mod ledger;
pub mod vault;
pub mod vault_standards;

#[cfg(test)]
pub mod test_utils;

use error::UnwrapOrPanic;

pub use error::{Error, Result};
pub use ledger::{FungibleLedger, UNLIMITED_ALLOWANCE, ZERO_ACCOUNT_ID};
pub use vault::Vault;
pub use vault_standards::{AssetLedger, Rounding, VaultCore};

/// Upper bound for `extra_decimals` accepted at init.
pub const MAX_EXTRA_DECIMALS: u8 = 18;

/// Storage keys for NEAR SDK collections.
#[derive(BorshSerialize, BorshStorageKey)]
pub enum StorageKey {
    /// Storage prefix for the hosted asset ledger.
    AssetLedger,
    /// Storage prefix for the vault share ledger.
    ShareLedger,
}

/// Contract state: one asset ledger and one vault over it.
#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct Contract {
    /// The vault. It owns the share ledger and holds the asset ledger.
    pub vault: Vault<FungibleLedger>,
    /// Metadata for the hosted asset.
    pub asset_metadata: FungibleTokenMetadata,
    /// Metadata for the vault share token.
    pub share_metadata: FungibleTokenMetadata,
}

#[near]
impl Contract {
    /// Initializes the asset ledger and the vault.
    ///
    /// # Arguments
    ///
    /// * `owner_id` - Account credited with the whole initial asset supply
    /// * `asset_total_supply` - Initial supply of the hosted asset
    /// * `asset_metadata` - Fungible token metadata for the asset
    /// * `share_metadata` - Fungible token metadata for vault shares
    /// * `extra_decimals` - Additional decimal precision for shares (default 0)
    ///
    /// The vault custodies assets under this contract's own account id.
    #[init]
    #[private]
    pub fn init(
        owner_id: AccountId,
        asset_total_supply: U128,
        asset_metadata: FungibleTokenMetadata,
        share_metadata: FungibleTokenMetadata,
        extra_decimals: Option<u8>,
    ) -> Self {
        asset_metadata.assert_valid();
        share_metadata.assert_valid();
        let extra_decimals = extra_decimals.unwrap_or(0);
        require!(
            extra_decimals <= MAX_EXTRA_DECIMALS,
            "extra_decimals exceeds the supported maximum"
        );

        let mut asset = FungibleLedger::new(StorageKey::AssetLedger);
        if asset_total_supply.0 > 0 {
            asset
                .mint(&owner_id, asset_total_supply.0, Some("Initial tokens supply is minted"))
                .unwrap_or_panic();
        }

        Self {
            vault: Vault::new(
                env::current_account_id(),
                asset,
                StorageKey::ShareLedger,
                extra_decimals,
            ),
            asset_metadata,
            share_metadata,
        }
    }
}
