//! # Hosted Asset Ledger
//!
//! The contract hosts the ledger of the asset its vault custodies. These
//! endpoints let any account transact in that asset. A plain transfer into
//! the vault account is how yield reaches share holders: it raises total
//! assets without minting shares.

use crate::error::UnwrapOrPanic;
use crate::{Contract, ContractExt};
use near_contract_standards::fungible_token::metadata::FungibleTokenMetadata;
use near_sdk::{assert_one_yocto, env, json_types::U128, near, AccountId};

#[near]
impl Contract {
    #[payable]
    pub fn asset_transfer(&mut self, receiver_id: AccountId, amount: U128, memo: Option<String>) {
        assert_one_yocto();
        let sender_id = env::predecessor_account_id();
        self.vault
            .asset_mut()
            .transfer(&sender_id, &receiver_id, amount.0, memo.as_deref())
            .unwrap_or_panic()
    }

    #[payable]
    pub fn asset_transfer_from(
        &mut self,
        owner_id: AccountId,
        receiver_id: AccountId,
        amount: U128,
        memo: Option<String>,
    ) {
        assert_one_yocto();
        let spender_id = env::predecessor_account_id();
        self.vault
            .asset_mut()
            .transfer_from(&spender_id, &owner_id, &receiver_id, amount.0, memo.as_deref())
            .unwrap_or_panic()
    }

    /// Sets the allowance `spender_id` holds over the caller's assets.
    /// Depositors approve the vault account before `deposit` or `mint`.
    #[payable]
    pub fn asset_approve(&mut self, spender_id: AccountId, amount: U128) {
        assert_one_yocto();
        let owner_id = env::predecessor_account_id();
        self.vault
            .asset_mut()
            .approve(&owner_id, &spender_id, amount.0)
            .unwrap_or_panic()
    }

    // ==================== View Methods ====================

    pub fn asset_total_supply(&self) -> U128 {
        U128(self.vault.asset().total_supply())
    }

    pub fn asset_balance_of(&self, account_id: AccountId) -> U128 {
        U128(self.vault.asset().balance_of(&account_id))
    }

    pub fn asset_allowance(&self, owner_id: AccountId, spender_id: AccountId) -> U128 {
        U128(self.vault.asset().allowance(&owner_id, &spender_id))
    }

    pub fn asset_metadata(&self) -> FungibleTokenMetadata {
        self.asset_metadata.clone()
    }
}
