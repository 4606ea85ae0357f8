use crate::error::{Error, Result, UnwrapOrPanic};
use crate::ledger::{is_zero_account, FungibleLedger};
use crate::vault_standards::{AssetLedger, VaultCore};
use crate::{Contract, ContractExt};
use near_contract_standards::fungible_token::metadata::{
    FungibleTokenMetadata, FungibleTokenMetadataProvider,
};
use near_sdk::serde::Serialize;
use near_sdk::{assert_one_yocto, env, json_types::U128, near, AccountId, IntoStorageKey};
use schemars::JsonSchema;

/// A tokenized vault over an external fungible asset.
///
/// `asset` is the ledger the vault custodies assets in; the vault does not
/// own it and outside parties keep transacting in it. `shares` is the
/// vault's own share token; only the vault mints and burns it. Total assets
/// are always read from the asset ledger, never stored.
#[near(serializers = [borsh])]
pub struct Vault<A> {
    pub(crate) account_id: AccountId,
    pub(crate) asset: A,
    pub(crate) shares: FungibleLedger,
    pub(crate) extra_decimals: u8,
}

impl<A: AssetLedger> Vault<A> {
    /// Binds a new, empty vault to `asset`.
    ///
    /// # Arguments
    ///
    /// * `account_id` - The vault's custody account in the asset ledger
    /// * `asset` - Handle to the asset ledger
    /// * `prefix` - Storage prefix for the share ledger
    /// * `extra_decimals` - Additional decimal precision for shares
    pub fn new<S>(account_id: AccountId, asset: A, prefix: S, extra_decimals: u8) -> Self
    where
        S: IntoStorageKey,
    {
        Self {
            account_id,
            asset,
            shares: FungibleLedger::new(prefix),
            extra_decimals,
        }
    }

    pub fn asset(&self) -> &A {
        &self.asset
    }

    pub fn asset_mut(&mut self) -> &mut A {
        &mut self.asset
    }

    /// Read-only view of the share ledger.
    pub fn shares(&self) -> &FungibleLedger {
        &self.shares
    }

    // ==================== Share token ====================

    pub fn share_transfer(
        &mut self,
        sender_id: &AccountId,
        receiver_id: &AccountId,
        amount: u128,
        memo: Option<&str>,
    ) -> Result<()> {
        self.shares.transfer(sender_id, receiver_id, amount, memo)
    }

    pub fn share_transfer_from(
        &mut self,
        spender_id: &AccountId,
        owner_id: &AccountId,
        receiver_id: &AccountId,
        amount: u128,
        memo: Option<&str>,
    ) -> Result<()> {
        self.shares
            .transfer_from(spender_id, owner_id, receiver_id, amount, memo)
    }

    pub fn share_approve(&mut self, owner_id: &AccountId, spender_id: &AccountId, amount: u128) -> Result<()> {
        self.shares.approve(owner_id, spender_id, amount)
    }

    pub fn share_allowance(&self, owner_id: &AccountId, spender_id: &AccountId) -> u128 {
        self.shares.allowance(owner_id, spender_id)
    }

    fn assert_amount_and_receiver(amount: u128, receiver_id: &AccountId) -> Result<()> {
        if amount == 0 {
            return Err(Error::ZeroAmount);
        }
        if is_zero_account(receiver_id) {
            return Err(Error::ZeroAddress);
        }
        Ok(())
    }

    /// Custody cannot pay into itself: the pull would move nothing.
    fn assert_external_sender(&self, sender_id: &AccountId) -> Result<()> {
        if sender_id == &self.account_id {
            return Err(Error::InvalidSource);
        }
        Ok(())
    }
}

// ===== Implement VaultCore Trait =====
impl<A: AssetLedger> VaultCore for Vault<A> {
    fn asset_account_id(&self) -> &AccountId {
        &self.account_id
    }

    fn total_assets(&self) -> u128 {
        self.asset.balance_of(&self.account_id)
    }

    fn total_supply(&self) -> u128 {
        self.shares.total_supply()
    }

    fn balance_of(&self, account_id: &AccountId) -> u128 {
        self.shares.balance_of(account_id)
    }

    fn extra_decimals(&self) -> u8 {
        self.extra_decimals
    }

    fn deposit(
        &mut self,
        sender_id: &AccountId,
        assets: u128,
        receiver_id: &AccountId,
        memo: Option<&str>,
    ) -> Result<u128> {
        Self::assert_amount_and_receiver(assets, receiver_id)?;
        self.assert_external_sender(sender_id)?;

        let shares = self.preview_deposit(assets)?;
        if shares == 0 {
            return Err(Error::ZeroAmount);
        }

        self.internal_execute_deposit(sender_id, receiver_id, assets, shares, memo)?;
        Ok(shares)
    }

    fn mint(
        &mut self,
        sender_id: &AccountId,
        shares: u128,
        receiver_id: &AccountId,
        memo: Option<&str>,
    ) -> Result<u128> {
        Self::assert_amount_and_receiver(shares, receiver_id)?;
        self.assert_external_sender(sender_id)?;

        let assets = self.preview_mint(shares)?;
        if assets == 0 {
            return Err(Error::ZeroAmount);
        }

        self.internal_execute_deposit(sender_id, receiver_id, assets, shares, memo)?;
        Ok(assets)
    }

    fn withdraw(
        &mut self,
        sender_id: &AccountId,
        assets: u128,
        receiver_id: &AccountId,
        owner_id: &AccountId,
        memo: Option<&str>,
    ) -> Result<u128> {
        Self::assert_amount_and_receiver(assets, receiver_id)?;

        let shares = self.preview_withdraw(assets)?;
        if shares == 0 {
            return Err(Error::ZeroAmount);
        }

        self.internal_execute_withdrawal(sender_id, receiver_id, owner_id, assets, shares, memo)?;
        Ok(shares)
    }

    fn redeem(
        &mut self,
        sender_id: &AccountId,
        shares: u128,
        receiver_id: &AccountId,
        owner_id: &AccountId,
        memo: Option<&str>,
    ) -> Result<u128> {
        Self::assert_amount_and_receiver(shares, receiver_id)?;

        let assets = self.preview_redeem(shares)?;
        if assets == 0 {
            return Err(Error::ZeroAmount);
        }

        self.internal_execute_withdrawal(sender_id, receiver_id, owner_id, assets, shares, memo)?;
        Ok(assets)
    }
}

/// Snapshot of the vault returned by `vault_info`.
#[derive(Serialize, JsonSchema, Clone)]
#[serde(crate = "near_sdk::serde")]
pub struct VaultInfoView {
    pub asset_account_id: String,
    pub total_assets: String,
    pub total_supply: String,
    pub extra_decimals: u8,
}

// ===== Vault Operations =====
#[near]
impl Contract {
    /// Deposits `assets` from the caller and mints shares to `receiver_id`
    /// (defaults to the caller). The caller must first `asset_approve` the
    /// vault account for at least `assets`.
    ///
    /// # Returns
    ///
    /// The number of shares minted.
    #[payable]
    pub fn deposit(&mut self, assets: U128, receiver_id: Option<AccountId>, memo: Option<String>) -> U128 {
        assert_one_yocto();
        let sender_id = env::predecessor_account_id();
        let receiver_id = receiver_id.unwrap_or_else(|| sender_id.clone());

        self.vault
            .deposit(&sender_id, assets.0, &receiver_id, memo.as_deref())
            .map(U128)
            .unwrap_or_panic()
    }

    /// Mints exactly `shares` to `receiver_id`, pulling the assets they cost.
    ///
    /// # Returns
    ///
    /// The number of assets pulled from the caller.
    #[payable]
    pub fn mint(&mut self, shares: U128, receiver_id: Option<AccountId>, memo: Option<String>) -> U128 {
        assert_one_yocto();
        let sender_id = env::predecessor_account_id();
        let receiver_id = receiver_id.unwrap_or_else(|| sender_id.clone());

        self.vault
            .mint(&sender_id, shares.0, &receiver_id, memo.as_deref())
            .map(U128)
            .unwrap_or_panic()
    }

    /// Pays out exactly `assets` to `receiver_id`, burning shares of
    /// `owner_id`. Both default to the caller; a caller other than the owner
    /// spends the owner's share allowance.
    ///
    /// # Returns
    ///
    /// The number of shares burned.
    #[payable]
    pub fn withdraw(
        &mut self,
        assets: U128,
        receiver_id: Option<AccountId>,
        owner_id: Option<AccountId>,
        memo: Option<String>,
    ) -> U128 {
        assert_one_yocto();
        let sender_id = env::predecessor_account_id();
        let receiver_id = receiver_id.unwrap_or_else(|| sender_id.clone());
        let owner_id = owner_id.unwrap_or_else(|| sender_id.clone());

        self.vault
            .withdraw(&sender_id, assets.0, &receiver_id, &owner_id, memo.as_deref())
            .map(U128)
            .unwrap_or_panic()
    }

    /// Burns exactly `shares` of `owner_id` and pays out what they are worth.
    ///
    /// # Returns
    ///
    /// The number of assets transferred to `receiver_id`.
    #[payable]
    pub fn redeem(
        &mut self,
        shares: U128,
        receiver_id: Option<AccountId>,
        owner_id: Option<AccountId>,
        memo: Option<String>,
    ) -> U128 {
        assert_one_yocto();
        let sender_id = env::predecessor_account_id();
        let receiver_id = receiver_id.unwrap_or_else(|| sender_id.clone());
        let owner_id = owner_id.unwrap_or_else(|| sender_id.clone());

        self.vault
            .redeem(&sender_id, shares.0, &receiver_id, &owner_id, memo.as_deref())
            .map(U128)
            .unwrap_or_panic()
    }

    // ==================== View Methods ====================

    pub fn total_assets(&self) -> U128 {
        U128(self.vault.total_assets())
    }

    pub fn convert_to_shares(&self, assets: U128) -> U128 {
        self.vault.convert_to_shares(assets.0).map(U128).unwrap_or_panic()
    }

    pub fn convert_to_assets(&self, shares: U128) -> U128 {
        self.vault.convert_to_assets(shares.0).map(U128).unwrap_or_panic()
    }

    pub fn preview_deposit(&self, assets: U128) -> U128 {
        self.vault.preview_deposit(assets.0).map(U128).unwrap_or_panic()
    }

    pub fn preview_mint(&self, shares: U128) -> U128 {
        self.vault.preview_mint(shares.0).map(U128).unwrap_or_panic()
    }

    pub fn preview_withdraw(&self, assets: U128) -> U128 {
        self.vault.preview_withdraw(assets.0).map(U128).unwrap_or_panic()
    }

    pub fn preview_redeem(&self, shares: U128) -> U128 {
        self.vault.preview_redeem(shares.0).map(U128).unwrap_or_panic()
    }

    pub fn max_deposit(&self, receiver_id: AccountId) -> U128 {
        U128(self.vault.max_deposit(&receiver_id))
    }

    pub fn max_mint(&self, receiver_id: AccountId) -> U128 {
        U128(self.vault.max_mint(&receiver_id))
    }

    pub fn max_withdraw(&self, owner_id: AccountId) -> U128 {
        self.vault.max_withdraw(&owner_id).map(U128).unwrap_or_panic()
    }

    pub fn max_redeem(&self, owner_id: AccountId) -> U128 {
        U128(self.vault.max_redeem(&owner_id))
    }

    pub fn vault_info(&self) -> VaultInfoView {
        VaultInfoView {
            asset_account_id: self.vault.asset_account_id().to_string(),
            total_assets: self.vault.total_assets().to_string(),
            total_supply: self.vault.total_supply().to_string(),
            extra_decimals: self.vault.extra_decimals(),
        }
    }
}

// ===== Share Token =====
#[near]
impl Contract {
    #[payable]
    pub fn ft_transfer(&mut self, receiver_id: AccountId, amount: U128, memo: Option<String>) {
        assert_one_yocto();
        let sender_id = env::predecessor_account_id();
        self.vault
            .share_transfer(&sender_id, &receiver_id, amount.0, memo.as_deref())
            .unwrap_or_panic()
    }

    #[payable]
    pub fn ft_transfer_from(
        &mut self,
        owner_id: AccountId,
        receiver_id: AccountId,
        amount: U128,
        memo: Option<String>,
    ) {
        assert_one_yocto();
        let spender_id = env::predecessor_account_id();
        self.vault
            .share_transfer_from(&spender_id, &owner_id, &receiver_id, amount.0, memo.as_deref())
            .unwrap_or_panic()
    }

    #[payable]
    pub fn ft_approve(&mut self, spender_id: AccountId, amount: U128) {
        assert_one_yocto();
        let owner_id = env::predecessor_account_id();
        self.vault
            .share_approve(&owner_id, &spender_id, amount.0)
            .unwrap_or_panic()
    }

    pub fn ft_total_supply(&self) -> U128 {
        U128(self.vault.total_supply())
    }

    pub fn ft_balance_of(&self, account_id: AccountId) -> U128 {
        U128(self.vault.balance_of(&account_id))
    }

    pub fn ft_allowance(&self, owner_id: AccountId, spender_id: AccountId) -> U128 {
        U128(self.vault.share_allowance(&owner_id, &spender_id))
    }
}

#[near]
impl FungibleTokenMetadataProvider for Contract {
    fn ft_metadata(&self) -> FungibleTokenMetadata {
        self.share_metadata.clone()
    }
}
