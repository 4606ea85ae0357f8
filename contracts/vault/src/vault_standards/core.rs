use std::cell::RefCell;
use std::rc::Rc;

use near_sdk::AccountId;

use super::internal::{internal_convert_to_assets, internal_convert_to_shares};
use super::mul_div::Rounding;
use crate::error::Result;
use crate::ledger::FungibleLedger;

/// What the vault needs from the ledger of the asset it custodies.
///
/// Failures are returned unchanged; the vault wraps them in
/// [`Error::TransferFailed`](crate::Error::TransferFailed).
pub trait AssetLedger {
    fn balance_of(&self, account_id: &AccountId) -> u128;

    fn transfer(&mut self, sender_id: &AccountId, receiver_id: &AccountId, amount: u128) -> Result<()>;

    fn transfer_from(
        &mut self,
        spender_id: &AccountId,
        owner_id: &AccountId,
        receiver_id: &AccountId,
        amount: u128,
    ) -> Result<()>;
}

impl AssetLedger for FungibleLedger {
    fn balance_of(&self, account_id: &AccountId) -> u128 {
        FungibleLedger::balance_of(self, account_id)
    }

    fn transfer(&mut self, sender_id: &AccountId, receiver_id: &AccountId, amount: u128) -> Result<()> {
        FungibleLedger::transfer(self, sender_id, receiver_id, amount, None)
    }

    fn transfer_from(
        &mut self,
        spender_id: &AccountId,
        owner_id: &AccountId,
        receiver_id: &AccountId,
        amount: u128,
    ) -> Result<()> {
        FungibleLedger::transfer_from(self, spender_id, owner_id, receiver_id, amount, None)
    }
}

impl<L: AssetLedger + ?Sized> AssetLedger for &mut L {
    fn balance_of(&self, account_id: &AccountId) -> u128 {
        (**self).balance_of(account_id)
    }

    fn transfer(&mut self, sender_id: &AccountId, receiver_id: &AccountId, amount: u128) -> Result<()> {
        (**self).transfer(sender_id, receiver_id, amount)
    }

    fn transfer_from(
        &mut self,
        spender_id: &AccountId,
        owner_id: &AccountId,
        receiver_id: &AccountId,
        amount: u128,
    ) -> Result<()> {
        (**self).transfer_from(spender_id, owner_id, receiver_id, amount)
    }
}

/// Shared handle: the vault and outside parties transact in the same asset.
impl<L: AssetLedger> AssetLedger for Rc<RefCell<L>> {
    fn balance_of(&self, account_id: &AccountId) -> u128 {
        self.borrow().balance_of(account_id)
    }

    fn transfer(&mut self, sender_id: &AccountId, receiver_id: &AccountId, amount: u128) -> Result<()> {
        self.borrow_mut().transfer(sender_id, receiver_id, amount)
    }

    fn transfer_from(
        &mut self,
        spender_id: &AccountId,
        owner_id: &AccountId,
        receiver_id: &AccountId,
        amount: u128,
    ) -> Result<()> {
        self.borrow_mut()
            .transfer_from(spender_id, owner_id, receiver_id, amount)
    }
}

/// NEP-621 vault interface.
///
/// Implementors supply the live state (`total_assets`, `total_supply`,
/// `balance_of`) and the four mutating operations. Conversions, previews and
/// bounds derive from the live state on every call; nothing is cached.
pub trait VaultCore {
    /// The vault's custody account in the asset ledger.
    fn asset_account_id(&self) -> &AccountId;
    /// Assets currently held by the custody account.
    fn total_assets(&self) -> u128;
    /// Shares outstanding.
    fn total_supply(&self) -> u128;
    /// Shares held by `account_id`.
    fn balance_of(&self, account_id: &AccountId) -> u128;
    /// Power-of-ten precision offset applied while no shares exist.
    fn extra_decimals(&self) -> u8;

    fn deposit(
        &mut self,
        sender_id: &AccountId,
        assets: u128,
        receiver_id: &AccountId,
        memo: Option<&str>,
    ) -> Result<u128>;

    fn mint(
        &mut self,
        sender_id: &AccountId,
        shares: u128,
        receiver_id: &AccountId,
        memo: Option<&str>,
    ) -> Result<u128>;

    fn withdraw(
        &mut self,
        sender_id: &AccountId,
        assets: u128,
        receiver_id: &AccountId,
        owner_id: &AccountId,
        memo: Option<&str>,
    ) -> Result<u128>;

    fn redeem(
        &mut self,
        sender_id: &AccountId,
        shares: u128,
        receiver_id: &AccountId,
        owner_id: &AccountId,
        memo: Option<&str>,
    ) -> Result<u128>;

    fn convert_to_shares(&self, assets: u128) -> Result<u128> {
        internal_convert_to_shares(
            assets,
            self.total_supply(),
            self.total_assets(),
            self.extra_decimals(),
            Rounding::Down,
        )
    }

    fn convert_to_assets(&self, shares: u128) -> Result<u128> {
        internal_convert_to_assets(
            shares,
            self.total_supply(),
            self.total_assets(),
            self.extra_decimals(),
            Rounding::Down,
        )
    }

    fn max_deposit(&self, _receiver_id: &AccountId) -> u128 {
        u128::MAX
    }

    fn preview_deposit(&self, assets: u128) -> Result<u128> {
        self.convert_to_shares(assets)
    }

    fn max_mint(&self, _receiver_id: &AccountId) -> u128 {
        u128::MAX
    }

    /// Assets a caller must pay for `shares`, rounded up.
    fn preview_mint(&self, shares: u128) -> Result<u128> {
        internal_convert_to_assets(
            shares,
            self.total_supply(),
            self.total_assets(),
            self.extra_decimals(),
            Rounding::Up,
        )
    }

    fn max_withdraw(&self, owner_id: &AccountId) -> Result<u128> {
        self.convert_to_assets(self.balance_of(owner_id))
    }

    /// Shares burned to pay out exactly `assets`, rounded up.
    fn preview_withdraw(&self, assets: u128) -> Result<u128> {
        internal_convert_to_shares(
            assets,
            self.total_supply(),
            self.total_assets(),
            self.extra_decimals(),
            Rounding::Up,
        )
    }

    fn max_redeem(&self, owner_id: &AccountId) -> u128 {
        self.balance_of(owner_id)
    }

    fn preview_redeem(&self, shares: u128) -> Result<u128> {
        self.convert_to_assets(shares)
    }
}
