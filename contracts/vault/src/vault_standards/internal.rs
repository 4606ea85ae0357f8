//! # Internal Vault Operations
//!
//! Share/asset conversion math and the staged execution of deposits and
//! withdrawals. These functions implement the vault accounting used by the
//! public API.
//!
//! ## Key Functions
//!
//! - `internal_convert_to_shares`: Converts assets to shares at the live rate
//! - `internal_convert_to_assets`: Converts shares to assets at the live rate
//! - `internal_execute_deposit`: Pulls assets into custody, then mints shares
//! - `internal_execute_withdrawal`: Burns shares, then pushes assets out, with rollback

use near_contract_standards::fungible_token::events::FtBurn;
use near_sdk::{env, json_types::U128, AccountId};

use super::core::AssetLedger;
use super::events::{VaultDeposit, VaultWithdraw};
use super::mul_div::{mul_div, Rounding};
use crate::error::{Error, Result};
use crate::vault::Vault;

/// Shares per asset unit while the vault is empty.
fn bootstrap_multiplier(extra_decimals: u8) -> Result<u128> {
    10u128
        .checked_pow(extra_decimals as u32)
        .ok_or(Error::ArithmeticOverflow)
}

/// Converts assets to shares.
///
/// Formula: shares = assets * total_supply / total_assets
///
/// With no shares outstanding the rate is 1:1 (scaled by `extra_decimals`).
/// With shares outstanding but nothing in custody the result is 0.
pub fn internal_convert_to_shares(
    assets: u128,
    total_supply: u128,
    total_assets: u128,
    extra_decimals: u8,
    rounding: Rounding,
) -> Result<u128> {
    if total_supply == 0 {
        return assets
            .checked_mul(bootstrap_multiplier(extra_decimals)?)
            .ok_or(Error::ArithmeticOverflow);
    }

    if total_assets == 0 {
        return Ok(0);
    }

    mul_div(assets, total_supply, total_assets, rounding)
}

/// Converts shares to assets.
///
/// Formula: assets = shares * total_assets / total_supply
pub fn internal_convert_to_assets(
    shares: u128,
    total_supply: u128,
    total_assets: u128,
    extra_decimals: u8,
    rounding: Rounding,
) -> Result<u128> {
    if total_supply == 0 {
        return mul_div(shares, 1, bootstrap_multiplier(extra_decimals)?, rounding);
    }

    if total_assets == 0 {
        return Ok(0);
    }

    mul_div(shares, total_assets, total_supply, rounding)
}

impl<A: AssetLedger> Vault<A> {
    /// Pulls `assets` from `sender_id` into custody and mints `shares` to
    /// `receiver_id`.
    ///
    /// Both amounts must already be computed from the pre-deposit state.
    /// Everything the mint could reject is checked before the pull, so the
    /// mint cannot fail once assets have moved.
    pub(crate) fn internal_execute_deposit(
        &mut self,
        sender_id: &AccountId,
        receiver_id: &AccountId,
        assets: u128,
        shares: u128,
        memo: Option<&str>,
    ) -> Result<()> {
        self.shares
            .total_supply()
            .checked_add(shares)
            .ok_or(Error::ArithmeticOverflow)?;

        self.asset
            .transfer_from(&self.account_id, sender_id, &self.account_id, assets)
            .map_err(Error::transfer_failed)?;

        self.shares.mint(receiver_id, shares, Some("Deposit"))?;

        VaultDeposit {
            sender_id,
            owner_id: receiver_id,
            assets: U128(assets),
            shares: U128(shares),
            memo,
        }
        .emit();

        Ok(())
    }

    /// Executes a withdrawal following the CEI (Checks-Effects-Interactions) pattern.
    ///
    /// 1. **Checks**: allowance of `sender_id` over `owner_id` and the owner's share balance
    /// 2. **Effects**: consumes the allowance and burns the shares
    /// 3. **Interactions**: transfers `assets` out of custody to `receiver_id`
    ///
    /// If the asset ledger rejects the transfer, the burn and the allowance
    /// are restored and no share events are emitted.
    pub(crate) fn internal_execute_withdrawal(
        &mut self,
        sender_id: &AccountId,
        receiver_id: &AccountId,
        owner_id: &AccountId,
        assets: u128,
        shares: u128,
        memo: Option<&str>,
    ) -> Result<()> {
        // Checks
        let needs_allowance = sender_id != owner_id;
        if needs_allowance {
            self.shares.assert_allowance(owner_id, sender_id, shares)?;
        }
        self.shares.assert_balance(owner_id, shares)?;

        // Effects
        let previous_allowance = if needs_allowance {
            Some(self.shares.internal_spend_allowance(owner_id, sender_id, shares)?)
        } else {
            None
        };
        self.shares.internal_withdraw(owner_id, shares)?;

        // Interactions
        if let Err(err) = self.asset.transfer(&self.account_id, receiver_id, assets) {
            self.shares.internal_deposit(owner_id, shares)?;
            if let Some(allowance) = previous_allowance {
                self.shares
                    .internal_set_allowance(owner_id, sender_id, allowance);
            }

            env::log_str(&format!(
                "withdrawal_rollback owner={} receiver={} shares={} assets={} reason={}",
                owner_id, receiver_id, shares, assets, err
            ));

            return Err(Error::transfer_failed(err));
        }

        FtBurn {
            owner_id,
            amount: U128(shares),
            memo: Some("Withdrawal"),
        }
        .emit();

        VaultWithdraw {
            sender_id,
            receiver_id,
            owner_id,
            assets: U128(assets),
            shares: U128(shares),
            memo,
        }
        .emit();

        Ok(())
    }
}
