use near_contract_standards::fungible_token::events::{FtBurn, FtMint, FtTransfer};
use near_sdk::json_types::U128;
use near_sdk::store::LookupMap;
use near_sdk::{near, AccountId, IntoStorageKey};

use crate::error::{Error, Result};
use crate::vault_standards::events::FtApprove;

/// Allowance value that is never decremented by spending.
pub const UNLIMITED_ALLOWANCE: u128 = u128::MAX;

/// The null account. Implicit account ids are 64 hex characters, so this one
/// is a valid `AccountId` that nobody holds a key for.
pub const ZERO_ACCOUNT_ID: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Returns `true` for the null account.
pub fn is_zero_account(account_id: &AccountId) -> bool {
    account_id.as_str() == ZERO_ACCOUNT_ID
}

/// Balance and allowance bookkeeping for a single fungible token.
///
/// Each instance owns its maps under its own storage prefix, so one contract
/// can hold several ledgers side by side.
#[near(serializers = [borsh])]
pub struct FungibleLedger {
    balances: LookupMap<AccountId, u128>,
    allowances: LookupMap<(AccountId, AccountId), u128>,
    total_supply: u128,
}

impl FungibleLedger {
    pub fn new<S>(prefix: S) -> Self
    where
        S: IntoStorageKey,
    {
        let prefix = prefix.into_storage_key();
        Self {
            balances: LookupMap::new([prefix.as_slice(), b"b".as_slice()].concat()),
            allowances: LookupMap::new([prefix.as_slice(), b"a".as_slice()].concat()),
            total_supply: 0,
        }
    }

    // ==================== Queries ====================

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn balance_of(&self, account_id: &AccountId) -> u128 {
        self.balances.get(account_id).copied().unwrap_or(0)
    }

    pub fn allowance(&self, owner_id: &AccountId, spender_id: &AccountId) -> u128 {
        self.allowances
            .get(&(owner_id.clone(), spender_id.clone()))
            .copied()
            .unwrap_or(0)
    }

    // ==================== Holder operations ====================

    /// Moves `amount` from `sender_id` to `receiver_id`.
    pub fn transfer(
        &mut self,
        sender_id: &AccountId,
        receiver_id: &AccountId,
        amount: u128,
        memo: Option<&str>,
    ) -> Result<()> {
        self.internal_transfer(sender_id, receiver_id, amount)?;
        emit_transfer(sender_id, receiver_id, amount, memo);
        Ok(())
    }

    /// Moves `amount` out of `owner_id` on behalf of `spender_id`.
    ///
    /// The owner acting on its own balance needs no allowance. Otherwise the
    /// allowance is checked before the move and consumed after it, unless it
    /// is [`UNLIMITED_ALLOWANCE`].
    pub fn transfer_from(
        &mut self,
        spender_id: &AccountId,
        owner_id: &AccountId,
        receiver_id: &AccountId,
        amount: u128,
        memo: Option<&str>,
    ) -> Result<()> {
        if spender_id != owner_id {
            self.assert_allowance(owner_id, spender_id, amount)?;
        }
        self.internal_transfer(owner_id, receiver_id, amount)?;
        if spender_id != owner_id {
            self.internal_spend_allowance(owner_id, spender_id, amount)?;
        }
        emit_transfer(owner_id, receiver_id, amount, memo);
        Ok(())
    }

    /// Sets the allowance `spender_id` holds over `owner_id`'s balance.
    pub fn approve(&mut self, owner_id: &AccountId, spender_id: &AccountId, amount: u128) -> Result<()> {
        if is_zero_account(spender_id) {
            return Err(Error::ZeroAddress);
        }
        self.internal_set_allowance(owner_id, spender_id, amount);

        FtApprove {
            owner_id,
            spender_id,
            amount: U128(amount),
        }
        .emit();

        Ok(())
    }

    // ==================== Owner-component operations ====================

    /// Creates `amount` new tokens for `receiver_id`.
    pub fn mint(&mut self, receiver_id: &AccountId, amount: u128, memo: Option<&str>) -> Result<()> {
        if is_zero_account(receiver_id) {
            return Err(Error::InvalidRecipient);
        }
        self.internal_deposit(receiver_id, amount)?;

        FtMint {
            owner_id: receiver_id,
            amount: U128(amount),
            memo,
        }
        .emit();

        Ok(())
    }

    /// Destroys `amount` tokens held by `account_id`.
    pub fn burn(&mut self, account_id: &AccountId, amount: u128, memo: Option<&str>) -> Result<()> {
        if is_zero_account(account_id) {
            return Err(Error::InvalidSource);
        }
        self.internal_withdraw(account_id, amount)?;

        FtBurn {
            owner_id: account_id,
            amount: U128(amount),
            memo,
        }
        .emit();

        Ok(())
    }

    // ==================== Internal primitives ====================
    //
    // These mutate without emitting events. The owning component uses them
    // to stage changes it may still have to undo.

    /// Credits `amount` to `account_id` and grows the supply.
    pub fn internal_deposit(&mut self, account_id: &AccountId, amount: u128) -> Result<()> {
        let total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        // Bounded by the supply, so it cannot overflow once the supply did not.
        let balance = self.balance_of(account_id) + amount;

        self.set_balance(account_id, balance);
        self.total_supply = total_supply;
        Ok(())
    }

    /// Debits `amount` from `account_id` and shrinks the supply.
    pub fn internal_withdraw(&mut self, account_id: &AccountId, amount: u128) -> Result<()> {
        let balance = self.assert_balance(account_id, amount)?;

        self.set_balance(account_id, balance - amount);
        self.total_supply -= amount;
        Ok(())
    }

    /// Moves `amount` between two accounts. Self-transfers leave balances as they are.
    pub fn internal_transfer(
        &mut self,
        sender_id: &AccountId,
        receiver_id: &AccountId,
        amount: u128,
    ) -> Result<()> {
        if is_zero_account(receiver_id) {
            return Err(Error::InvalidRecipient);
        }
        let sender_balance = self.assert_balance(sender_id, amount)?;

        if sender_id != receiver_id {
            let receiver_balance = self.balance_of(receiver_id) + amount;
            self.set_balance(sender_id, sender_balance - amount);
            self.set_balance(receiver_id, receiver_balance);
        }
        Ok(())
    }

    /// Consumes `amount` of the allowance `spender_id` holds over `owner_id`.
    ///
    /// Returns the allowance as it was before the call so a caller can
    /// restore it.
    pub fn internal_spend_allowance(
        &mut self,
        owner_id: &AccountId,
        spender_id: &AccountId,
        amount: u128,
    ) -> Result<u128> {
        let allowance = self.assert_allowance(owner_id, spender_id, amount)?;
        if allowance != UNLIMITED_ALLOWANCE {
            self.internal_set_allowance(owner_id, spender_id, allowance - amount);
        }
        Ok(allowance)
    }

    pub fn internal_set_allowance(&mut self, owner_id: &AccountId, spender_id: &AccountId, amount: u128) {
        let key = (owner_id.clone(), spender_id.clone());
        if amount == 0 {
            self.allowances.remove(&key);
        } else {
            self.allowances.insert(key, amount);
        }
    }

    /// Checks that `account_id` holds at least `amount` and returns its balance.
    pub fn assert_balance(&self, account_id: &AccountId, amount: u128) -> Result<u128> {
        let balance = self.balance_of(account_id);
        if amount > balance {
            return Err(Error::InsufficientBalance {
                account_id: account_id.clone(),
                balance,
                amount,
            });
        }
        Ok(balance)
    }

    /// Checks that `spender_id` may move `amount` of `owner_id`'s balance and
    /// returns the current allowance.
    pub fn assert_allowance(
        &self,
        owner_id: &AccountId,
        spender_id: &AccountId,
        amount: u128,
    ) -> Result<u128> {
        let allowance = self.allowance(owner_id, spender_id);
        if amount > allowance {
            return Err(Error::InsufficientAllowance {
                owner_id: owner_id.clone(),
                spender_id: spender_id.clone(),
                allowance,
                amount,
            });
        }
        Ok(allowance)
    }

    fn set_balance(&mut self, account_id: &AccountId, balance: u128) {
        if balance == 0 {
            self.balances.remove(account_id);
        } else {
            self.balances.insert(account_id.clone(), balance);
        }
    }
}

fn emit_transfer(sender_id: &AccountId, receiver_id: &AccountId, amount: u128, memo: Option<&str>) {
    FtTransfer {
        old_owner_id: sender_id,
        new_owner_id: receiver_id,
        amount: U128(amount),
        memo,
    }
    .emit();
}
