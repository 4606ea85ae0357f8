// Test builder pattern for integration tests
// This builder helps simplify the creation of vault test scenarios

use std::cell::RefCell;
use std::rc::Rc;

use vault::{FungibleLedger, Result, Vault, VaultCore, UNLIMITED_ALLOWANCE};

use super::*;

pub type SharedLedger = Rc<RefCell<FungibleLedger>>;

pub struct TestScenarioBuilder {
    extra_decimals: u8,
    accounts: Vec<(String, u128, bool)>, // (account_id, funding, approves vault)
}

impl TestScenarioBuilder {
    pub fn new() -> Self {
        Self {
            extra_decimals: 0,
            accounts: Vec::new(),
        }
    }

    pub fn extra_decimals(mut self, n: u8) -> Self {
        self.extra_decimals = n;
        self
    }

    /// Funds `name` with assets and approves the vault for all of them.
    pub fn fund(mut self, name: &str, amount: u128) -> Self {
        self.accounts.push((name.to_string(), amount, true));
        self
    }

    /// Funds `name` with assets without approving the vault.
    pub fn fund_unapproved(mut self, name: &str, amount: u128) -> Self {
        self.accounts.push((name.to_string(), amount, false));
        self
    }

    pub fn build(self) -> TestScenario {
        setup_context();

        let asset = Rc::new(RefCell::new(FungibleLedger::new(unique_prefix("asset"))));
        {
            let mut ledger = asset.borrow_mut();
            for (name, amount, approves) in &self.accounts {
                if *amount > 0 {
                    ledger.mint(&account(name), *amount, None).unwrap();
                }
                if *approves {
                    ledger
                        .approve(&account(name), &account(VAULT), UNLIMITED_ALLOWANCE)
                        .unwrap();
                }
            }
        }

        let vault = Vault::new(
            account(VAULT),
            Rc::clone(&asset),
            unique_prefix("shares"),
            self.extra_decimals,
        );

        TestScenario { asset, vault }
    }
}

/// A vault plus the asset ledger it custodies in.
pub struct TestScenario {
    pub asset: SharedLedger,
    pub vault: Vault<SharedLedger>,
}

impl TestScenario {
    pub fn deposit(&mut self, name: &str, assets: u128) -> Result<u128> {
        self.vault
            .deposit(&account(name), assets, &account(name), None)
    }

    pub fn mint(&mut self, name: &str, shares: u128) -> Result<u128> {
        self.vault.mint(&account(name), shares, &account(name), None)
    }

    pub fn withdraw(&mut self, name: &str, assets: u128) -> Result<u128> {
        self.vault
            .withdraw(&account(name), assets, &account(name), &account(name), None)
    }

    pub fn redeem(&mut self, name: &str, shares: u128) -> Result<u128> {
        self.vault
            .redeem(&account(name), shares, &account(name), &account(name), None)
    }

    /// Transfers assets straight into custody without minting shares.
    pub fn accrue_yield(&mut self, from: &str, amount: u128) {
        self.asset
            .borrow_mut()
            .transfer(&account(from), &account(VAULT), amount, Some("yield"))
            .unwrap();
    }

    pub fn asset_balance(&self, name: &str) -> u128 {
        self.asset.borrow().balance_of(&account(name))
    }

    pub fn shares_of(&self, name: &str) -> u128 {
        self.vault.balance_of(&account(name))
    }

    pub fn total_assets(&self) -> u128 {
        self.vault.total_assets()
    }

    pub fn total_supply(&self) -> u128 {
        self.vault.total_supply()
    }
}
