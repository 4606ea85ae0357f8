//! # Test Utilities
//!
//! Provides helper functions and builders for unit testing the contract.
//! These utilities simplify test setup by handling NEAR SDK context
//! initialization and contract configuration.
//!
//! ## Modules
//!
//! - [`helpers`]: Low-level context, account and metadata helpers
//! - [`builders`]: Builder pattern for flexible contract configuration

/// Helper functions for test context and contract initialization.
#[cfg(test)]
pub mod helpers {
    use near_contract_standards::fungible_token::metadata::FungibleTokenMetadata;
    use near_sdk::test_utils::VMContextBuilder;
    use near_sdk::{testing_env, AccountId, NearToken};

    /// Account the contract is deployed to; the vault custodies assets here.
    pub const VAULT_ACCOUNT: &str = "vault.test";

    /// Initializes the NEAR VM context for testing.
    ///
    /// Storage survives the call, so tests can switch callers mid-scenario.
    ///
    /// # Example
    ///
    /// ```ignore
    /// init_ctx("alice.test", 1); // Alice calls with 1 yoctoNEAR
    /// contract.some_method();
    /// ```
    pub fn init_ctx(predecessor: &str, deposit_yocto: u128) {
        let mut builder = VMContextBuilder::new();
        builder
            .current_account_id(VAULT_ACCOUNT.parse().unwrap())
            .predecessor_account_id(predecessor.parse().unwrap())
            .attached_deposit(NearToken::from_yoctonear(deposit_yocto));
        testing_env!(builder.build());
    }

    pub fn account(id: &str) -> AccountId {
        id.parse().unwrap()
    }

    pub fn metadata(name: &str, symbol: &str) -> FungibleTokenMetadata {
        FungibleTokenMetadata {
            spec: "ft-1.0.0".to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            icon: None,
            reference: None,
            reference_hash: None,
            decimals: 6,
        }
    }
}

/// Builder pattern for flexible contract configuration in tests.
#[cfg(test)]
pub mod builders {
    use crate::test_utils::helpers::{init_ctx, metadata};
    use crate::Contract;
    use near_sdk::json_types::U128;

    /// Builder for creating test `Contract` instances with custom configuration.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let contract = ContractBuilder::new("owner.test")
    ///     .asset_supply(1_000_000)
    ///     .extra_decimals(3)
    ///     .predecessor("alice.test")
    ///     .attached(1)
    ///     .build();
    /// ```
    pub struct ContractBuilder {
        owner: String,
        asset_supply: u128,
        extra: u8,
        predecessor: Option<String>,
        attached: u128,
    }

    impl ContractBuilder {
        pub fn new(owner: &str) -> Self {
            Self {
                owner: owner.to_string(),
                asset_supply: 1_000_000_000,
                extra: 0,
                predecessor: None,
                attached: 1,
            }
        }

        /// Sets the initial asset supply credited to the owner.
        pub fn asset_supply(mut self, n: u128) -> Self {
            self.asset_supply = n;
            self
        }

        /// Sets the extra decimals for share precision.
        pub fn extra_decimals(mut self, n: u8) -> Self {
            self.extra = n;
            self
        }

        /// Sets the predecessor (caller) account for subsequent calls.
        pub fn predecessor(mut self, id: &str) -> Self {
            self.predecessor = Some(id.to_string());
            self
        }

        /// Sets the attached deposit in yoctoNEAR.
        pub fn attached(mut self, yocto: u128) -> Self {
            self.attached = yocto;
            self
        }

        pub fn build(self) -> Contract {
            init_ctx(&self.owner, 0);
            let contract = Contract::init(
                self.owner.parse().unwrap(),
                U128(self.asset_supply),
                metadata("USD Coin", "USDC"),
                metadata("USDC Vault Shares", "vUSDC"),
                Some(self.extra),
            );
            let predecessor = self.predecessor.unwrap_or(self.owner);
            init_ctx(&predecessor, self.attached);
            contract
        }
    }
}
