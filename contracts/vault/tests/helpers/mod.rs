//! # Test Helpers Module
//!
//! Common infrastructure for vault integration tests. The tests drive the
//! library directly: an asset ledger shared through `Rc<RefCell<_>>` so
//! outside accounts keep transacting in it, and a vault holding the same
//! handle.
//!
//! ## Modules
//!
//! - [`test_builder`]: Builder pattern for constructing test scenarios
//!
//! ## Key Functions
//!
//! - [`setup_context`]: Fresh NEAR VM context for a test
//! - [`account`]: Parses a test account id

#![allow(dead_code)]

use near_sdk::test_utils::VMContextBuilder;
use near_sdk::{testing_env, AccountId};
use std::sync::atomic::{AtomicUsize, Ordering};

pub mod test_builder;

// ============================================================================
// Constants
// ============================================================================

/// Custody account of the vault under test.
pub const VAULT: &str = "vault.test";

/// Default asset funding per account (1000 USDC with 6 decimals).
pub const DEFAULT_FUNDING: u128 = 1_000_000_000;

// ============================================================================
// Helper Functions
// ============================================================================

/// Installs a fresh VM context with the vault as the current account.
pub fn setup_context() {
    let mut builder = VMContextBuilder::new();
    builder.current_account_id(account(VAULT));
    testing_env!(builder.build());
}

pub fn account(id: &str) -> AccountId {
    id.parse().unwrap()
}

/// A storage prefix no other ledger in this process uses.
///
/// Storage outlives a single scenario (proptest runs many per thread), so
/// every ledger gets its own prefix.
pub fn unique_prefix(tag: &str) -> Vec<u8> {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    format!("{tag}{}", NEXT.fetch_add(1, Ordering::Relaxed)).into_bytes()
}
