//! # Vault Standards Module
//!
//! Implements the NEP-621 Fungible Token Vault standard.
//!
//! ## Module Organization
//!
//! - [`core`]: The asset-ledger interface and the vault trait with its default previews and bounds
//! - [`events`]: NEP-297 event logging for deposits, withdrawals and approvals
//! - [`internal`]: Share/asset conversions and staged deposit/withdrawal execution
//! - [`mul_div`]: Safe multiplication and division with configurable rounding

pub mod core;
pub mod events;
pub mod internal;
pub mod mul_div;

pub use self::core::*;
pub use self::mul_div::{mul_div, Rounding};
