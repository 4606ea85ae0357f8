//! # Fungible Ledger
//!
//! Balance, allowance and supply bookkeeping for one fungible token. The
//! crate uses it twice: as the asset a vault custodies and as the vault's own
//! share token.
//!
//! Holder operations (`transfer`, `transfer_from`, `approve`) are open to any
//! caller. `mint`, `burn` and the `internal_*` primitives are for the
//! component that owns the ledger.

mod core;

pub use self::core::*;
