//! Core business logic module
//!
//! This module contains the ledger service components:
//! - `traits` - The account store abstraction
//! - `memory_store` - In-memory store implementation
//! - `teller` - Load, mutate and write-back orchestration for ledger operations

pub mod memory_store;
pub mod teller;
pub mod traits;

pub use memory_store::MemoryStore;
pub use teller::{AddressChange, Teller};
pub use traits::AccountStore;
