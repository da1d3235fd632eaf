//! Account functionality
//!
//! This module turns public keys into canonical TRON addresses and
//! produces bounded batches of derived accounts from a mnemonic.

mod address;
mod batch;

pub use address::*;
pub use batch::*;
