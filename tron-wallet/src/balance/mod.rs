//! Balance lookup and normalization
//!
//! This module converts heterogeneous upstream balance representations
//! into exact decimal amounts and aggregates results across providers
//! with retry and failover.

mod amount;
mod normalizer;
mod provider;
mod aggregator;

pub use amount::*;
pub use normalizer::*;
pub use provider::*;
pub use aggregator::*;
