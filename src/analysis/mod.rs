//! Feed accumulation and statistics modules.

pub mod aggregator;

pub use aggregator::*;
