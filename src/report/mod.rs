//! Feed document assembly and persistence.

pub mod generator;

pub use generator::*;
