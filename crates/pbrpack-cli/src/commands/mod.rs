//! CLI command implementations

pub mod convert;
pub mod inspect;
pub mod pack;
pub mod synthesize;
