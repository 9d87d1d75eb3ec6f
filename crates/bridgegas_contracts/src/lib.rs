#![forbid(unsafe_code)]

pub mod common;
pub mod content;
pub mod whitelist;

pub use common::{ContractViolation, SchemaVersion, UnixTimeNs, Validate};
