#![forbid(unsafe_code)]

pub mod repo;
pub mod seed;
pub mod site_store;

pub use site_store::{SiteStore, StorageError};
