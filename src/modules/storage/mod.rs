//! Storage module for uploaded assets
//!
//! Provides the local-disk store behind `/public/uploads`.

mod local_storage;

pub use local_storage::LocalStorage;
