//! Common library for the leave management client
//!
//! This crate provides the persistent key/value storage areas shared by the
//! client services. A storage area plays the role of the browser's local
//! storage: string keys, string values, scoped to one origin and cleared as
//! a whole on logout.

pub mod cache;
pub mod error;
pub mod storage;

pub use cache::{RedisConfig, RedisStorage};
pub use error::{StorageError, StorageResult};
pub use storage::{Entries, FileStorage, MemoryStorage, StorageArea};
