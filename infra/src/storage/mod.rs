//! Durable storage for the in-flight verification handle.
//!
//! One fixed key holds the current handle; every new sign-in attempt
//! overwrites it, and a restarted process reads it back before completing
//! code entry.

pub mod memory;
pub mod redis_store;

pub use memory::MemoryHandleStore;
pub use redis_store::{HandleStoreConfig, RedisHandleStore};

/// Key under which the current verification handle is stored.
pub const DEFAULT_HANDLE_KEY: &str = "signin:verification_handle";
