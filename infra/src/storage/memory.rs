//! In-memory verification-handle store
//!
//! Process-local stand-in for the Redis store, used in tests and demos.
//! Same overwrite-on-write, last-value-or-absent semantics, without the
//! durability.

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

use sg_core::domain::VerificationHandle;
use sg_core::services::flow::HandleStoreTrait;

/// In-process handle store
#[derive(Default)]
pub struct MemoryHandleStore {
    stored: Mutex<Option<String>>,
}

impl MemoryHandleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HandleStoreTrait for MemoryHandleStore {
    async fn put_handle(&self, handle: &VerificationHandle) -> Result<(), String> {
        let mut stored = self.stored.lock().unwrap_or_else(PoisonError::into_inner);
        *stored = Some(handle.as_str().to_string());
        Ok(())
    }

    async fn get_handle(&self) -> Result<Option<VerificationHandle>, String> {
        let stored = self.stored.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(stored.clone().map(VerificationHandle::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_before_write_is_absent() {
        let store = MemoryHandleStore::new();
        assert_eq!(store.get_handle().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_overwrites_previous_handle() {
        let store = MemoryHandleStore::new();

        store
            .put_handle(&VerificationHandle::new("H1"))
            .await
            .unwrap();
        assert_eq!(
            store.get_handle().await.unwrap(),
            Some(VerificationHandle::new("H1"))
        );

        store
            .put_handle(&VerificationHandle::new("H2"))
            .await
            .unwrap();
        assert_eq!(
            store.get_handle().await.unwrap(),
            Some(VerificationHandle::new("H2"))
        );
    }
}
