//! In-memory slots
//!
//! Clones share the same map, so a test can hand one clone to a store and
//! keep another to inspect or sabotage the backend.

use super::{check_quota, KeyValueStore, KvError, KvResult};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct MemoryKvStore {
    slots: Rc<RefCell<HashMap<String, String>>>,
    quota: Option<u64>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(mut self, quota: Option<u64>) -> Self {
        self.quota = quota;
        self
    }

    /// Make every following `set` fail until switched off
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Seed a slot without going through quota or failure checks
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn ensure_writable(&self) -> KvResult<()> {
        if self.fail_writes.get() {
            Err(KvError::Unavailable("memory backend is read-only".to_string()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        self.ensure_writable()?;
        check_quota(self.quota, value)?;
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
