// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::EngineError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

pub const EXPENSES_KEY: &str = "expenses";
pub const BUDGETS_KEY: &str = "budgets";
pub const CATEGORIES_KEY: &str = "categories";
pub const USER_PROFILE_KEY: &str = "userProfile";

/// Named JSON blob storage. Blobs are opaque strings here; encoding and
/// decoding happen in the calling component. A failed `write` means the
/// operation did not apply and no partial state is committed.
pub trait RecordStore {
    fn read(&self, key: &str) -> Result<Option<String>, EngineError>;
    fn write(&self, key: &str, value: &str) -> Result<(), EngineError>;
    fn remove(&self, key: &str) -> Result<(), EngineError>;
}

/// Decode a blob leniently: an absent key and a blob that fails to decode
/// both come back as `None`. Storage failures still propagate.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn RecordStore,
    key: &str,
) -> Result<Option<T>, EngineError> {
    match store.read(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw).ok()),
        None => Ok(None),
    }
}

pub fn write_json<T: Serialize>(
    store: &dyn RecordStore,
    key: &str,
    value: &T,
) -> Result<(), EngineError> {
    let raw =
        serde_json::to_string(value).map_err(|e| EngineError::StorageUnavailable(e.to_string()))?;
    store.write(key, &raw)
}

/// In-memory store used by the test suite and anywhere durability is not
/// wanted. `fail_after` arms a write budget so partial-cascade paths can be
/// exercised deterministically.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RefCell<HashMap<String, String>>,
    writes_left: Cell<Option<u32>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `n` more writes succeed, then fail every later write with
    /// `StorageUnavailable`. Reads and removes stay available.
    pub fn fail_after(&self, n: u32) {
        self.writes_left.set(Some(n));
    }
}

impl RecordStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, EngineError> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), EngineError> {
        if let Some(left) = self.writes_left.get() {
            if left == 0 {
                return Err(EngineError::StorageUnavailable(
                    "write budget exhausted".into(),
                ));
            }
            self.writes_left.set(Some(left - 1));
        }
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), EngineError> {
        self.blobs.borrow_mut().remove(key);
        Ok(())
    }
}
