//! Implementation name registry shared across interface passes

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::{CodegenError, Result};

use super::naming::module_name;

/// Maps each DAO interface name to its implementation name.
///
/// Append-only: a key is written at most once and never revisited, so passes
/// that each own a disjoint key can register concurrently. A poisoned lock is
/// recovered rather than propagated, since no write ever leaves the map
/// half-updated.
#[derive(Debug, Default)]
pub struct ImplementationRegistry {
    entries: RwLock<HashMap<String, String>>,
}

impl ImplementationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `interface` for `implementation`.
    ///
    /// Fails with [`CodegenError::NamingCollision`] if the interface name is
    /// already registered, or if another implementation is emitted into the
    /// same module (`UserDao_Impl` and `UserDAO_Impl` both land in
    /// `user_dao_impl`). The existing entry is left untouched.
    pub fn register(&self, interface: &str, implementation: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let module = module_name(implementation);
        if entries.contains_key(interface)
            || entries.values().any(|claimed| module_name(claimed) == module)
        {
            return Err(CodegenError::NamingCollision {
                interface: interface.to_string(),
                implementation: implementation.to_string(),
            });
        }
        entries.insert(interface.to_string(), implementation.to_string());
        Ok(())
    }

    /// Resolve an interface to its implementation name
    pub fn lookup(&self, interface: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(interface)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted copy of all entries
    pub fn snapshot(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort();
        entries
    }
}
