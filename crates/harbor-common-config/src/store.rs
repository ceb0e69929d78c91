// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{ConfigStoreError, ConfigStoreResult};

/// Read-only lookup of operator tunables.
///
/// Implementations must be safe for concurrent reads: reconcilers for
/// different Harbor instances share one store.
pub trait ConfigStore: Send + Sync {
	/// Short label used in logs.
	fn name(&self) -> &'static str;

	/// Look up the raw string value stored under `key`.
	fn get_item_value(&self, key: &str) -> ConfigStoreResult<String>;

	/// Look up `key` and parse it as a signed integer.
	///
	/// A value that exists but does not parse is an error, never a miss.
	fn get_item_value_int(&self, key: &str) -> ConfigStoreResult<i64> {
		let raw = self.get_item_value(key)?;
		parse_int(key, &raw)
	}
}

pub(crate) fn parse_int(key: &str, raw: &str) -> ConfigStoreResult<i64> {
	raw
		.trim()
		.parse()
		.map_err(|_| ConfigStoreError::InvalidValue {
			key: key.to_string(),
			message: format!("invalid integer value '{raw}'"),
		})
}

/// In-process store, mostly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
	items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_item(self, key: impl Into<String>, value: impl ToString) -> Self {
		self.set(key, value);
		self
	}

	pub fn set(&self, key: impl Into<String>, value: impl ToString) {
		let mut items = match self.items.write() {
			Ok(items) => items,
			Err(poisoned) => poisoned.into_inner(),
		};
		items.insert(key.into(), value.to_string());
	}
}

impl ConfigStore for MemoryStore {
	fn name(&self) -> &'static str {
		"memory"
	}

	fn get_item_value(&self, key: &str) -> ConfigStoreResult<String> {
		let items = self
			.items
			.read()
			.map_err(|_| ConfigStoreError::Unavailable("memory store lock poisoned".to_string()))?;
		items
			.get(key)
			.cloned()
			.ok_or_else(|| ConfigStoreError::not_found(key))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_missing_key_is_not_found() {
		let store = MemoryStore::new();
		let err = store.get_item_value_int("registry-encryption-cost").unwrap_err();
		assert!(err.is_not_found());
	}

	#[test]
	fn test_int_lookup() {
		let store = MemoryStore::new().with_item("registry-encryption-cost", 3);
		assert_eq!(store.get_item_value_int("registry-encryption-cost").unwrap(), 3);
	}

	#[test]
	fn test_non_integer_is_invalid_not_missing() {
		let store = MemoryStore::new().with_item("registry-encryption-cost", "high");
		let err = store.get_item_value_int("registry-encryption-cost").unwrap_err();
		assert!(matches!(err, ConfigStoreError::InvalidValue { .. }));
	}

	proptest! {
		#[test]
		fn test_any_i64_round_trips_through_string(value: i64) {
			let store = MemoryStore::new().with_item("k", value);
			prop_assert_eq!(store.get_item_value_int("k").unwrap(), value);
		}
	}
}
