// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Store backends: environment variables, TOML files, and a layered view.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{ConfigStoreError, ConfigStoreResult};
use crate::store::{parse_int, ConfigStore, MemoryStore};

/// Default location of the operator tunables file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/harbor-operator/config.toml";

/// Environment variable prefix used by [`EnvStore::operator`].
pub const ENV_PREFIX: &str = "HARBOR_OPERATOR_";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Environment variable store.
///
/// Convention: `HARBOR_OPERATOR_<KEY>` with dashes mapped to underscores,
/// so `registry-encryption-cost` reads `HARBOR_OPERATOR_REGISTRY_ENCRYPTION_COST`.
#[derive(Debug, Clone)]
pub struct EnvStore {
	prefix: String,
}

impl EnvStore {
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
		}
	}

	pub fn operator() -> Self {
		Self::new(ENV_PREFIX)
	}

	pub fn var_name(&self, key: &str) -> String {
		format!("{}{}", self.prefix, key.replace(['-', '.'], "_").to_uppercase())
	}
}

impl ConfigStore for EnvStore {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn get_item_value(&self, key: &str) -> ConfigStoreResult<String> {
		let var = self.var_name(key);
		match std::env::var(&var) {
			Ok(value) if !value.is_empty() => Ok(value),
			Ok(_) | Err(std::env::VarError::NotPresent) => Err(ConfigStoreError::not_found(key)),
			Err(std::env::VarError::NotUnicode(_)) => Err(ConfigStoreError::InvalidValue {
				key: var,
				message: "value is not valid unicode".to_string(),
			}),
		}
	}
}

/// Flat TOML file store, read once at construction.
///
/// ```toml
/// registry-encryption-cost = 3
/// ```
#[derive(Debug, Clone)]
pub struct TomlStore {
	path: PathBuf,
	table: toml::Table,
}

impl TomlStore {
	/// Load `path`. A missing file yields an empty store.
	pub fn load(path: impl Into<PathBuf>) -> ConfigStoreResult<Self> {
		let path = path.into();
		if !path.exists() {
			debug!(path = %path.display(), "config file not found, skipping");
			return Ok(Self {
				path,
				table: toml::Table::new(),
			});
		}

		debug!(path = %path.display(), "loading config file");
		let content = std::fs::read_to_string(&path).map_err(|e| ConfigStoreError::FileRead {
			path: path.clone(),
			source: e,
		})?;

		let table: toml::Table = toml::from_str(&content).map_err(|e| ConfigStoreError::TomlParse {
			path: path.clone(),
			source: e,
		})?;

		trace!(items = table.len(), "parsed config table");
		Ok(Self { path, table })
	}

	pub fn system() -> ConfigStoreResult<Self> {
		Self::load(SYSTEM_CONFIG_PATH)
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl ConfigStore for TomlStore {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn get_item_value(&self, key: &str) -> ConfigStoreResult<String> {
		match self.table.get(key) {
			None => Err(ConfigStoreError::not_found(key)),
			Some(toml::Value::String(s)) => Ok(s.clone()),
			Some(toml::Value::Integer(i)) => Ok(i.to_string()),
			Some(toml::Value::Float(f)) => Ok(f.to_string()),
			Some(toml::Value::Boolean(b)) => Ok(b.to_string()),
			Some(other) => Err(ConfigStoreError::InvalidValue {
				key: key.to_string(),
				message: format!("expected a scalar, found {}", other.type_str()),
			}),
		}
	}

	fn get_item_value_int(&self, key: &str) -> ConfigStoreResult<i64> {
		match self.table.get(key) {
			Some(toml::Value::Integer(i)) => Ok(*i),
			_ => {
				let raw = self.get_item_value(key)?;
				parse_int(key, &raw)
			}
		}
	}
}

/// Stack of stores consulted from highest to lowest precedence.
///
/// A miss falls through to the next layer. Any other error stops the lookup.
pub struct LayeredStore {
	layers: Vec<(Precedence, Box<dyn ConfigStore>)>,
}

impl LayeredStore {
	pub fn new() -> Self {
		Self { layers: Vec::new() }
	}

	pub fn with_layer(mut self, precedence: Precedence, store: impl ConfigStore + 'static) -> Self {
		self.layers.push((precedence, Box::new(store)));
		self.layers.sort_by(|a, b| b.0.cmp(&a.0));
		self
	}

	/// Environment over `config_path` over `defaults`.
	pub fn standard(
		config_path: impl Into<PathBuf>,
		defaults: MemoryStore,
	) -> ConfigStoreResult<Self> {
		Ok(Self::new()
			.with_layer(Precedence::Defaults, defaults)
			.with_layer(Precedence::ConfigFile, TomlStore::load(config_path)?)
			.with_layer(Precedence::Environment, EnvStore::operator()))
	}

	fn lookup<T>(
		&self,
		key: &str,
		get: impl Fn(&dyn ConfigStore) -> ConfigStoreResult<T>,
	) -> ConfigStoreResult<T> {
		for (precedence, store) in &self.layers {
			match get(store.as_ref()) {
				Ok(value) => {
					trace!(key, store = store.name(), ?precedence, "config item resolved");
					return Ok(value);
				}
				Err(e) if e.is_not_found() => continue,
				Err(e) => return Err(e),
			}
		}
		Err(ConfigStoreError::not_found(key))
	}
}

impl Default for LayeredStore {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigStore for LayeredStore {
	fn name(&self) -> &'static str {
		"layered"
	}

	fn get_item_value(&self, key: &str) -> ConfigStoreResult<String> {
		self.lookup(key, |store| store.get_item_value(key))
	}

	fn get_item_value_int(&self, key: &str) -> ConfigStoreResult<i64> {
		self.lookup(key, |store| store.get_item_value_int(key))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use std::sync::Mutex;

	static ENV_MUTEX: Mutex<()> = Mutex::new(());

	/// Run `f` with `vars` set, restoring the previous values afterwards.
	fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> std::thread::Result<R>
	where
		F: FnOnce() -> R + std::panic::UnwindSafe,
	{
		let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
		let original: Vec<_> = vars
			.iter()
			.map(|(k, _)| (*k, std::env::var(*k).ok()))
			.collect();

		for (k, v) in vars {
			std::env::set_var(k, v);
		}

		let result = std::panic::catch_unwind(f);

		for (k, original_val) in &original {
			match original_val {
				Some(v) => std::env::set_var(k, v),
				None => std::env::remove_var(k),
			}
		}

		result
	}

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Environment > Precedence::ConfigFile);
		assert!(Precedence::ConfigFile > Precedence::Defaults);
	}

	#[test]
	fn test_env_var_name_mapping() {
		let store = EnvStore::operator();
		assert_eq!(
			store.var_name("registry-encryption-cost"),
			"HARBOR_OPERATOR_REGISTRY_ENCRYPTION_COST"
		);
	}

	#[test]
	fn test_env_store_reads_variable() {
		let store = EnvStore::new("HARBOR_CONFIG_TEST_ENV_READ_");
		let result = with_env_vars(&[("HARBOR_CONFIG_TEST_ENV_READ_COST", "7")], || {
			(
				store.get_item_value_int("cost").unwrap(),
				store.get_item_value("absent").unwrap_err().is_not_found(),
			)
		});
		assert_eq!(result.unwrap(), (7, true));
		assert!(std::env::var("HARBOR_CONFIG_TEST_ENV_READ_COST").is_err());
	}

	#[test]
	fn test_env_store_treats_empty_as_missing() {
		let store = EnvStore::new("HARBOR_CONFIG_TEST_ENV_EMPTY_");
		let missing = with_env_vars(&[("HARBOR_CONFIG_TEST_ENV_EMPTY_COST", "")], || {
			store.get_item_value_int("cost").unwrap_err().is_not_found()
		});
		assert!(missing.unwrap());
	}

	#[test]
	fn test_toml_store_missing_file_is_empty() {
		let store = TomlStore::load("/nonexistent/harbor-operator.toml").unwrap();
		assert!(store
			.get_item_value_int("registry-encryption-cost")
			.unwrap_err()
			.is_not_found());
	}

	#[test]
	fn test_toml_store_reads_integers_and_strings() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "registry-encryption-cost = 4\nquoted = \"12\"\nlist = [1]").unwrap();

		let store = TomlStore::load(file.path()).unwrap();
		assert_eq!(store.get_item_value_int("registry-encryption-cost").unwrap(), 4);
		assert_eq!(store.get_item_value_int("quoted").unwrap(), 12);
		assert!(matches!(
			store.get_item_value("list").unwrap_err(),
			ConfigStoreError::InvalidValue { .. }
		));
	}

	#[test]
	fn test_toml_store_rejects_malformed_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "registry-encryption-cost = = 4").unwrap();

		let err = TomlStore::load(file.path()).unwrap_err();
		assert!(matches!(err, ConfigStoreError::TomlParse { .. }));
	}

	#[test]
	fn test_layered_store_prefers_higher_precedence() {
		let store = LayeredStore::new()
			.with_layer(Precedence::Defaults, MemoryStore::new().with_item("cost", 1))
			.with_layer(Precedence::ConfigFile, MemoryStore::new().with_item("cost", 2));
		assert_eq!(store.get_item_value_int("cost").unwrap(), 2);
	}

	#[test]
	fn test_layered_store_falls_through_on_miss() {
		let store = LayeredStore::new()
			.with_layer(Precedence::Defaults, MemoryStore::new().with_item("cost", 1))
			.with_layer(Precedence::Environment, MemoryStore::new());
		assert_eq!(store.get_item_value_int("cost").unwrap(), 1);
		assert!(store.get_item_value("other").unwrap_err().is_not_found());
	}

	#[test]
	fn test_layered_store_stops_on_invalid_value() {
		let store = LayeredStore::new()
			.with_layer(Precedence::Defaults, MemoryStore::new().with_item("cost", 1))
			.with_layer(Precedence::Environment, MemoryStore::new().with_item("cost", "abc"));
		assert!(matches!(
			store.get_item_value_int("cost").unwrap_err(),
			ConfigStoreError::InvalidValue { .. }
		));
	}
}
