// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration store error types.

use std::path::PathBuf;

pub type ConfigStoreResult<T> = Result<T, ConfigStoreError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigStoreError {
	/// No store layer knows the key. Callers may substitute a default.
	#[error("Configuration item not found: {key}")]
	ItemNotFound { key: String },

	#[error("Invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },

	#[error("Failed to parse TOML config at {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to read config file {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Configuration store unavailable: {0}")]
	Unavailable(String),
}

impl ConfigStoreError {
	pub fn not_found(key: impl Into<String>) -> Self {
		Self::ItemNotFound { key: key.into() }
	}

	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::ItemNotFound { .. })
	}
}
