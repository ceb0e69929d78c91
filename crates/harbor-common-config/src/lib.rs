// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tunable-value store for the Harbor operator.
//!
//! Reconcilers read a handful of integer tunables (for example the password
//! hashing cost) through the [`ConfigStore`] trait. A missing key is reported
//! as [`ConfigStoreError::ItemNotFound`] so the caller can substitute its own
//! documented default; every other error is meant to be fatal.
//!
//! Stores:
//! - [`MemoryStore`]: in-process map
//! - [`EnvStore`]: `HARBOR_OPERATOR_*` environment variables
//! - [`TomlStore`]: flat TOML file
//! - [`LayeredStore`]: precedence-ordered stack of the above

pub mod error;
pub mod sources;
pub mod store;

pub use error::{ConfigStoreError, ConfigStoreResult};
pub use sources::{EnvStore, LayeredStore, Precedence, TomlStore, ENV_PREFIX, SYSTEM_CONFIG_PATH};
pub use store::{ConfigStore, MemoryStore};
