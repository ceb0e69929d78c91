// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Registry component of a Harbor instance.
//!
//! [`RegistryReconciler::add_registry_resources`] generates the registry
//! authentication and HTTP secrets, derives the [`Registry`] desired state
//! that references them by name, and registers all three in the resource
//! graph with the registry depending on both secrets.
//!
//! [`Registry`]: harbor_operator_api::Registry

mod error;
mod naming;
mod password;
mod reconciler;
mod secrets;
mod spec;

#[cfg(test)]
mod testing;

pub use error::{RegistryError, RegistryResult, Stage, StageExt};
pub use naming::{DnsLabelNormalizer, NameNormalizer};
pub use password::{
	hash_password, verify_password, HashError, PasswordError, PasswordPolicy,
	DEFAULT_ENCRYPTION_COST, DIGITS, LOWER_LETTERS, MAX_ENCRYPTION_COST, MIN_ENCRYPTION_COST,
	REGISTRY_AUTHENTICATION_PASSWORD, REGISTRY_HTTP_SECRET, SYMBOLS, UPPER_LETTERS,
};
pub use reconciler::{
	RegistryAuthSecret, RegistryHttpSecret, RegistryNode, RegistryReconciler, RegistryResources,
};
pub use secrets::{
	AUTHENTICATION_SECRET_IMMUTABLE, AUTHENTICATION_SECRET_SUFFIXES,
	CONFIG_REGISTRY_ENCRYPTION_COST_KEY, HTTP_SECRET_IMMUTABLE, HTTP_SECRET_SUFFIXES,
	REGISTRY_AUTHENTICATION_USERNAME,
};
pub use spec::{REGISTRY_AUTH_REALM, REGISTRY_BLOB_DESCRIPTOR_CACHE};
