// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Registry authentication and HTTP secrets.

use std::collections::BTreeMap;

use harbor_operator_api::secret::{
	HTPASSWD_FILE_NAME, SECRET_TYPE_HTPASSWD, SECRET_TYPE_SINGLE, SHARED_SECRET_KEY,
};
use harbor_operator_api::Harbor;
use harbor_operator_graph::Context;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use tracing::warn;

use crate::error::{RegistryResult, Stage, StageExt};
use crate::password::{
	hash_password, DEFAULT_ENCRYPTION_COST, REGISTRY_AUTHENTICATION_PASSWORD, REGISTRY_HTTP_SECRET,
};
use crate::reconciler::RegistryReconciler;

/// Configuration store key holding the htpasswd hashing cost.
pub const CONFIG_REGISTRY_ENCRYPTION_COST_KEY: &str = "registry-encryption-cost";

/// User the core component authenticates as against the registry.
pub const REGISTRY_AUTHENTICATION_USERNAME: &str = "harbor_registry_user";

/// Role suffixes of the authentication secret name.
pub const AUTHENTICATION_SECRET_SUFFIXES: [&str; 2] = ["registry", "basicauth"];

/// Role suffixes of the HTTP secret name.
pub const HTTP_SECRET_SUFFIXES: [&str; 2] = ["registry", "http"];

/// The password may be rotated in place.
pub const AUTHENTICATION_SECRET_IMMUTABLE: bool = false;

/// Any change to the HTTP secret must produce a new object.
pub const HTTP_SECRET_IMMUTABLE: bool = true;

impl RegistryReconciler {
	/// Name of the authentication secret for `harbor`.
	pub fn registry_authentication_secret_name(
		&self,
		ctx: &Context,
		harbor: &Harbor,
	) -> RegistryResult<String> {
		let (name, _) = identity(harbor)?;
		Ok(self.normalize_name(ctx, name, &AUTHENTICATION_SECRET_SUFFIXES))
	}

	/// Name of the HTTP secret for `harbor`.
	pub fn registry_http_secret_name(&self, ctx: &Context, harbor: &Harbor) -> RegistryResult<String> {
		let (name, _) = identity(harbor)?;
		Ok(self.normalize_name(ctx, name, &HTTP_SECRET_SUFFIXES))
	}

	/// Generate a fresh htpasswd secret.
	///
	/// It holds the bcrypt hash (for the registry) and the plaintext (for the
	/// core component) of the same password.
	pub fn get_registry_authentication_secret(
		&self,
		ctx: &Context,
		harbor: &Harbor,
	) -> RegistryResult<Secret> {
		let (_, namespace) = identity(harbor)?;
		let name = self.registry_authentication_secret_name(ctx, harbor)?;

		let password = REGISTRY_AUTHENTICATION_PASSWORD
			.generate()
			.stage(Stage::GeneratePassword)?;

		let cost = self.encryption_cost()?;
		let hashed_password = hash_password(&password, cost).stage(Stage::EncryptPassword)?;

		Ok(Secret {
			metadata: ObjectMeta {
				name: Some(name),
				namespace: Some(namespace.to_string()),
				..Default::default()
			},
			immutable: Some(AUTHENTICATION_SECRET_IMMUTABLE),
			type_: Some(SECRET_TYPE_HTPASSWD.to_string()),
			string_data: Some(BTreeMap::from([
				(
					HTPASSWD_FILE_NAME.to_string(),
					format!("{REGISTRY_AUTHENTICATION_USERNAME}:{hashed_password}"),
				),
				(SHARED_SECRET_KEY.to_string(), password.to_exposed()),
			])),
			..Default::default()
		})
	}

	/// Generate a fresh HTTP shared secret.
	pub fn get_registry_http_secret(&self, ctx: &Context, harbor: &Harbor) -> RegistryResult<Secret> {
		let (_, namespace) = identity(harbor)?;
		let name = self.registry_http_secret_name(ctx, harbor)?;

		let secret = REGISTRY_HTTP_SECRET
			.generate()
			.stage(Stage::GenerateSecret)?;

		Ok(Secret {
			metadata: ObjectMeta {
				name: Some(name),
				namespace: Some(namespace.to_string()),
				..Default::default()
			},
			immutable: Some(HTTP_SECRET_IMMUTABLE),
			type_: Some(SECRET_TYPE_SINGLE.to_string()),
			string_data: Some(BTreeMap::from([(
				SHARED_SECRET_KEY.to_string(),
				secret.to_exposed(),
			)])),
			..Default::default()
		})
	}

	/// Hashing cost from the configuration store. Only a missing key falls
	/// back to the default; any other store error is returned.
	fn encryption_cost(&self) -> RegistryResult<i64> {
		match self
			.config_store()
			.get_item_value_int(CONFIG_REGISTRY_ENCRYPTION_COST_KEY)
		{
			Ok(cost) => Ok(cost),
			Err(e) if e.is_not_found() => {
				warn!(
					key = CONFIG_REGISTRY_ENCRYPTION_COST_KEY,
					cost = DEFAULT_ENCRYPTION_COST,
					"encryption cost not configured, using default"
				);
				Ok(i64::from(DEFAULT_ENCRYPTION_COST))
			}
			Err(e) => Err(e).stage(Stage::EncryptionCost),
		}
	}
}

/// Name and namespace of the Harbor instance.
pub(crate) fn identity(harbor: &Harbor) -> RegistryResult<(&str, &str)> {
	let name = harbor
		.name()
		.ok_or(crate::error::RegistryError::MissingIdentity { field: "name" })?;
	let namespace = harbor
		.namespace()
		.ok_or(crate::error::RegistryError::MissingIdentity { field: "namespace" })?;
	Ok((name, namespace))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::RegistryError;
	use crate::password::{verify_password, DIGITS, SYMBOLS};
	use crate::testing::{harbor, reconciler_with_store};
	use harbor_common_config::{ConfigStoreError, MemoryStore};
	use std::sync::Arc;

	fn data(secret: &Secret, key: &str) -> String {
		secret.string_data.as_ref().unwrap()[key].clone()
	}

	fn bcrypt_cost(hash: &str) -> u32 {
		hash.split('$').nth(2).unwrap().parse().unwrap()
	}

	#[test]
	fn test_authentication_secret_shape() {
		let reconciler = reconciler_with_store(Arc::new(MemoryStore::new()));
		let secret = reconciler
			.get_registry_authentication_secret(&Context::new(), &harbor())
			.unwrap();

		assert_eq!(secret.metadata.name.as_deref(), Some("demo-registry-basicauth"));
		assert_eq!(secret.metadata.namespace.as_deref(), Some("ns1"));
		assert_eq!(secret.immutable, Some(false));
		assert_eq!(secret.type_.as_deref(), Some(SECRET_TYPE_HTPASSWD));

		let password = data(&secret, SHARED_SECRET_KEY);
		assert_eq!(password.chars().count(), 32);
		assert!(password.chars().filter(|c| DIGITS.contains(*c)).count() >= 10);
		assert!(password.chars().filter(|c| SYMBOLS.contains(*c)).count() >= 10);

		let htpasswd = data(&secret, HTPASSWD_FILE_NAME);
		let (user, hash) = htpasswd.split_once(':').unwrap();
		assert_eq!(user, REGISTRY_AUTHENTICATION_USERNAME);
		assert!(hash.starts_with("$2"));
		assert_eq!(bcrypt_cost(hash), DEFAULT_ENCRYPTION_COST);
		assert!(verify_password(&password, hash));
	}

	#[test]
	fn test_configured_cost_is_used() {
		let store = MemoryStore::new().with_item(CONFIG_REGISTRY_ENCRYPTION_COST_KEY, 5);
		let reconciler = reconciler_with_store(Arc::new(store));
		let secret = reconciler
			.get_registry_authentication_secret(&Context::new(), &harbor())
			.unwrap();

		let htpasswd = data(&secret, HTPASSWD_FILE_NAME);
		let (_, hash) = htpasswd.split_once(':').unwrap();
		assert_eq!(bcrypt_cost(hash), 5);
		assert!(verify_password(&data(&secret, SHARED_SECRET_KEY), hash));
	}

	#[test]
	fn test_invalid_cost_fails_with_offending_value() {
		for cost in [0, 3, 32] {
			let store = MemoryStore::new().with_item(CONFIG_REGISTRY_ENCRYPTION_COST_KEY, cost);
			let reconciler = reconciler_with_store(Arc::new(store));
			let err = reconciler
				.get_registry_authentication_secret(&Context::new(), &harbor())
				.unwrap_err();

			assert_eq!(err.stages(), vec![Stage::EncryptPassword]);
			match err.root_cause() {
				RegistryError::Hash(crate::password::HashError::InvalidCost { cost: reported, .. }) => {
					assert_eq!(*reported, cost)
				}
				other => panic!("cost {cost} gave {other:?}"),
			}
		}
	}

	#[test]
	fn test_store_error_is_fatal() {
		let store = MemoryStore::new().with_item(CONFIG_REGISTRY_ENCRYPTION_COST_KEY, "ten");
		let reconciler = reconciler_with_store(Arc::new(store));
		let err = reconciler
			.get_registry_authentication_secret(&Context::new(), &harbor())
			.unwrap_err();

		assert_eq!(err.stages(), vec![Stage::EncryptionCost]);
		assert!(matches!(
			err.root_cause(),
			RegistryError::Config(ConfigStoreError::InvalidValue { .. })
		));
	}

	#[test]
	fn test_http_secret_shape() {
		let reconciler = reconciler_with_store(Arc::new(MemoryStore::new()));
		let secret = reconciler
			.get_registry_http_secret(&Context::new(), &harbor())
			.unwrap();

		assert_eq!(secret.metadata.name.as_deref(), Some("demo-registry-http"));
		assert_eq!(secret.immutable, Some(true));
		assert_eq!(secret.type_.as_deref(), Some(SECRET_TYPE_SINGLE));

		let data = secret.string_data.as_ref().unwrap();
		assert_eq!(data.keys().collect::<Vec<_>>(), vec![SHARED_SECRET_KEY]);
		let value = &data[SHARED_SECRET_KEY];
		assert_eq!(value.chars().count(), 128);
		assert!(value.chars().filter(|c| DIGITS.contains(*c)).count() >= 16);
		assert!(value.chars().filter(|c| SYMBOLS.contains(*c)).count() >= 48);
	}

	#[test]
	fn test_names_are_stable_values_are_fresh() {
		let reconciler = reconciler_with_store(Arc::new(MemoryStore::new()));
		let ctx = Context::new();
		let harbor = harbor();

		for get in [
			RegistryReconciler::get_registry_authentication_secret,
			RegistryReconciler::get_registry_http_secret,
		] {
			let a = get(&reconciler, &ctx, &harbor).unwrap();
			let b = get(&reconciler, &ctx, &harbor).unwrap();

			assert_eq!(a.metadata.name, b.metadata.name);
			let a_data = a.string_data.unwrap();
			let b_data = b.string_data.unwrap();
			assert_eq!(
				a_data.keys().collect::<Vec<_>>(),
				b_data.keys().collect::<Vec<_>>()
			);
			assert_ne!(a_data[SHARED_SECRET_KEY], b_data[SHARED_SECRET_KEY]);
		}
	}

	#[test]
	fn test_missing_namespace_is_rejected() {
		let reconciler = reconciler_with_store(Arc::new(MemoryStore::new()));
		let mut harbor = harbor();
		harbor.metadata.namespace = None;

		let err = reconciler
			.get_registry_http_secret(&Context::new(), &harbor)
			.unwrap_err();
		assert!(matches!(
			err,
			RegistryError::MissingIdentity { field: "namespace" }
		));
	}
}
