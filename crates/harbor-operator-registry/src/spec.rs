// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Registry component desired state.

use harbor_operator_api::{
	Harbor, RedisComponent, Registry, RegistryAccessLogSpec, RegistryAuthenticationHtpasswdSpec,
	RegistryAuthenticationSpec, RegistryConfig, RegistryHttpSpec, RegistryLogSpec,
	RegistryMiddlewaresSpec, RegistryRedisSpec, RegistrySpec, RegistryStorageCacheSpec,
	RegistryStorageSpec, RegistryValidationSpec,
};
use harbor_operator_graph::Context;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::error::{RegistryResult, Stage, StageExt};
use crate::reconciler::RegistryReconciler;
use crate::secrets::identity;

/// htpasswd realm announced by the registry.
pub const REGISTRY_AUTH_REALM: &str = "harbor-registry-basic-realm";

/// Blob descriptor cache backend. The registry shares Harbor's redis.
pub const REGISTRY_BLOB_DESCRIPTOR_CACHE: &str = "redis";

impl RegistryReconciler {
	/// Derive the registry spec for `harbor`.
	///
	/// Secrets are referenced by the names the secret builders use; no
	/// secret value is read or embedded.
	pub fn get_registry(&self, ctx: &Context, harbor: &Harbor) -> RegistryResult<Registry> {
		let (name, namespace) = identity(harbor)?;
		let registry_name = self.normalize_name(ctx, name, &[]);

		let authentication_secret_name = self.registry_authentication_secret_name(ctx, harbor)?;
		let http_secret_name = self.registry_http_secret_name(ctx, harbor)?;

		let redis_dsn = harbor
			.spec
			.redis_dsn(RedisComponent::Registry)
			.stage(Stage::Redis)?;

		let storage = &harbor.spec.persistence.image_chart_storage;

		Ok(Registry {
			metadata: ObjectMeta {
				name: Some(registry_name),
				namespace: Some(namespace.to_string()),
				..Default::default()
			},
			spec: RegistrySpec {
				component: harbor.spec.registry.component.clone(),
				config: RegistryConfig {
					log: RegistryLogSpec {
						access_log: RegistryAccessLogSpec { disabled: false },
						level: harbor.spec.log_level.registry(),
					},
					authentication: RegistryAuthenticationSpec {
						htpasswd: Some(RegistryAuthenticationHtpasswdSpec {
							realm: REGISTRY_AUTH_REALM.to_string(),
							secret_ref: authentication_secret_name,
						}),
					},
					validation: RegistryValidationSpec { disabled: true },
					middlewares: RegistryMiddlewaresSpec {
						storage: harbor.spec.registry.storage_middlewares.clone(),
					},
					http: RegistryHttpSpec {
						relative_urls: harbor.spec.registry.relative_urls,
						secret_ref: http_secret_name,
					},
					storage: RegistryStorageSpec {
						driver: storage.registry(),
						cache: RegistryStorageCacheSpec {
							blobdescriptor: Some(REGISTRY_BLOB_DESCRIPTOR_CACHE.to_string()),
						},
						redirect: storage.registry_redirect(),
					},
					redis: Some(RegistryRedisSpec { dsn: redis_dsn }),
				},
			},
		})
	}
}
