// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Registration of the registry objects in the resource graph.

use std::sync::Arc;

use harbor_common_config::ConfigStore;
use harbor_operator_api::Harbor;
use harbor_operator_graph::{Context, ManagedObject, ResourceHandle, ResourceManager};
use tracing::{debug, info, instrument};

use crate::error::{RegistryResult, Stage, StageExt};
use crate::naming::{DnsLabelNormalizer, NameNormalizer};

/// Handle of the registry authentication secret node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryAuthSecret(ResourceHandle);

/// Handle of the registry HTTP secret node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryHttpSecret(ResourceHandle);

/// Handle of the registry component node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryNode(ResourceHandle);

macro_rules! handle_accessors {
	($($ty:ident),*) => {
		$(
			impl $ty {
				pub fn handle(&self) -> &ResourceHandle {
					&self.0
				}

				pub fn into_handle(self) -> ResourceHandle {
					self.0
				}
			}
		)*
	};
}

handle_accessors!(RegistryAuthSecret, RegistryHttpSecret, RegistryNode);

/// Every node registered for one Harbor registry.
#[derive(Debug, Clone)]
pub struct RegistryResources {
	pub authentication_secret: RegistryAuthSecret,
	pub http_secret: RegistryHttpSecret,
	pub registry: RegistryNode,
}

/// Derives the registry objects of a Harbor instance and registers them.
///
/// Holds no per-instance state: one reconciler can serve many Harbor
/// instances concurrently.
pub struct RegistryReconciler {
	graph: Arc<dyn ResourceManager>,
	config_store: Arc<dyn ConfigStore>,
	names: Arc<dyn NameNormalizer>,
}

impl RegistryReconciler {
	pub fn new(graph: Arc<dyn ResourceManager>, config_store: Arc<dyn ConfigStore>) -> Self {
		Self {
			graph,
			config_store,
			names: Arc::new(DnsLabelNormalizer),
		}
	}

	pub fn with_name_normalizer(mut self, names: Arc<dyn NameNormalizer>) -> Self {
		self.names = names;
		self
	}

	pub(crate) fn config_store(&self) -> &dyn ConfigStore {
		self.config_store.as_ref()
	}

	pub(crate) fn normalize_name(&self, ctx: &Context, base: &str, suffixes: &[&str]) -> String {
		self.names.normalize_name(ctx, base, suffixes)
	}

	/// Generate and register the authentication secret.
	pub async fn add_registry_authentication_secret(
		&self,
		ctx: &Context,
		harbor: &Harbor,
	) -> RegistryResult<RegistryAuthSecret> {
		let secret = self
			.get_registry_authentication_secret(ctx, harbor)
			.stage(Stage::GetSecret)?;

		let handle = self
			.graph
			.add_secret_to_manage(ctx, secret)
			.await
			.stage(Stage::AddSecret)?;

		Ok(RegistryAuthSecret(handle))
	}

	/// Generate and register the HTTP secret.
	pub async fn add_registry_http_secret(
		&self,
		ctx: &Context,
		harbor: &Harbor,
	) -> RegistryResult<RegistryHttpSecret> {
		let secret = self
			.get_registry_http_secret(ctx, harbor)
			.stage(Stage::GetSecret)?;

		let handle = self
			.graph
			.add_secret_to_manage(ctx, secret)
			.await
			.stage(Stage::AddSecret)?;

		Ok(RegistryHttpSecret(handle))
	}

	/// Generate both secrets, then register both.
	///
	/// Nothing is registered unless both secrets were generated.
	pub async fn add_registry_configurations(
		&self,
		ctx: &Context,
		harbor: &Harbor,
	) -> RegistryResult<(RegistryAuthSecret, RegistryHttpSecret)> {
		let auth_secret = self
			.get_registry_authentication_secret(ctx, harbor)
			.stage(Stage::GetSecret)
			.stage(Stage::AuthenticationSecret)?;
		let http_secret = self
			.get_registry_http_secret(ctx, harbor)
			.stage(Stage::GetSecret)
			.stage(Stage::HttpSecret)?;
		debug!("generated registry secrets");

		let auth = self
			.graph
			.add_secret_to_manage(ctx, auth_secret)
			.await
			.stage(Stage::AddSecret)
			.stage(Stage::AuthenticationSecret)?;
		let http = self
			.graph
			.add_secret_to_manage(ctx, http_secret)
			.await
			.stage(Stage::AddSecret)
			.stage(Stage::HttpSecret)?;
		debug!(auth = %auth.key(), http = %http.key(), "registered registry secrets");

		Ok((RegistryAuthSecret(auth), RegistryHttpSecret(http)))
	}

	/// Derive the registry spec and register it after both secrets.
	pub async fn add_registry(
		&self,
		ctx: &Context,
		harbor: &Harbor,
		auth_secret: &RegistryAuthSecret,
		http_secret: &RegistryHttpSecret,
	) -> RegistryResult<RegistryNode> {
		let registry = self.get_registry(ctx, harbor).stage(Stage::GetRegistry)?;
		let object = ManagedObject::from_resource(&registry).stage(Stage::AddRegistry)?;

		let handle = self
			.graph
			.add_basic_resource(ctx, object, &[auth_secret.handle(), http_secret.handle()])
			.await
			.stage(Stage::AddRegistry)?;

		Ok(RegistryNode(handle))
	}

	/// Register the registry and its two secrets for `harbor`.
	///
	/// Secrets are generated and registered first; the registry node is only
	/// added once both secret handles exist, and depends on both. The first
	/// failure aborts the pass. Nodes already registered are left to the
	/// engine.
	#[instrument(
		skip_all,
		fields(harbor = harbor.name().unwrap_or_default(), namespace = harbor.namespace().unwrap_or_default())
	)]
	pub async fn add_registry_resources(
		&self,
		ctx: &Context,
		harbor: &Harbor,
	) -> RegistryResult<RegistryResources> {
		let (authentication_secret, http_secret) =
			self.add_registry_configurations(ctx, harbor).await?;

		let registry = self
			.add_registry(ctx, harbor, &authentication_secret, &http_secret)
			.await?;
		info!(registry = %registry.handle().key(), "registered registry");

		Ok(RegistryResources {
			authentication_secret,
			http_secret,
			registry,
		})
	}
}
