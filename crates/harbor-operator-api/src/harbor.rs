// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The Harbor parent resource.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

use crate::component::ComponentSpec;
use crate::redis::{DsnError, ExternalRedisSpec, OpacifiedDsn, RedisComponent};
use crate::registry::{RegistryLogLevel, RegistryMiddlewareSpec};
use crate::storage::ImageChartStorageSpec;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Harbor {
	pub metadata: ObjectMeta,
	pub spec: HarborSpec,
}

impl Harbor {
	pub fn name(&self) -> Option<&str> {
		self.metadata.name.as_deref().filter(|n| !n.is_empty())
	}

	pub fn namespace(&self) -> Option<&str> {
		self.metadata.namespace.as_deref().filter(|n| !n.is_empty())
	}
}

impl k8s_openapi::Resource for Harbor {
	const API_VERSION: &'static str = crate::API_VERSION;
	const GROUP: &'static str = crate::GROUP;
	const KIND: &'static str = "Harbor";
	const VERSION: &'static str = crate::VERSION;
	const URL_PATH_SEGMENT: &'static str = "harbors";
	type Scope = k8s_openapi::NamespaceResourceScope;
}

impl k8s_openapi::Metadata for Harbor {
	type Ty = ObjectMeta;

	fn metadata(&self) -> &ObjectMeta {
		&self.metadata
	}

	fn metadata_mut(&mut self) -> &mut ObjectMeta {
		&mut self.metadata
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarborSpec {
	#[serde(default)]
	pub log_level: HarborLogLevel,
	#[serde(default)]
	pub registry: HarborRegistrySpec,
	pub persistence: HarborPersistenceSpec,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub redis: Option<ExternalRedisSpec>,
}

impl HarborSpec {
	/// Resolve the redis connection for `component`.
	pub fn redis_dsn(&self, component: RedisComponent) -> Result<OpacifiedDsn, DsnError> {
		self
			.redis
			.as_ref()
			.ok_or(DsnError::NotConfigured)?
			.dsn(component)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarborRegistrySpec {
	#[serde(flatten)]
	pub component: ComponentSpec,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub storage_middlewares: Vec<RegistryMiddlewareSpec>,
	#[serde(default, rename = "relativeURLs")]
	pub relative_urls: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarborPersistenceSpec {
	pub image_chart_storage: ImageChartStorageSpec,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarborLogLevel {
	Debug,
	#[default]
	Info,
	Warning,
	Error,
	Fatal,
}

impl HarborLogLevel {
	/// The registry has no `fatal` and spells `warning` as `warn`.
	pub fn registry(self) -> RegistryLogLevel {
		match self {
			HarborLogLevel::Debug => RegistryLogLevel::Debug,
			HarborLogLevel::Info => RegistryLogLevel::Info,
			HarborLogLevel::Warning => RegistryLogLevel::Warn,
			HarborLogLevel::Error | HarborLogLevel::Fatal => RegistryLogLevel::Error,
		}
	}
}
