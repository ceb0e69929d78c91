// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Desired state of the registry component.
//!
//! A [`Registry`] references its credentials by secret name only. The
//! secrets are separate objects, never inlined here.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

use crate::component::ComponentSpec;
use crate::redis::OpacifiedDsn;
use crate::storage::{
	AzureDriverSpec, FileSystemDriverSpec, GcsDriverSpec, OssDriverSpec, S3DriverSpec,
	SwiftDriverSpec,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registry {
	pub metadata: ObjectMeta,
	pub spec: RegistrySpec,
}

impl k8s_openapi::Resource for Registry {
	const API_VERSION: &'static str = crate::API_VERSION;
	const GROUP: &'static str = crate::GROUP;
	const KIND: &'static str = "Registry";
	const VERSION: &'static str = crate::VERSION;
	const URL_PATH_SEGMENT: &'static str = "registries";
	type Scope = k8s_openapi::NamespaceResourceScope;
}

impl k8s_openapi::Metadata for Registry {
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
pub struct RegistrySpec {
	#[serde(flatten)]
	pub component: ComponentSpec,
	#[serde(flatten)]
	pub config: RegistryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
	pub log: RegistryLogSpec,
	pub authentication: RegistryAuthenticationSpec,
	pub validation: RegistryValidationSpec,
	pub middlewares: RegistryMiddlewaresSpec,
	pub http: RegistryHttpSpec,
	pub storage: RegistryStorageSpec,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub redis: Option<RegistryRedisSpec>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryLogLevel {
	Debug,
	#[default]
	Info,
	Warn,
	Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryLogSpec {
	pub access_log: RegistryAccessLogSpec,
	pub level: RegistryLogLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryAccessLogSpec {
	pub disabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryAuthenticationSpec {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub htpasswd: Option<RegistryAuthenticationHtpasswdSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryAuthenticationHtpasswdSpec {
	pub realm: String,
	/// Name of a `goharbor.io/htpasswd` secret.
	pub secret_ref: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryValidationSpec {
	pub disabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryMiddlewaresSpec {
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub storage: Vec<RegistryMiddlewareSpec>,
}

/// A named registry middleware with free-form options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryMiddlewareSpec {
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub options: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryHttpSpec {
	#[serde(default, rename = "relativeURLs")]
	pub relative_urls: bool,
	/// Name of a `goharbor.io/single-secret` secret.
	pub secret_ref: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStorageSpec {
	pub driver: RegistryStorageDriverSpec,
	pub cache: RegistryStorageCacheSpec,
	pub redirect: RegistryStorageRedirectSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegistryStorageDriverSpec {
	FileSystem(FileSystemDriverSpec),
	S3(S3DriverSpec),
	Swift(SwiftDriverSpec),
	Azure(AzureDriverSpec),
	Gcs(GcsDriverSpec),
	Oss(OssDriverSpec),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStorageCacheSpec {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub blobdescriptor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStorageRedirectSpec {
	pub disable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryRedisSpec {
	#[serde(flatten)]
	pub dsn: OpacifiedDsn,
}
