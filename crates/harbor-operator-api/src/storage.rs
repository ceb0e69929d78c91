// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Image and chart storage backends.
//!
//! Credentials are always references to secrets in the Harbor namespace.

use serde::{Deserialize, Serialize};

use crate::registry::{RegistryStorageDriverSpec, RegistryStorageRedirectSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageChartStorageSpec {
	#[serde(flatten)]
	pub backend: StorageBackend,
	#[serde(default)]
	pub redirect: StorageRedirectSpec,
}

impl ImageChartStorageSpec {
	/// Storage driver configuration for the registry component.
	pub fn registry(&self) -> RegistryStorageDriverSpec {
		match &self.backend {
			StorageBackend::FileSystem(spec) => RegistryStorageDriverSpec::FileSystem(spec.clone()),
			StorageBackend::S3(spec) => RegistryStorageDriverSpec::S3(spec.clone()),
			StorageBackend::Swift(spec) => RegistryStorageDriverSpec::Swift(spec.clone()),
			StorageBackend::Azure(spec) => RegistryStorageDriverSpec::Azure(spec.clone()),
			StorageBackend::Gcs(spec) => RegistryStorageDriverSpec::Gcs(spec.clone()),
			StorageBackend::Oss(spec) => RegistryStorageDriverSpec::Oss(spec.clone()),
		}
	}

	/// Redirect policy for the registry component.
	pub fn registry_redirect(&self) -> RegistryStorageRedirectSpec {
		RegistryStorageRedirectSpec {
			disable: self.redirect.disable,
		}
	}
}

/// Exactly one backend per Harbor instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageBackend {
	FileSystem(FileSystemDriverSpec),
	S3(S3DriverSpec),
	Swift(SwiftDriverSpec),
	Azure(AzureDriverSpec),
	Gcs(GcsDriverSpec),
	Oss(OssDriverSpec),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageRedirectSpec {
	#[serde(default)]
	pub disable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSystemDriverSpec {
	#[serde(default = "default_root_directory")]
	pub root_directory: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_threads: Option<u32>,
}

fn default_root_directory() -> String {
	"/storage".to_string()
}

impl Default for FileSystemDriverSpec {
	fn default() -> Self {
		Self {
			root_directory: default_root_directory(),
			max_threads: None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3DriverSpec {
	pub region: String,
	pub bucket: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub region_endpoint: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub access_key: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub secret_key_ref: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub root_directory: Option<String>,
	#[serde(default)]
	pub encrypt: bool,
	#[serde(default = "default_true")]
	pub secure: bool,
}

impl Default for S3DriverSpec {
	fn default() -> Self {
		Self {
			region: String::new(),
			bucket: String::new(),
			region_endpoint: None,
			access_key: None,
			secret_key_ref: None,
			root_directory: None,
			encrypt: false,
			secure: default_true(),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwiftDriverSpec {
	pub auth_url: String,
	pub username: String,
	pub password_ref: String,
	pub container: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub region: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tenant: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureDriverSpec {
	pub account_name: String,
	pub account_key_ref: String,
	pub container: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcsDriverSpec {
	pub bucket: String,
	pub key_data_ref: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub root_directory: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub chunk_size: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OssDriverSpec {
	pub region: String,
	pub bucket: String,
	pub access_key_id: String,
	pub access_secret_ref: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub endpoint: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub root_directory: Option<String>,
}

fn default_true() -> bool {
	true
}
