// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `goharbor.io/v1alpha2` resource schema used by the operator.
//!
//! - [`Harbor`]: the top-level declarative description of a Harbor instance
//! - [`Registry`]: the derived desired state of the registry component
//! - secret classification and well-known keys shared by producers and
//!   consumers of generated secrets
//! - redis DSN resolution for components backed by the shared redis

pub mod component;
pub mod harbor;
pub mod redis;
pub mod registry;
pub mod secret;
pub mod storage;

pub use component::ComponentSpec;
pub use harbor::{Harbor, HarborLogLevel, HarborPersistenceSpec, HarborRegistrySpec, HarborSpec};
pub use redis::{DsnError, ExternalRedisSpec, OpacifiedDsn, RedisComponent};
pub use registry::{
	Registry, RegistryAccessLogSpec, RegistryAuthenticationHtpasswdSpec, RegistryAuthenticationSpec,
	RegistryConfig, RegistryHttpSpec, RegistryLogLevel, RegistryLogSpec, RegistryMiddlewareSpec,
	RegistryMiddlewaresSpec, RegistryRedisSpec, RegistrySpec, RegistryStorageCacheSpec,
	RegistryStorageDriverSpec, RegistryStorageRedirectSpec, RegistryStorageSpec,
	RegistryValidationSpec,
};
pub use storage::{
	AzureDriverSpec, FileSystemDriverSpec, GcsDriverSpec, ImageChartStorageSpec, OssDriverSpec,
	S3DriverSpec, StorageBackend, StorageRedirectSpec, SwiftDriverSpec,
};

/// API group of every custom resource in this crate.
pub const GROUP: &str = "goharbor.io";

/// API version of every custom resource in this crate.
pub const VERSION: &str = "v1alpha2";

/// `group/version` string.
pub const API_VERSION: &str = "goharbor.io/v1alpha2";
