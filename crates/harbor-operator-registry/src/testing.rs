// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fixtures shared by the unit tests of this crate.

use std::sync::Arc;

use harbor_common_config::ConfigStore;
use harbor_operator_api::{
	ExternalRedisSpec, FileSystemDriverSpec, Harbor, HarborLogLevel, HarborPersistenceSpec,
	HarborRegistrySpec, HarborSpec, ImageChartStorageSpec, RegistryMiddlewareSpec,
	StorageBackend, StorageRedirectSpec,
};
use harbor_operator_graph::InMemoryGraph;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::reconciler::RegistryReconciler;

/// Harbor `demo` in namespace `ns1` backed by filesystem storage.
pub(crate) fn harbor() -> Harbor {
	Harbor {
		metadata: ObjectMeta {
			name: Some("demo".to_string()),
			namespace: Some("ns1".to_string()),
			..Default::default()
		},
		spec: HarborSpec {
			log_level: HarborLogLevel::Info,
			registry: HarborRegistrySpec {
				storage_middlewares: vec![RegistryMiddlewareSpec {
					name: "cloudfront".to_string(),
					options: None,
				}],
				..Default::default()
			},
			persistence: HarborPersistenceSpec {
				image_chart_storage: ImageChartStorageSpec {
					backend: StorageBackend::FileSystem(FileSystemDriverSpec::default()),
					redirect: StorageRedirectSpec::default(),
				},
			},
			redis: Some(ExternalRedisSpec {
				url: "redis://redis.ns1.svc:6379".to_string(),
				password_ref: Some("demo-redis".to_string()),
			}),
		},
	}
}

pub(crate) fn reconciler_with_store(store: Arc<dyn ConfigStore>) -> RegistryReconciler {
	RegistryReconciler::new(Arc::new(InMemoryGraph::new()), store)
}
