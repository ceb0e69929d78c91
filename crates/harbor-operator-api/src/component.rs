// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{LocalObjectReference, ResourceRequirements, Toleration};
use serde::{Deserialize, Serialize};

/// Sizing and scheduling shared by every Harbor component.
///
/// Copied verbatim from the parent spec into the derived component spec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub replicas: Option<i32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image_pull_policy: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub image_pull_secrets: Vec<LocalObjectReference>,
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub node_selector: BTreeMap<String, String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub tolerations: Vec<Toleration>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub service_account_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub resources: Option<ResourceRequirements>,
}
