// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

use harbor_common_secret::REDACTED;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Serialize;

use crate::error::{GraphError, GraphResult};

/// Identity of an object: what the engine uses to apply it idempotently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey {
	pub api_version: String,
	pub kind: String,
	pub namespace: Option<String>,
	pub name: String,
}

impl ObjectKey {
	pub fn of<R>(namespace: Option<&str>, name: &str) -> Self
	where
		R: k8s_openapi::Resource,
	{
		Self {
			api_version: R::API_VERSION.to_string(),
			kind: R::KIND.to_string(),
			namespace: namespace.map(str::to_string),
			name: name.to_string(),
		}
	}
}

impl fmt::Display for ObjectKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.namespace {
			Some(ns) => write!(f, "{}/{}/{}", self.kind, ns, self.name),
			None => write!(f, "{}/{}", self.kind, self.name),
		}
	}
}

/// An object handed to the engine: identity plus serialized body.
///
/// The body may hold secret data, so `Debug` never prints it.
#[derive(Clone, PartialEq)]
pub struct ManagedObject {
	key: ObjectKey,
	body: serde_json::Value,
}

impl ManagedObject {
	pub fn from_resource<R>(resource: &R) -> GraphResult<Self>
	where
		R: k8s_openapi::Resource + k8s_openapi::Metadata<Ty = ObjectMeta> + Serialize,
	{
		let meta = resource.metadata();
		let name = meta
			.name
			.as_deref()
			.filter(|n| !n.is_empty())
			.ok_or(GraphError::MissingName { kind: R::KIND })?;
		let key = ObjectKey::of::<R>(meta.namespace.as_deref(), name);

		let mut body = serde_json::to_value(resource).map_err(|e| GraphError::Serialize {
			kind: R::KIND,
			source: e,
		})?;
		if let Some(fields) = body.as_object_mut() {
			fields
				.entry("apiVersion")
				.or_insert_with(|| R::API_VERSION.into());
			fields.entry("kind").or_insert_with(|| R::KIND.into());
		}

		Ok(Self { key, body })
	}

	pub fn key(&self) -> &ObjectKey {
		&self.key
	}

	/// The serialized object. Treat as sensitive when the kind is `Secret`.
	pub fn body(&self) -> &serde_json::Value {
		&self.body
	}
}

impl fmt::Debug for ManagedObject {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ManagedObject")
			.field("key", &self.key)
			.field("body", &REDACTED)
			.finish()
	}
}
