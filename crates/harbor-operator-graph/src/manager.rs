// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;

use crate::context::Context;
use crate::error::GraphResult;
use crate::object::{ManagedObject, ObjectKey};

/// Identifies one graph instance, so handles cannot cross graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphId(u64);

impl GraphId {
	pub fn generate() -> Self {
		static NEXT: AtomicU64 = AtomicU64::new(1);
		Self(NEXT.fetch_add(1, Ordering::Relaxed))
	}
}

/// Position of a node within its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Opaque reference to a registered node.
///
/// Callers pass handles back as dependencies of later nodes. Only the engine
/// that issued a handle can resolve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
	graph: GraphId,
	node: NodeId,
	key: ObjectKey,
	dependencies: Vec<ObjectKey>,
}

impl ResourceHandle {
	pub fn new(graph: GraphId, node: NodeId, key: ObjectKey, dependencies: Vec<ObjectKey>) -> Self {
		Self {
			graph,
			node,
			key,
			dependencies,
		}
	}

	pub fn graph(&self) -> GraphId {
		self.graph
	}

	pub fn node(&self) -> NodeId {
		self.node
	}

	pub fn key(&self) -> &ObjectKey {
		&self.key
	}

	/// Objects that must be applied before this one.
	pub fn dependencies(&self) -> &[ObjectKey] {
		&self.dependencies
	}

	pub fn depends_on(&self, other: &ResourceHandle) -> bool {
		self.dependencies.contains(&other.key)
	}
}

/// Engine capability for registering desired-state objects.
///
/// Implementations own ordering and idempotent re-application; callers only
/// declare what depends on what.
#[async_trait]
pub trait ResourceManager: Send + Sync {
	/// Manage a secret. Secrets have no dependencies.
	async fn add_secret_to_manage(&self, ctx: &Context, secret: Secret)
		-> GraphResult<ResourceHandle>;

	/// Manage an object that must be applied after every handle in
	/// `dependencies`. Each dependency must already be registered.
	async fn add_basic_resource(
		&self,
		ctx: &Context,
		object: ManagedObject,
		dependencies: &[&ResourceHandle],
	) -> GraphResult<ResourceHandle>;
}
