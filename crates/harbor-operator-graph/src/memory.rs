// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use tracing::debug;

use crate::context::Context;
use crate::error::{GraphError, GraphResult};
use crate::manager::{GraphId, NodeId, ResourceHandle, ResourceManager};
use crate::object::ManagedObject;

/// A registered object and the handle issued for it.
#[derive(Debug, Clone)]
pub struct GraphNode {
	pub handle: ResourceHandle,
	pub object: ManagedObject,
}

/// Graph that records registrations in memory.
///
/// It rejects duplicate objects and dependencies it did not issue, and keeps
/// nodes in registration order. Walking and applying the graph is left to
/// whoever consumes [`InMemoryGraph::nodes`].
#[derive(Debug)]
pub struct InMemoryGraph {
	id: GraphId,
	nodes: Mutex<Vec<GraphNode>>,
}

impl Default for InMemoryGraph {
	fn default() -> Self {
		Self::new()
	}
}

impl InMemoryGraph {
	pub fn new() -> Self {
		Self {
			id: GraphId::generate(),
			nodes: Mutex::new(Vec::new()),
		}
	}

	pub fn id(&self) -> GraphId {
		self.id
	}

	/// Snapshot of every node, in registration order.
	pub fn nodes(&self) -> Vec<GraphNode> {
		self.lock().clone()
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.lock().is_empty()
	}

	fn lock(&self) -> MutexGuard<'_, Vec<GraphNode>> {
		match self.nodes.lock() {
			Ok(nodes) => nodes,
			Err(poisoned) => poisoned.into_inner(),
		}
	}

	fn insert(
		&self,
		ctx: &Context,
		object: ManagedObject,
		dependencies: &[&ResourceHandle],
	) -> GraphResult<ResourceHandle> {
		if ctx.is_cancelled() {
			return Err(GraphError::Cancelled);
		}

		let mut nodes = self.lock();

		for dependency in dependencies {
			let registered = dependency.graph() == self.id
				&& nodes
					.get(dependency.node().0)
					.is_some_and(|n| n.handle.key() == dependency.key());
			if !registered {
				return Err(GraphError::UnknownDependency {
					key: dependency.key().clone(),
				});
			}
		}

		if nodes.iter().any(|n| n.object.key() == object.key()) {
			return Err(GraphError::DuplicateResource {
				key: object.key().clone(),
			});
		}

		let handle = ResourceHandle::new(
			self.id,
			NodeId(nodes.len()),
			object.key().clone(),
			dependencies.iter().map(|d| d.key().clone()).collect(),
		);
		debug!(
			node = %handle.node(),
			key = %handle.key(),
			dependencies = handle.dependencies().len(),
			"registered graph node"
		);
		nodes.push(GraphNode {
			handle: handle.clone(),
			object,
		});

		Ok(handle)
	}
}

#[async_trait]
impl ResourceManager for InMemoryGraph {
	async fn add_secret_to_manage(
		&self,
		ctx: &Context,
		secret: Secret,
	) -> GraphResult<ResourceHandle> {
		let object = ManagedObject::from_resource(&secret)?;
		self.insert(ctx, object, &[])
	}

	async fn add_basic_resource(
		&self,
		ctx: &Context,
		object: ManagedObject,
		dependencies: &[&ResourceHandle],
	) -> GraphResult<ResourceHandle> {
		self.insert(ctx, object, dependencies)
	}
}
