// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resource graph capability consumed by Harbor component reconcilers.
//!
//! This crate provides:
//! - [`ResourceManager`]: the engine-side "manage this object" capability
//! - [`ResourceHandle`]: opaque reference to a registered node and its edges
//! - [`ManagedObject`]: a serialized object plus its identity
//! - [`InMemoryGraph`]: reference implementation that records nodes and
//!   enforces dependency-before-registration, without any scheduling
//!
//! Reconcilers only compose handles; they never look inside the graph.

mod context;
mod error;
mod manager;
mod memory;
mod object;

pub use context::Context;
pub use error::{GraphError, GraphResult};
pub use manager::{GraphId, NodeId, ResourceHandle, ResourceManager};
pub use memory::{GraphNode, InMemoryGraph};
pub use object::{ManagedObject, ObjectKey};
