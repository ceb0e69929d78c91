// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::object::ObjectKey;

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while registering objects in the graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
	#[error("resource already managed: {key}")]
	DuplicateResource { key: ObjectKey },

	#[error("dependency is not registered in this graph: {key}")]
	UnknownDependency { key: ObjectKey },

	#[error("{kind} has no name")]
	MissingName { kind: &'static str },

	#[error("cannot serialize {kind}: {source}")]
	Serialize {
		kind: &'static str,
		#[source]
		source: serde_json::Error,
	},

	#[error("reconciliation cancelled")]
	Cancelled,

	#[error("graph engine error: {message}")]
	Engine { message: String },
}
