// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use tokio_util::sync::CancellationToken;

/// Execution context of one reconciliation pass.
///
/// Reconcilers pass it through to the naming and graph capabilities without
/// acting on it; only engine-side I/O observes cancellation.
#[derive(Debug, Clone, Default)]
pub struct Context {
	cancellation: CancellationToken,
}

impl Context {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_cancellation(cancellation: CancellationToken) -> Self {
		Self { cancellation }
	}

	pub fn cancellation(&self) -> &CancellationToken {
		&self.cancellation
	}

	pub fn is_cancelled(&self) -> bool {
		self.cancellation.is_cancelled()
	}
}
