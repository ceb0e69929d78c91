// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Registry reconciliation errors.
//!
//! Every failure is wrapped in one [`RegistryError::Stage`] per step it
//! crossed, so the failing path can be read back with
//! [`RegistryError::stages`] instead of matching on messages.

use std::fmt;

use harbor_common_config::ConfigStoreError;
use harbor_operator_api::DsnError;
use harbor_operator_graph::GraphError;

use crate::password::{HashError, PasswordError};

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Step of the registry reconciliation that an error passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
	AuthenticationSecret,
	HttpSecret,
	GetSecret,
	AddSecret,
	GeneratePassword,
	GenerateSecret,
	EncryptionCost,
	EncryptPassword,
	Redis,
	GetRegistry,
	AddRegistry,
}

impl Stage {
	pub fn label(self) -> &'static str {
		match self {
			Stage::AuthenticationSecret => "authentication secret",
			Stage::HttpSecret => "http secret",
			Stage::GetSecret => "cannot get secret",
			Stage::AddSecret => "cannot add secret",
			Stage::GeneratePassword => "cannot generate password",
			Stage::GenerateSecret => "cannot generate secret",
			Stage::EncryptionCost => "cannot get encryption cost",
			Stage::EncryptPassword => "cannot encrypt password",
			Stage::Redis => "redis",
			Stage::GetRegistry => "cannot get registry",
			Stage::AddRegistry => "cannot add basic resource",
		}
	}
}

impl fmt::Display for Stage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
	#[error("{stage}: {source}")]
	Stage {
		stage: Stage,
		#[source]
		source: Box<RegistryError>,
	},

	#[error("harbor has no {field}")]
	MissingIdentity { field: &'static str },

	#[error(transparent)]
	Password(#[from] PasswordError),

	#[error(transparent)]
	Hash(#[from] HashError),

	#[error(transparent)]
	Config(#[from] ConfigStoreError),

	#[error(transparent)]
	Dsn(#[from] DsnError),

	#[error(transparent)]
	Graph(#[from] GraphError),
}

impl RegistryError {
	/// Stages from outermost to innermost.
	pub fn stages(&self) -> Vec<Stage> {
		let mut stages = Vec::new();
		let mut current = self;
		while let RegistryError::Stage { stage, source } = current {
			stages.push(*stage);
			current = source;
		}
		stages
	}

	/// The error underneath every stage wrapper.
	pub fn root_cause(&self) -> &RegistryError {
		match self {
			RegistryError::Stage { source, .. } => source.root_cause(),
			other => other,
		}
	}
}

/// Attach a [`Stage`] to any error convertible into [`RegistryError`].
pub trait StageExt<T> {
	fn stage(self, stage: Stage) -> RegistryResult<T>;
}

impl<T, E> StageExt<T> for Result<T, E>
where
	E: Into<RegistryError>,
{
	fn stage(self, stage: Stage) -> RegistryResult<T> {
		self.map_err(|e| RegistryError::Stage {
			stage,
			source: Box::new(e.into()),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn failing() -> RegistryResult<()> {
		Err(ConfigStoreError::Unavailable("store offline".to_string()))
			.stage(Stage::EncryptionCost)
			.stage(Stage::GetSecret)
			.stage(Stage::AuthenticationSecret)
	}

	#[test]
	fn test_stages_read_outermost_first() {
		let err = failing().unwrap_err();
		assert_eq!(
			err.stages(),
			vec![
				Stage::AuthenticationSecret,
				Stage::GetSecret,
				Stage::EncryptionCost
			]
		);
		assert!(matches!(
			err.root_cause(),
			RegistryError::Config(ConfigStoreError::Unavailable(_))
		));
	}

	#[test]
	fn test_display_joins_the_path() {
		let err = failing().unwrap_err();
		assert_eq!(
			err.to_string(),
			"authentication secret: cannot get secret: cannot get encryption cost: \
			 Configuration store unavailable: store offline"
		);
	}

	#[test]
	fn test_source_chain_is_walkable() {
		let err = failing().unwrap_err();
		let mut depth = 0;
		let mut source: Option<&dyn std::error::Error> = Some(&err);
		while let Some(e) = source {
			depth += 1;
			source = e.source();
		}
		assert_eq!(depth, 4);
	}
}
