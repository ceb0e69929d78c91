// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redis connection descriptors.
//!
//! All Harbor components share one redis; each gets its own database index.
//! The password never appears in a DSN: it stays in a secret and travels as
//! a reference next to the password-free URL.

use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_REDIS_PORT: u16 = 6379;

#[derive(Debug, thiserror::Error)]
pub enum DsnError {
	#[error("no redis configured")]
	NotConfigured,

	#[error("invalid redis url: {0}")]
	InvalidUrl(#[from] url::ParseError),

	#[error("unsupported redis scheme: {scheme}")]
	UnsupportedScheme { scheme: String },

	#[error("redis url has no host")]
	MissingHost,

	#[error("redis url must not embed credentials, use passwordRef")]
	InlineCredentials,
}

/// Database index reserved for each component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedisComponent {
	Core,
	JobService,
	Registry,
	ChartMuseum,
	Clair,
	Trivy,
}

impl RedisComponent {
	pub fn database_index(self) -> u8 {
		match self {
			RedisComponent::Core => 0,
			RedisComponent::JobService => 1,
			RedisComponent::Registry => 2,
			RedisComponent::ChartMuseum => 3,
			RedisComponent::Clair => 4,
			RedisComponent::Trivy => 5,
		}
	}
}

/// Redis declared on the Harbor spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalRedisSpec {
	/// `redis://host[:port]` or `rediss://host[:port]`. Any path is replaced
	/// by the component's database index.
	pub url: String,
	/// Name of the secret holding the redis password.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub password_ref: Option<String>,
}

impl ExternalRedisSpec {
	pub fn dsn(&self, component: RedisComponent) -> Result<OpacifiedDsn, DsnError> {
		let mut url = Url::parse(&self.url)?;

		match url.scheme() {
			"redis" | "rediss" => {}
			other => {
				return Err(DsnError::UnsupportedScheme {
					scheme: other.to_string(),
				})
			}
		}

		if url.host_str().map_or(true, str::is_empty) {
			return Err(DsnError::MissingHost);
		}

		if !url.username().is_empty() || url.password().is_some() {
			return Err(DsnError::InlineCredentials);
		}

		if url.port().is_none() {
			url
				.set_port(Some(DEFAULT_REDIS_PORT))
				.map_err(|_| DsnError::MissingHost)?;
		}
		url.set_path(&format!("/{}", component.database_index()));
		url.set_query(None);
		url.set_fragment(None);

		Ok(OpacifiedDsn {
			dsn: url.to_string(),
			password_ref: self.password_ref.clone(),
		})
	}
}

/// A connection string stripped of its password, plus a reference to the
/// secret holding that password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpacifiedDsn {
	pub dsn: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub password_ref: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn spec(url: &str) -> ExternalRedisSpec {
		ExternalRedisSpec {
			url: url.to_string(),
			password_ref: Some("harbor-redis".to_string()),
		}
	}

	#[test]
	fn test_registry_dsn_uses_database_two() {
		let dsn = spec("redis://redis.harbor.svc:6380/9")
			.dsn(RedisComponent::Registry)
			.unwrap();
		assert_eq!(dsn.dsn, "redis://redis.harbor.svc:6380/2");
		assert_eq!(dsn.password_ref.as_deref(), Some("harbor-redis"));
	}

	#[test]
	fn test_default_port_is_filled_in() {
		let dsn = spec("rediss://redis").dsn(RedisComponent::Core).unwrap();
		assert_eq!(dsn.dsn, "rediss://redis:6379/0");
	}

	#[test]
	fn test_malformed_url_is_rejected() {
		assert!(matches!(
			spec("not a url").dsn(RedisComponent::Registry),
			Err(DsnError::InvalidUrl(_))
		));
	}

	#[test]
	fn test_other_schemes_are_rejected() {
		assert!(matches!(
			spec("http://redis:6379").dsn(RedisComponent::Registry),
			Err(DsnError::UnsupportedScheme { .. })
		));
	}

	#[test]
	fn test_inline_password_is_rejected() {
		assert!(matches!(
			spec("redis://:hunter2@redis:6379").dsn(RedisComponent::Registry),
			Err(DsnError::InlineCredentials)
		));
	}

	proptest! {
		#[test]
		fn test_dsn_never_keeps_caller_path(db in 0u32..64, port in 1u16..) {
			let dsn = spec(&format!("redis://redis:{port}/{db}"))
				.dsn(RedisComponent::Trivy)
				.unwrap();
			prop_assert!(dsn.dsn.ends_with("/5"));
		}
	}
}
