// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Deterministic object names derived from the Harbor name and role suffixes.

use harbor_operator_graph::Context;
use sha2::{Digest, Sha256};

const MAX_NAME_LENGTH: usize = 63;

/// Digest bytes appended to shortened names.
const DIGEST_BYTES: usize = 4;

/// Maps a base name plus role suffixes to an object name.
///
/// Must be a pure function of its inputs: secrets are looked up again on
/// every pass by the name this returns.
pub trait NameNormalizer: Send + Sync {
	fn normalize_name(&self, ctx: &Context, base: &str, suffixes: &[&str]) -> String;
}

/// Joins the parts with `-` and reduces the result to a DNS label.
///
/// - lower-cases ASCII letters
/// - maps every other character outside `[a-z0-9-]` to `-`
/// - trims leading and trailing dashes
///
/// Names longer than 63 characters keep their suffixes: the base is cut
/// short and followed by the first hex digits of the SHA-256 of the full
/// name, so distinct inputs keep distinct names.
#[derive(Debug, Clone, Copy, Default)]
pub struct DnsLabelNormalizer;

impl NameNormalizer for DnsLabelNormalizer {
	fn normalize_name(&self, _ctx: &Context, base: &str, suffixes: &[&str]) -> String {
		let full = sanitize(
			&std::iter::once(base)
				.chain(suffixes.iter().copied())
				.collect::<Vec<_>>()
				.join("-"),
		);
		if full.len() <= MAX_NAME_LENGTH {
			return full;
		}

		let digest = hex::encode(&Sha256::digest(full.as_bytes())[..DIGEST_BYTES]);
		let suffix = sanitize(&suffixes.join("-"));
		let tail = if suffix.is_empty() {
			digest
		} else {
			format!("{digest}-{suffix}")
		};

		let budget = MAX_NAME_LENGTH.saturating_sub(tail.len() + 1);
		let head = sanitize(base);
		let head = head[..head.len().min(budget)].trim_end_matches('-');

		let name = if head.is_empty() {
			tail
		} else {
			format!("{head}-{tail}")
		};
		name[..name.len().min(MAX_NAME_LENGTH)]
			.trim_end_matches('-')
			.to_string()
	}
}

fn sanitize(raw: &str) -> String {
	let mapped: String = raw
		.chars()
		.map(|c| {
			let c = c.to_ascii_lowercase();
			if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
				c
			} else {
				'-'
			}
		})
		.collect();
	mapped.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn normalize(base: &str, suffixes: &[&str]) -> String {
		DnsLabelNormalizer.normalize_name(&Context::new(), base, suffixes)
	}

	#[test]
	fn test_joins_suffixes() {
		assert_eq!(normalize("demo", &["registry", "basicauth"]), "demo-registry-basicauth");
		assert_eq!(normalize("demo", &["registry", "http"]), "demo-registry-http");
		assert_eq!(normalize("demo", &[]), "demo");
	}

	#[test]
	fn test_sanitizes_invalid_characters() {
		assert_eq!(normalize("My_Harbor.prod", &["registry"]), "my-harbor-prod-registry");
		assert_eq!(normalize("-edge-", &[]), "edge");
	}

	#[test]
	fn test_long_names_keep_their_suffixes() {
		let base = "a".repeat(80);
		let http = normalize(&base, &["registry", "http"]);
		let auth = normalize(&base, &["registry", "basicauth"]);
		let registry = normalize(&base, &[]);

		assert_eq!(http.len(), 63);
		assert!(http.ends_with("-registry-http"));
		assert!(auth.ends_with("-registry-basicauth"));
		assert!(registry.len() <= 63);
		assert_ne!(auth, http);
		assert_ne!(auth, registry);
		assert_ne!(http, registry);
	}

	#[test]
	fn test_long_bases_sharing_a_prefix_differ() {
		let a = format!("{}-one", "h".repeat(70));
		let b = format!("{}-two", "h".repeat(70));
		assert_ne!(normalize(&a, &["registry", "http"]), normalize(&b, &["registry", "http"]));
	}

	#[test]
	fn test_short_names_are_unchanged_by_digest() {
		let base = "a".repeat(44);
		assert_eq!(
			normalize(&base, &["registry", "basicauth"]),
			format!("{base}-registry-basicauth")
		);
	}

	proptest! {
		#[test]
		fn test_output_is_dns_label(base in "[a-zA-Z0-9._-]{1,80}") {
			let name = normalize(&base, &["registry", "basicauth"]);
			prop_assert!(name.len() <= 63);
			prop_assert!(name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
			prop_assert!(!name.starts_with('-'));
			prop_assert!(!name.ends_with('-'));
		}

		#[test]
		fn test_role_names_stay_distinct(base in "[a-z0-9][a-z0-9-]{0,119}") {
			let auth = normalize(&base, &["registry", "basicauth"]);
			let http = normalize(&base, &["registry", "http"]);
			let registry = normalize(&base, &[]);
			prop_assert_ne!(&auth, &http);
			prop_assert_ne!(&auth, &registry);
			prop_assert_ne!(&http, &registry);
		}

		#[test]
		fn test_is_deterministic(base in "[a-z0-9]{1,40}") {
			prop_assert_eq!(
				normalize(&base, &["registry", "http"]),
				normalize(&base, &["registry", "http"])
			);
		}
	}
}
