// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Password generation policies and htpasswd hashing.

use bcrypt::BcryptError;
use harbor_common_secret::SensitiveString;
use rand::rngs::{OsRng, StdRng};
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng, SeedableRng};

/// Hashing cost used when the configuration store has no value.
pub const DEFAULT_ENCRYPTION_COST: u32 = 10;

/// Lowest bcrypt cost.
pub const MIN_ENCRYPTION_COST: u32 = 4;

/// Highest bcrypt cost.
pub const MAX_ENCRYPTION_COST: u32 = 31;

pub const LOWER_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPER_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "~!@#$%^&*()_+`-={}|[]\\:\"<>?,./";

/// Registry basic-auth password. Hashed before it is handed to the registry.
pub const REGISTRY_AUTHENTICATION_PASSWORD: PasswordPolicy = PasswordPolicy {
	length: 32,
	digits: 10,
	symbols: 10,
	no_upper: false,
	allow_repeat: true,
};

/// Registry HTTP shared secret. Machine-to-machine only, stored as is.
pub const REGISTRY_HTTP_SECRET: PasswordPolicy = PasswordPolicy {
	length: 128,
	digits: 16,
	symbols: 48,
	no_upper: false,
	allow_repeat: true,
};

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
	#[error("{digits} digits and {symbols} symbols do not fit in {length} characters")]
	ClassesExceedLength {
		length: usize,
		digits: usize,
		symbols: usize,
	},

	#[error("{requested} {class} requested without repeats, only {available} available")]
	ExceedsAvailable {
		class: &'static str,
		requested: usize,
		available: usize,
	},

	#[error("entropy source unavailable: {0}")]
	Entropy(#[from] rand::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum HashError {
	#[error("invalid encryption cost {cost}: {message}")]
	InvalidCost { cost: i64, message: String },

	#[error("password hashing failed: {message}")]
	Hash { message: String },
}

/// Shape of a generated password.
///
/// Exactly `digits` digits and `symbols` symbols are placed at random
/// positions; the rest are letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
	pub length: usize,
	pub digits: usize,
	pub symbols: usize,
	pub no_upper: bool,
	pub allow_repeat: bool,
}

impl PasswordPolicy {
	/// Generate a password from a CSPRNG seeded by the operating system.
	pub fn generate(&self) -> Result<SensitiveString, PasswordError> {
		let mut rng = StdRng::from_rng(OsRng)?;
		self.generate_with(&mut rng)
	}

	pub fn generate_with<R>(&self, rng: &mut R) -> Result<SensitiveString, PasswordError>
	where
		R: Rng + CryptoRng,
	{
		let letters_len = self
			.length
			.checked_sub(self.digits + self.symbols)
			.ok_or(PasswordError::ClassesExceedLength {
				length: self.length,
				digits: self.digits,
				symbols: self.symbols,
			})?;

		let letters = if self.no_upper {
			LOWER_LETTERS.to_string()
		} else {
			format!("{LOWER_LETTERS}{UPPER_LETTERS}")
		};

		let mut chars = Vec::with_capacity(self.length);
		self.draw(rng, "letters", &letters, letters_len, &mut chars)?;
		self.draw(rng, "digits", DIGITS, self.digits, &mut chars)?;
		self.draw(rng, "symbols", SYMBOLS, self.symbols, &mut chars)?;
		chars.shuffle(rng);

		Ok(SensitiveString::new(chars.into_iter().collect()))
	}

	fn draw<R>(
		&self,
		rng: &mut R,
		class: &'static str,
		charset: &str,
		count: usize,
		out: &mut Vec<char>,
	) -> Result<(), PasswordError>
	where
		R: Rng + CryptoRng,
	{
		let pool: Vec<char> = charset.chars().collect();

		if self.allow_repeat {
			for _ in 0..count {
				out.push(pool[rng.gen_range(0..pool.len())]);
			}
			return Ok(());
		}

		if count > pool.len() {
			return Err(PasswordError::ExceedsAvailable {
				class,
				requested: count,
				available: pool.len(),
			});
		}
		out.extend(pool.choose_multiple(rng, count).copied());
		Ok(())
	}
}

/// Hash `password` with bcrypt at `cost`, as the registry htpasswd
/// authenticator expects.
///
/// Returns a modular crypt string (`$2b$<cost>$<salt><hash>`). Costs outside
/// [`MIN_ENCRYPTION_COST`]..=[`MAX_ENCRYPTION_COST`] are rejected.
pub fn hash_password(password: &SensitiveString, cost: i64) -> Result<String, HashError> {
	let invalid_cost = || HashError::InvalidCost {
		cost,
		message: format!("must be between {MIN_ENCRYPTION_COST} and {MAX_ENCRYPTION_COST}"),
	};

	let rounds = u32::try_from(cost)
		.ok()
		.filter(|r| (MIN_ENCRYPTION_COST..=MAX_ENCRYPTION_COST).contains(r))
		.ok_or_else(invalid_cost)?;

	bcrypt::hash(password.expose(), rounds).map_err(|e| match e {
		BcryptError::CostNotAllowed(_) => invalid_cost(),
		other => HashError::Hash {
			message: other.to_string(),
		},
	})
}

/// Check `password` against a hash produced by [`hash_password`].
pub fn verify_password(password: &str, hash: &str) -> bool {
	bcrypt::verify(password, hash).unwrap_or(false)
}
