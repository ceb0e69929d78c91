// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redacting wrapper for generated credential material.
//!
//! Passwords and shared secrets produced by the operator live in a
//! [`Sensitive<T>`] from the moment they are generated until they are written
//! into the object handed to the reconciliation engine. While wrapped they:
//!
//! - render as `[REDACTED]` through `Debug`, `Display` and `Serialize`
//! - are zeroized when dropped
//! - can only be read through an explicit [`Sensitive::expose`] call
//!
//! ```
//! use harbor_common_secret::Sensitive;
//!
//! let password = Sensitive::new("hunter2".to_string());
//! assert_eq!(format!("{password}"), "[REDACTED]");
//! assert_eq!(password.expose(), "hunter2");
//! ```

use std::fmt;
use zeroize::Zeroize;

/// Placeholder printed in place of any wrapped value.
pub const REDACTED: &str = "[REDACTED]";

/// A value that must never reach logs, debug output or serialized dumps.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Sensitive<T>
where
	T: Zeroize,
{
	inner: T,
}

/// Generated passwords and tokens are always strings.
pub type SensitiveString = Sensitive<String>;

impl<T> Sensitive<T>
where
	T: Zeroize,
{
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Read the wrapped value. Every call site is a place where the value may
	/// leave the wrapper, so keep them few and obvious.
	pub fn expose(&self) -> &T {
		&self.inner
	}

	/// Copy the wrapped value out. The wrapper keeps its own copy so that it
	/// is still zeroized on drop.
	pub fn to_exposed(&self) -> T
	where
		T: Clone,
	{
		self.inner.clone()
	}
}

impl SensitiveString {
	/// Length in bytes of the wrapped string.
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl<T> Clone for Sensitive<T>
where
	T: Zeroize + Clone,
{
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T> fmt::Debug for Sensitive<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Sensitive").field(&REDACTED).finish()
	}
}

impl<T> fmt::Display for Sensitive<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T> PartialEq for Sensitive<T>
where
	T: Zeroize + PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T> Eq for Sensitive<T> where T: Zeroize + Eq {}

impl From<String> for SensitiveString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

#[cfg(feature = "serde")]
mod serde_impl {
	use super::{Sensitive, REDACTED};
	use serde::{Serialize, Serializer};
	use zeroize::Zeroize;

	// Deliberately no Deserialize: generated material is never read back.
	impl<T> Serialize for Sensitive<T>
	where
		T: Zeroize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			serializer.serialize_str(REDACTED)
		}
	}
}
