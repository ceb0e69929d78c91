// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret classification and well-known data keys.
//!
//! Consumers reference generated secrets by name and read these keys; they
//! never inspect the content to find out what a secret holds.

/// Secret holding an htpasswd file plus the plaintext password it was built from.
pub const SECRET_TYPE_HTPASSWD: &str = "goharbor.io/htpasswd";

/// Secret holding a single shared value.
pub const SECRET_TYPE_SINGLE: &str = "goharbor.io/single-secret";

/// Key of the htpasswd file content (`<user>:<hash>`).
pub const HTPASSWD_FILE_NAME: &str = "htpasswd";

/// Key of a plaintext shared secret or password.
pub const SHARED_SECRET_KEY: &str = "secret";
