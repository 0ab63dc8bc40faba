//! Token helpers shared by the tube backend.
//!
//! Only RS256 bearer tokens are supported. The HTTP service validates tokens
//! with a public key; signing is available for tooling and tests.

pub mod jwt;

#[cfg(any(test, feature = "test-keys"))]
pub mod test_keys;
