//! Source checkers
//!
//! Each checker turns one evidence item into a [`VerificationResult`]. No
//! checker returns `Err`; fetch failures become messages.
//!
//! [`VerificationResult`]: crate::VerificationResult

pub(crate) mod archive;
pub(crate) mod github;
pub(crate) mod url;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};

/// SHA-256 content hash, lowercase hex
///
/// The bytes are read as UTF-8 with lossy replacement before hashing, so a
/// hash taken over text saved with this function matches the one computed
/// for a file fetched from GitHub.
///
/// # Examples
///
/// ```
/// use evidence_verify::content_hash;
///
/// assert_eq!(
///     content_hash(b"hello"),
///     "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
/// );
/// ```
pub fn content_hash(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// Decode base64 file content as returned by the contents API
///
/// The API wraps the payload at 60 columns; whitespace is dropped first.
pub(crate) fn decode_content(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(compact)
}
