//! Key Derivation Module
//!
//! Turns a set of identifying values into one stable cache key. The string
//! forms are sorted before hashing, so argument order never matters.

use std::fmt::Display;

use sha2::{Digest, Sha256};

/// Separator placed between the sorted string forms before hashing.
pub const KEY_DELIMITER: &str = "-";

// == Derive Key ==
/// Derives a cache key from identifying values.
///
/// Every value is rendered with [`Display`], the renderings are sorted
/// ascending, joined with [`KEY_DELIMITER`] and hashed with SHA-256 into a
/// 64-character lowercase hex string.
///
/// No input yields an empty string, which callers must not use as a key.
pub fn derive_key(values: &[&dyn Display]) -> String {
    if values.is_empty() {
        return String::new();
    }

    let mut parts: Vec<String> = values.iter().map(|value| value.to_string()).collect();
    parts.sort();

    let mut hasher = Sha256::new();
    hasher.update(parts.join(KEY_DELIMITER).as_bytes());
    hex::encode(hasher.finalize())
}

/// Derives a cache key from any mix of [`Display`] values.
///
/// ```
/// use view_cache::cache_key;
///
/// assert_eq!(cache_key!("user-42", 3), cache_key!(3, "user-42"));
/// ```
#[macro_export]
macro_rules! cache_key {
    () => {
        $crate::cache::derive_key(&[])
    };
    ($($value:expr),+ $(,)?) => {
        $crate::cache::derive_key(&[$(&$value as &dyn ::std::fmt::Display),+])
    };
}
