//! Random alias generation.

use crate::domain::entities::GENERATED_ALIAS_LEN;
use base64::Engine as _;

/// Random bytes drawn per alias. Encodes to 8 base64 characters, of which the
/// first [`GENERATED_ALIAS_LEN`] are kept.
const ALIAS_ENTROPY_BYTES: usize = 6;

/// Generates a random URL-safe alias of [`GENERATED_ALIAS_LEN`] characters.
///
/// Uses `getrandom` for entropy and URL-safe base64 without padding.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_alias() -> String {
    let mut buffer = [0u8; ALIAS_ENTROPY_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    let mut alias = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer);
    alias.truncate(GENERATED_ALIAS_LEN);
    alias
}
