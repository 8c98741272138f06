//! Short identifier generation.
//!
//! Generated identifiers are drawn from a collision-resistant random source;
//! uniqueness against live records is still checked by the caller, because
//! the store offers no conditional write.

use base64::Engine as _;

/// Length of random bytes before base64 encoding.
///
/// 6 bytes encode to exactly 8 URL-safe characters with no padding, giving
/// 48 bits of entropy per identifier.
const ID_LENGTH_BYTES: usize = 6;

/// Generates a random short identifier.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a fixed 8-character identifier.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_id() -> String {
    let mut buffer = [0u8; ID_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}
