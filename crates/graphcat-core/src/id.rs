//! Identifier generation.

use uuid::Uuid;

/// Generate a globally unique identifier for a catalog entity.
///
/// Random 128-bit UUID rendered as a hyphenated string; collision
/// probability over the process lifetime is negligible.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
