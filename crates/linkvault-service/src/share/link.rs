//! Share identifier generation.

use uuid::Uuid;

/// Generates a fresh share identifier.
///
/// UUIDv4 draws 122 bits from the OS CSPRNG, so collisions among live
/// links and guessing attacks are both negligible.
pub fn generate_share_id() -> String {
    Uuid::new_v4().to_string()
}
