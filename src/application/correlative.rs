use uuid::Uuid;

const CORRELATIVE_PREFIX: &str = "VEN-";
const CORRELATIVE_RANDOM_LEN: usize = 12;

/// Produces a candidate human-readable sale reference, e.g. `VEN-3F2A9C10B4D7`.
///
/// The random part comes from a UUIDv4, not wall-clock time, so two requests
/// in the same millisecond do not collide. Uniqueness is still enforced by
/// the unique index on `sales.correlative`; on a conflict the caller retries
/// with a fresh candidate.
pub fn next_correlative() -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!(
        "{}{}",
        CORRELATIVE_PREFIX,
        raw[..CORRELATIVE_RANDOM_LEN].to_ascii_uppercase()
    )
}
