//! In-memory trees on both sides of the conversion. `jacoco` mirrors the
//! input report as loaded; `cobertura` is the document that gets written.

pub mod cobertura;
pub mod jacoco;

/// Compute a coverage rate, returning 0.0 when the total is zero.
#[must_use]
pub fn rate(covered: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64
    }
}
