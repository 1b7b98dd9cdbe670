//! Synthetic market data used when the live endpoint is unavailable.
//!
//! Both generators take the random source as a parameter so callers can
//! substitute a seeded `StdRng` and get reproducible output.

pub mod history;
pub mod quote;

pub use history::synthesize_history;
pub use quote::synthesize_quote;

/// Rounds half away from zero to `places` decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_two_places() {
        assert_eq!(round_to(2392.456, 2), 2392.46);
        assert_eq!(round_to(-0.004, 2), 0.0);
        assert_eq!(round_to(12.5, 0), 13.0);
    }

    #[test]
    fn round_to_four_places() {
        assert_eq!(round_to(76.9212349, 4), 76.9212);
    }
}
