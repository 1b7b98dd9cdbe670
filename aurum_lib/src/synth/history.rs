//! One-year daily close series shaped as an upward-biased random walk.

use aurum_api::types::HistoricalPoint;
use chrono::{Days, NaiveDate};
use rand::Rng;

use super::round_to;

/// Number of days before today included in the series.
pub const HISTORY_DAYS: u64 = 365;
const DEFAULT_START_PRICE: f64 = 2000.0;
/// Distance below the target the walk starts from.
const TARGET_START_OFFSET: f64 = 390.0;
const DAILY_VOLATILITY: f64 = 15.0;
const TREND_STRENGTH: f64 = 1.0;
/// Days before today during which the walk is pulled onto the target.
const BLEND_DAYS: u64 = 5;

/// Generates `HISTORY_DAYS + 1` points, oldest first, ending on `today`.
///
/// With a target, the walk starts 390 below it, is blended towards it over
/// the last few days and the final point is exactly `target`. Without one,
/// it starts at 2000 and is not anchored. Prices are rounded to 2 places.
pub fn synthesize_history<R: Rng + ?Sized>(
    rng: &mut R,
    today: NaiveDate,
    target: Option<f64>,
) -> Vec<HistoricalPoint> {
    let mut price = target.map_or(DEFAULT_START_PRICE, |t| t - TARGET_START_OFFSET);
    let mut points = Vec::with_capacity(HISTORY_DAYS as usize + 1);

    for days_ago in (0..=HISTORY_DAYS).rev() {
        let date = today - Days::new(days_ago);
        let step = (rng.gen::<f64>() - 0.5 + TREND_STRENGTH / DAILY_VOLATILITY) * DAILY_VOLATILITY;
        price += step;

        let point_price = match target {
            Some(t) if days_ago == 0 => {
                price = t;
                t
            }
            Some(t) if days_ago < BLEND_DAYS => {
                price += (t - price) / (days_ago + 1) as f64;
                round_to(price, 2)
            }
            _ => round_to(price, 2),
        };

        points.push(HistoricalPoint {
            date,
            price: point_price,
        });
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn one_point_per_day_ending_today() {
        let points = synthesize_history(&mut StdRng::seed_from_u64(7), today(), Some(2392.5));
        assert_eq!(points.len(), 366);
        assert_eq!(points.last().unwrap().date, today());
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2023, 6, 16).unwrap());
        for pair in points.windows(2) {
            assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
        }
    }

    #[test]
    fn last_point_snaps_to_target() {
        for seed in 0..50 {
            let points = synthesize_history(&mut StdRng::seed_from_u64(seed), today(), Some(2400.12));
            assert_eq!(points.last().unwrap().price, 2400.12);
        }
    }

    #[test]
    fn unrounded_target_kept_verbatim() {
        let points = synthesize_history(&mut StdRng::seed_from_u64(3), today(), Some(2401.23456));
        assert_eq!(points.last().unwrap().price, 2401.23456);
    }

    #[test]
    fn target_sets_start_390_below() {
        let target = 2412.0;
        let points = synthesize_history(&mut StdRng::seed_from_u64(11), today(), Some(target));
        // First step is within [-6.5, 8.5] of the start.
        let start = target - 390.0;
        assert!(
            (start - 6.5..=start + 8.5).contains(&points[0].price),
            "start {}",
            points[0].price
        );
    }

    #[test]
    fn default_start_without_target() {
        let points = synthesize_history(&mut StdRng::seed_from_u64(11), today(), None);
        assert_eq!(points.len(), 366);
        assert!((1993.5..=2008.5).contains(&points[0].price), "start {}", points[0].price);
    }

    #[test]
    fn final_days_approach_target() {
        let target = 2392.5;
        let points = synthesize_history(&mut StdRng::seed_from_u64(5), today(), Some(target));
        let tail = &points[points.len() - 5..];
        let gaps: Vec<f64> = tail.iter().map(|p| (p.price - target).abs()).collect();
        // Blending shrinks the gap every day, give or take one day's step.
        assert!(gaps[3] <= gaps[0] + 2.0 * 8.5);
        assert_eq!(gaps[4], 0.0);
    }

    #[test]
    fn prices_rounded_to_cents() {
        let points = synthesize_history(&mut StdRng::seed_from_u64(9), today(), None);
        for p in &points {
            assert_eq!(p.price, round_to(p.price, 2));
        }
    }

    #[test]
    fn same_seed_same_series() {
        let a = synthesize_history(&mut StdRng::seed_from_u64(21), today(), Some(2392.5));
        let b = synthesize_history(&mut StdRng::seed_from_u64(21), today(), Some(2392.5));
        assert_eq!(a.len(), b.len());
        assert_eq!(a.last().unwrap().price, b.last().unwrap().price);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_share_endpoint() {
        let a = synthesize_history(&mut StdRng::seed_from_u64(1), today(), Some(2392.5));
        let b = synthesize_history(&mut StdRng::seed_from_u64(2), today(), Some(2392.5));
        assert_eq!(a.len(), b.len());
        assert_eq!(a.last().unwrap().price, b.last().unwrap().price);
        assert_ne!(a[100].price, b[100].price);
    }
}
