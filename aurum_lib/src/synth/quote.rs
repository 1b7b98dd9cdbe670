//! Pseudo-live spot quote generator.

use aurum_api::types::{Karat, Quote, TROY_OUNCE_GRAMS};
use chrono::{DateTime, Utc};
use rand::Rng;

use super::round_to;

const BASE_PRICE: f64 = 2392.50;
/// Uniform offset range applied to [`BASE_PRICE`].
const OFFSET_MIN: f64 = -1.5;
const OFFSET_MAX: f64 = 2.5;
const PREV_CLOSE: f64 = 2380.00;
const OPEN_PRICE: f64 = 2385.20;
const LOW_PRICE: f64 = 2378.50;
const HIGH_PRICE: f64 = 2405.10;
const HALF_SPREAD: f64 = 0.30;
/// Session open is reported four hours before the quote time.
const SESSION_AGE_SECS: i64 = 14_400;

/// Builds one XAU/USD quote around a fixed baseline.
///
/// Price fields are rounded to 2 places and gram prices to 4. Every derived
/// field is computed from the already-rounded price, so `ch`, `chp`, the
/// spread and the gram prices agree exactly with the returned `price`.
pub fn synthesize_quote<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Quote {
    let price = round_to(BASE_PRICE + rng.gen_range(OFFSET_MIN..OFFSET_MAX), 2);
    let ch = round_to(price - PREV_CLOSE, 2);
    let chp = round_to(ch / PREV_CLOSE * 100.0, 2);
    let gram_24k = round_to(price / TROY_OUNCE_GRAMS, 4);
    let gram = |karat: Karat| round_to(gram_24k * karat.purity_factor(), 4);
    let timestamp = now.timestamp();

    Quote {
        timestamp,
        metal: "XAU".to_string(),
        currency: "USD".to_string(),
        exchange: "FOREX".to_string(),
        symbol: "FOREX:XAUUSD".to_string(),
        prev_close_price: PREV_CLOSE,
        open_price: OPEN_PRICE,
        low_price: LOW_PRICE,
        high_price: HIGH_PRICE,
        open_time: timestamp - SESSION_AGE_SECS,
        price,
        ch,
        chp,
        ask: round_to(price + HALF_SPREAD, 2),
        bid: round_to(price - HALF_SPREAD, 2),
        price_gram_24k: gram_24k,
        price_gram_22k: gram(Karat::K22),
        price_gram_21k: gram(Karat::K21),
        price_gram_20k: gram(Karat::K20),
        price_gram_18k: gram(Karat::K18),
    }
}
