//! Spot quote types returned by the price endpoint.

use serde::{Deserialize, Serialize};

/// Grams in one troy ounce.
pub const TROY_OUNCE_GRAMS: f64 = 31.1034768;

/// One point-in-time market snapshot for a metal/currency pair.
///
/// Field names match the provider payload. Only `price` is required when
/// deserializing; every other field defaults to zero or empty so that a
/// sparse live payload is passed through rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Quote time, epoch seconds.
    #[serde(default)]
    pub timestamp: i64,

    /// Metal code, e.g. "XAU".
    #[serde(default)]
    pub metal: String,

    /// Quote currency, e.g. "USD".
    #[serde(default)]
    pub currency: String,

    #[serde(default)]
    pub exchange: String,

    #[serde(default)]
    pub symbol: String,

    #[serde(default)]
    pub prev_close_price: f64,

    #[serde(default)]
    pub open_price: f64,

    #[serde(default)]
    pub low_price: f64,

    #[serde(default)]
    pub high_price: f64,

    /// Session open, epoch seconds.
    #[serde(default)]
    pub open_time: i64,

    /// Current price per troy ounce.
    pub price: f64,

    /// Absolute change against the previous close.
    #[serde(default)]
    pub ch: f64,

    /// Percentage change against the previous close.
    #[serde(default)]
    pub chp: f64,

    #[serde(default)]
    pub ask: f64,

    #[serde(default)]
    pub bid: f64,

    #[serde(default)]
    pub price_gram_24k: f64,

    #[serde(default)]
    pub price_gram_22k: f64,

    #[serde(default)]
    pub price_gram_21k: f64,

    #[serde(default)]
    pub price_gram_20k: f64,

    #[serde(default)]
    pub price_gram_18k: f64,
}

impl Quote {
    /// Direction of the move against the previous close, derived from `ch`.
    pub fn change_direction(&self) -> ChangeDirection {
        if self.ch > 0.0 {
            ChangeDirection::Up
        } else if self.ch < 0.0 {
            ChangeDirection::Down
        } else {
            ChangeDirection::Flat
        }
    }

    /// Per-gram price for the given fineness.
    pub fn gram_price(&self, karat: Karat) -> f64 {
        match karat {
            Karat::K24 => self.price_gram_24k,
            Karat::K22 => self.price_gram_22k,
            Karat::K21 => self.price_gram_21k,
            Karat::K20 => self.price_gram_20k,
            Karat::K18 => self.price_gram_18k,
        }
    }
}

/// Direction of a price move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Up,
    Down,
    Flat,
}

/// Gold fineness, from pure (24k) down to 18k.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Karat {
    #[serde(rename = "24k")]
    K24,
    #[serde(rename = "22k")]
    K22,
    #[serde(rename = "21k")]
    K21,
    #[serde(rename = "20k")]
    K20,
    #[serde(rename = "18k")]
    K18,
}

impl Karat {
    /// All finenesses, purest first.
    pub const ALL: [Karat; 5] = [Karat::K24, Karat::K22, Karat::K21, Karat::K20, Karat::K18];

    /// Fraction of pure gold relative to 24k.
    pub fn purity_factor(self) -> f64 {
        match self {
            Karat::K24 => 1.0,
            Karat::K22 => 0.916,
            Karat::K21 => 0.875,
            Karat::K20 => 0.833,
            Karat::K18 => 0.750,
        }
    }
}

impl std::fmt::Display for Karat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Karat::K24 => "24K",
                Karat::K22 => "22K",
                Karat::K21 => "21K",
                Karat::K20 => "20K",
                Karat::K18 => "18K",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purity_factors_strictly_decrease() {
        let factors: Vec<f64> = Karat::ALL.iter().map(|k| k.purity_factor()).collect();
        assert!(factors.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn sparse_payload_defaults_missing_fields() {
        let quote: Quote = serde_json::from_str(r#"{"price": 2401.5}"#).unwrap();
        assert_eq!(quote.price, 2401.5);
        assert_eq!(quote.ch, 0.0);
        assert!(quote.metal.is_empty());
        assert_eq!(quote.change_direction(), ChangeDirection::Flat);
    }

    #[test]
    fn missing_price_is_rejected() {
        let result: Result<Quote, _> = serde_json::from_str(r#"{"metal": "XAU"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn change_direction_follows_ch() {
        let mut quote: Quote = serde_json::from_str(r#"{"price": 1.0, "ch": -0.4}"#).unwrap();
        assert_eq!(quote.change_direction(), ChangeDirection::Down);
        quote.ch = 3.2;
        assert_eq!(quote.change_direction(), ChangeDirection::Up);
    }

    #[test]
    fn karat_display() {
        assert_eq!(Karat::K24.to_string(), "24K");
        assert_eq!(Karat::K18.to_string(), "18K");
    }
}
