//! Daily close series types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily close. `date` serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub price: f64,
}
