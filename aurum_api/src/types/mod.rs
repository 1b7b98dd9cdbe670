mod history;
pub use self::history::HistoricalPoint;

mod quote;
pub use self::quote::{ChangeDirection, Karat, Quote, TROY_OUNCE_GRAMS};
