mod surname;
mod traits;

pub use surname::{SurnameFraudLookup, DEFAULT_FLAGGED_SURNAME};
pub use traits::FraudLookup;
