pub mod allow_list;
pub mod mock;
pub mod traits;

pub use allow_list::AllowListValidator;
pub use mock::MockValidator;
pub use traits::{FrequentFlyerNumberValidator, ValidatorError};
