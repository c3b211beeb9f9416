pub mod application;
pub mod decision;
pub mod outcome;
pub mod validation;

pub use application::{ApplicationId, CreditCardApplication};
pub use decision::Decision;
pub use outcome::{Outcome, Reason};
pub use validation::{License, ServiceInformation, ValidationMode, EXPIRED_LICENSE_KEY};
