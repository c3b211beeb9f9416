pub mod loader;
pub mod report;

pub use loader::{load_applications, parse_applications, LoadError};
pub use report::{evaluate_all, EvaluationReport};
