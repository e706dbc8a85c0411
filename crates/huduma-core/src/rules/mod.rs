pub mod batch;
pub mod validation;

pub use batch::{classify_phone, normalize_batch, BatchReport, PhoneChange, PhoneOutcome};
pub use validation::PhoneValidation;
