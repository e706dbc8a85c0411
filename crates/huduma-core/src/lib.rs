pub mod domain;
pub mod dto;
pub mod error;
pub mod rules;
pub mod time;

pub use domain::*;
pub use dto::*;
pub use error::CoreError;
pub use rules::*;
pub use time::TimeParseError;
