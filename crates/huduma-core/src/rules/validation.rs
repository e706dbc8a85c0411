use serde::{Deserialize, Serialize};

use crate::domain::phone::{is_valid_phone, normalize_phone};

/// Which phone check gates a submission.
///
/// The admin forms historically used the digit-count check while the client
/// app required a normalizable number; both are kept until one is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneValidation {
    #[default]
    Strict,
    Permissive,
}

impl PhoneValidation {
    pub const fn as_str(self) -> &'static str {
        match self {
            PhoneValidation::Strict => "strict",
            PhoneValidation::Permissive => "permissive",
        }
    }

    pub fn accepts(self, raw: &str) -> bool {
        match self {
            PhoneValidation::Strict => !normalize_phone(Some(raw)).is_empty(),
            PhoneValidation::Permissive => is_valid_phone(raw),
        }
    }
}
