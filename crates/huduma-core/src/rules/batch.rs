use serde::{Deserialize, Serialize};

use crate::domain::phone::normalize_phone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneOutcome {
    /// Already canonical.
    Unchanged,
    /// Repaired into a different canonical value.
    Normalized,
    /// Present but not recoverable; callers keep the original value.
    Rejected,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneChange {
    pub index: usize,
    pub original: Option<String>,
    pub canonical: Option<String>,
    pub outcome: PhoneOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub changes: Vec<PhoneChange>,
}

impl BatchReport {
    pub fn count(&self, outcome: PhoneOutcome) -> usize {
        self.changes
            .iter()
            .filter(|change| change.outcome == outcome)
            .count()
    }

    pub fn rejected(&self) -> impl Iterator<Item = &PhoneChange> {
        self.changes
            .iter()
            .filter(|change| change.outcome == PhoneOutcome::Rejected)
    }
}

pub fn classify_phone(raw: Option<&str>) -> (PhoneOutcome, Option<String>) {
    match raw {
        None => (PhoneOutcome::Missing, None),
        Some(value) if value.trim().is_empty() => (PhoneOutcome::Missing, None),
        Some(value) => {
            let canonical = normalize_phone(Some(value));
            if canonical.is_empty() {
                (PhoneOutcome::Rejected, None)
            } else if canonical == value {
                (PhoneOutcome::Unchanged, Some(canonical))
            } else {
                (PhoneOutcome::Normalized, Some(canonical))
            }
        }
    }
}

/// Normalizes every value independently; the report keeps input order.
pub fn normalize_batch<'a, I>(values: I) -> BatchReport
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let changes = values
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let (outcome, canonical) = classify_phone(raw);
            PhoneChange {
                index,
                original: raw.map(str::to_string),
                canonical,
                outcome,
            }
        })
        .collect();
    BatchReport { changes }
}
