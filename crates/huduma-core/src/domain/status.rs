use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const DEFAULT_BADGE_CLASS: &str = "bg-gray-100 text-gray-800";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeStatus {
    Pending,
    Confirmed,
    Accepted,
    InProgress,
    Completed,
    Active,
    Approved,
    Verified,
    Cancelled,
    Rejected,
    Declined,
    Failed,
    Inactive,
    Suspended,
}

impl BadgeStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            BadgeStatus::Pending => "pending",
            BadgeStatus::Confirmed => "confirmed",
            BadgeStatus::Accepted => "accepted",
            BadgeStatus::InProgress => "in_progress",
            BadgeStatus::Completed => "completed",
            BadgeStatus::Active => "active",
            BadgeStatus::Approved => "approved",
            BadgeStatus::Verified => "verified",
            BadgeStatus::Cancelled => "cancelled",
            BadgeStatus::Rejected => "rejected",
            BadgeStatus::Declined => "declined",
            BadgeStatus::Failed => "failed",
            BadgeStatus::Inactive => "inactive",
            BadgeStatus::Suspended => "suspended",
        }
    }

    /// Parses a status key as produced by [`normalize_status_key`].
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(BadgeStatus::Pending),
            "confirmed" => Some(BadgeStatus::Confirmed),
            "accepted" => Some(BadgeStatus::Accepted),
            "in_progress" => Some(BadgeStatus::InProgress),
            "completed" => Some(BadgeStatus::Completed),
            "active" => Some(BadgeStatus::Active),
            "approved" => Some(BadgeStatus::Approved),
            "verified" => Some(BadgeStatus::Verified),
            "cancelled" | "canceled" => Some(BadgeStatus::Cancelled),
            "rejected" => Some(BadgeStatus::Rejected),
            "declined" => Some(BadgeStatus::Declined),
            "failed" => Some(BadgeStatus::Failed),
            "inactive" => Some(BadgeStatus::Inactive),
            "suspended" => Some(BadgeStatus::Suspended),
            _ => None,
        }
    }

    pub const fn badge_class(self) -> &'static str {
        match self {
            BadgeStatus::Pending => "bg-yellow-100 text-yellow-800",
            BadgeStatus::Confirmed | BadgeStatus::Accepted => "bg-blue-100 text-blue-800",
            BadgeStatus::InProgress => "bg-indigo-100 text-indigo-800",
            BadgeStatus::Completed
            | BadgeStatus::Active
            | BadgeStatus::Approved
            | BadgeStatus::Verified => "bg-green-100 text-green-800",
            BadgeStatus::Cancelled
            | BadgeStatus::Rejected
            | BadgeStatus::Declined
            | BadgeStatus::Failed => "bg-red-100 text-red-800",
            BadgeStatus::Inactive | BadgeStatus::Suspended => DEFAULT_BADGE_CLASS,
        }
    }

    pub const fn all() -> &'static [BadgeStatus] {
        &[
            BadgeStatus::Pending,
            BadgeStatus::Confirmed,
            BadgeStatus::Accepted,
            BadgeStatus::InProgress,
            BadgeStatus::Completed,
            BadgeStatus::Active,
            BadgeStatus::Approved,
            BadgeStatus::Verified,
            BadgeStatus::Cancelled,
            BadgeStatus::Rejected,
            BadgeStatus::Declined,
            BadgeStatus::Failed,
            BadgeStatus::Inactive,
            BadgeStatus::Suspended,
        ]
    }
}

/// Lowercases and folds `-`/`_`/whitespace runs into a single `_` so
/// `In Progress`, `in-progress` and `IN_PROGRESS` share one key. Separators
/// at either end are dropped.
pub fn normalize_status_key(raw: &str) -> Result<String, CoreError> {
    let key = raw
        .split(|ch: char| ch.is_whitespace() || ch == '-' || ch == '_')
        .filter(|segment| !segment.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_");
    if key.is_empty() {
        return Err(CoreError::EmptyStatus);
    }
    Ok(key)
}

/// Badge class for a status string. Unknown or empty statuses get
/// [`DEFAULT_BADGE_CLASS`].
pub fn status_badge_class(status: &str) -> &'static str {
    normalize_status_key(status)
        .ok()
        .and_then(|key| BadgeStatus::parse(&key))
        .map_or(DEFAULT_BADGE_CLASS, BadgeStatus::badge_class)
}

/// Static badge table with configured overrides layered on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusStyles {
    default_class: String,
    overrides: BTreeMap<String, String>,
}

impl Default for StatusStyles {
    fn default() -> Self {
        Self {
            default_class: DEFAULT_BADGE_CLASS.to_string(),
            overrides: BTreeMap::new(),
        }
    }
}

impl StatusStyles {
    /// `overrides` keys must already be normalized with [`normalize_status_key`].
    pub fn new(default_class: impl Into<String>, overrides: BTreeMap<String, String>) -> Self {
        Self {
            default_class: default_class.into(),
            overrides,
        }
    }

    pub fn default_class(&self) -> &str {
        &self.default_class
    }

    pub fn overrides(&self) -> &BTreeMap<String, String> {
        &self.overrides
    }

    pub fn resolve(&self, status: &str) -> &str {
        let Ok(key) = normalize_status_key(status) else {
            return &self.default_class;
        };
        if let Some(class) = self.overrides.get(&key) {
            return class;
        }
        match BadgeStatus::parse(&key) {
            Some(known) => known.badge_class(),
            None => &self.default_class,
        }
    }
}
