use crate::domain::phone::{format_phone_display, is_valid_phone, normalize_phone};
use crate::rules::{BatchReport, PhoneOutcome, PhoneValidation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneReportDto {
    pub input: String,
    pub canonical: Option<String>,
    pub display: Option<String>,
}

impl PhoneReportDto {
    pub fn from_input(input: &str) -> Self {
        let canonical = normalize_phone(Some(input));
        if canonical.is_empty() {
            return Self {
                input: input.to_string(),
                canonical: None,
                display: None,
            };
        }
        Self {
            input: input.to_string(),
            display: Some(format_phone_display(&canonical)),
            canonical: Some(canonical),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReportDto {
    pub input: String,
    pub policy: PhoneValidation,
    pub valid: bool,
    pub strict: bool,
    pub permissive: bool,
    pub canonical: Option<String>,
}

impl ValidationReportDto {
    pub fn evaluate(input: &str, policy: PhoneValidation) -> Self {
        let canonical = normalize_phone(Some(input));
        let strict = !canonical.is_empty();
        let permissive = is_valid_phone(input);
        let valid = policy.accepts(input);
        Self {
            input: input.to_string(),
            policy,
            valid,
            strict,
            permissive,
            canonical: strict.then_some(canonical),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecordDto {
    pub index: usize,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationSummaryDto {
    pub total: usize,
    pub unchanged: usize,
    pub normalized: usize,
    pub rejected: usize,
    pub missing: usize,
    pub dry_run: bool,
    pub rejected_records: Vec<RejectedRecordDto>,
}

impl MigrationSummaryDto {
    pub fn from_report(report: &BatchReport, dry_run: bool) -> Self {
        Self {
            total: report.changes.len(),
            unchanged: report.count(PhoneOutcome::Unchanged),
            normalized: report.count(PhoneOutcome::Normalized),
            rejected: report.count(PhoneOutcome::Rejected),
            missing: report.count(PhoneOutcome::Missing),
            dry_run,
            rejected_records: report
                .rejected()
                .map(|change| RejectedRecordDto {
                    index: change.index,
                    value: change.original.clone().unwrap_or_default(),
                })
                .collect(),
        }
    }
}
