//! Generated report records
//!
//! Reports are display-only: nothing filters or mutates them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Completed,
    Pending,
    Processing,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Completed => "completed",
            ReportStatus::Pending => "pending",
            ReportStatus::Processing => "processing",
        }
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(ReportStatus::Completed),
            "pending" => Ok(ReportStatus::Pending),
            "processing" => Ok(ReportStatus::Processing),
            _ => Err(crate::Error::InvalidReportStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated document summarizing issue activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: u32,
    pub title: String,
    /// Report kind, e.g. "Monthly Summary"
    #[serde(rename = "type")]
    pub report_type: String,
    pub created_by: String,
    /// Display date (`YYYY-MM-DD`)
    pub created_at: String,
    pub status: ReportStatus,
    pub category: String,
    pub description: String,
}
