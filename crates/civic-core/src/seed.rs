//! Built-in seed data
//!
//! Used when no seed file is configured. Each call builds fresh values, so
//! callers own their copy and tests can swap in their own fixtures.

use crate::issue::{Issue, Priority, Status};
use crate::overview::CategoryStat;
use crate::report::{Report, ReportStatus};
use serde::{Deserialize, Serialize};

/// Contents of a seed file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub issues: Vec<Issue>,
    pub reports: Vec<Report>,
    pub category_stats: Vec<CategoryStat>,
}

impl Seed {
    pub fn builtin() -> Self {
        Self {
            issues: sample_issues(),
            reports: sample_reports(),
            category_stats: category_stats(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn issue(
    id: u32,
    issue_type: &str,
    location: &str,
    description: &str,
    priority: Priority,
    status: Status,
    reporter: &str,
    assignee: Option<&str>,
    created_at: &str,
    updated_at: &str,
) -> Issue {
    Issue {
        id,
        issue_type: issue_type.to_string(),
        location: location.to_string(),
        description: description.to_string(),
        priority,
        status,
        reporter: reporter.to_string(),
        assignee: assignee.map(str::to_string),
        created_at: created_at.to_string(),
        updated_at: updated_at.to_string(),
    }
}

pub fn sample_issues() -> Vec<Issue> {
    vec![
        issue(
            1,
            "Pothole",
            "Main St & 5th Ave",
            "Large pothole causing traffic issues and potential vehicle damage",
            Priority::Urgent,
            Status::New,
            "John Smith",
            None,
            "2024-01-15 10:30",
            "2024-01-15 10:30",
        ),
        issue(
            2,
            "Street Light",
            "Park Avenue 123",
            "Street light not working, causing safety concerns at night",
            Priority::Medium,
            Status::Progress,
            "Maria Garcia",
            Some("Mike Johnson"),
            "2024-01-14 14:20",
            "2024-01-15 09:15",
        ),
        issue(
            3,
            "Trash Bin",
            "Central Park North",
            "Overflowing trash bin attracting pests",
            Priority::Low,
            Status::Resolved,
            "Sarah Wilson",
            Some("Tom Brown"),
            "2024-01-13 16:45",
            "2024-01-15 08:30",
        ),
        issue(
            4,
            "Water Leak",
            "Oak Street 456",
            "Water main leak flooding the sidewalk",
            Priority::Urgent,
            Status::Progress,
            "David Lee",
            Some("Emergency Crew"),
            "2024-01-15 07:20",
            "2024-01-15 11:45",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn report(
    id: u32,
    title: &str,
    report_type: &str,
    created_by: &str,
    created_at: &str,
    status: ReportStatus,
    category: &str,
    description: &str,
) -> Report {
    Report {
        id,
        title: title.to_string(),
        report_type: report_type.to_string(),
        created_by: created_by.to_string(),
        created_at: created_at.to_string(),
        status,
        category: category.to_string(),
        description: description.to_string(),
    }
}

pub fn sample_reports() -> Vec<Report> {
    vec![
        report(
            1,
            "Monthly Infrastructure Report",
            "Monthly Summary",
            "John Admin",
            "2024-01-15",
            ReportStatus::Completed,
            "Infrastructure",
            "Comprehensive overview of all infrastructure issues resolved in January",
        ),
        report(
            2,
            "Pothole Repair Analysis",
            "Category Report",
            "Sarah Manager",
            "2024-01-14",
            ReportStatus::Completed,
            "Potholes",
            "Detailed analysis of pothole repairs and response times",
        ),
        report(
            3,
            "Street Light Maintenance Report",
            "Category Report",
            "Mike Supervisor",
            "2024-01-13",
            ReportStatus::Processing,
            "Street Lights",
            "Current status and maintenance schedule for street lighting",
        ),
        report(
            4,
            "Weekly Performance Dashboard",
            "Performance Report",
            "Admin System",
            "2024-01-12",
            ReportStatus::Completed,
            "Performance",
            "Key performance indicators and response time metrics",
        ),
        report(
            5,
            "Public Property Damage Assessment",
            "Assessment Report",
            "Lisa Inspector",
            "2024-01-11",
            ReportStatus::Pending,
            "Public Property",
            "Assessment of recent public property damage incidents",
        ),
        report(
            6,
            "Traffic Signal Efficiency Report",
            "Technical Report",
            "Tom Engineer",
            "2024-01-10",
            ReportStatus::Completed,
            "Traffic Signals",
            "Analysis of traffic signal performance and optimization recommendations",
        ),
    ]
}

pub fn category_stats() -> Vec<CategoryStat> {
    [
        ("Potholes", 23, 50),
        ("Street Lights", 12, 30),
        ("Trash Bins", 8, 25),
        ("Graffiti", 15, 35),
    ]
    .into_iter()
    .map(|(name, current, total)| CategoryStat {
        name: name.to_string(),
        current,
        total,
    })
    .collect()
}
