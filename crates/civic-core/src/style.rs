//! Badge style mapping
//!
//! Maps status and priority values to an abstract style tag. Renderers pick
//! the concrete colors; this table only decides which values share a look.

use crate::{Priority, ReportStatus, Status};
use serde::Serialize;

/// Which kind of value a badge shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    Status,
    Priority,
    ReportStatus,
}

impl std::str::FromStr for BadgeKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "status" => Ok(BadgeKind::Status),
            "priority" => Ok(BadgeKind::Priority),
            "report" | "report-status" => Ok(BadgeKind::ReportStatus),
            _ => Err(crate::Error::InvalidBadgeKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StyleTag {
    #[serde(rename = "new-style")]
    New,
    #[serde(rename = "progress-style")]
    Progress,
    #[serde(rename = "resolved-style")]
    Resolved,
    #[serde(rename = "urgent-style")]
    Urgent,
    #[serde(rename = "neutral-style")]
    Neutral,
}

impl StyleTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleTag::New => "new-style",
            StyleTag::Progress => "progress-style",
            StyleTag::Resolved => "resolved-style",
            StyleTag::Urgent => "urgent-style",
            StyleTag::Neutral => "neutral-style",
        }
    }
}

impl std::fmt::Display for StyleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Status> for StyleTag {
    fn from(status: Status) -> Self {
        match status {
            Status::New => StyleTag::New,
            Status::Progress => StyleTag::Progress,
            Status::Resolved => StyleTag::Resolved,
        }
    }
}

impl From<Priority> for StyleTag {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Urgent => StyleTag::Urgent,
            // medium shares the in-progress look
            Priority::Medium => StyleTag::Progress,
            Priority::Low => StyleTag::Neutral,
        }
    }
}

impl From<ReportStatus> for StyleTag {
    fn from(status: ReportStatus) -> Self {
        match status {
            ReportStatus::Completed => StyleTag::Resolved,
            ReportStatus::Processing => StyleTag::Progress,
            ReportStatus::Pending => StyleTag::New,
        }
    }
}

/// Style tag for `value` of the given kind; unknown values are neutral
pub fn style_for(kind: BadgeKind, value: &str) -> StyleTag {
    match kind {
        BadgeKind::Status => value.parse::<Status>().map_or(StyleTag::Neutral, StyleTag::from),
        BadgeKind::Priority => value
            .parse::<Priority>()
            .map_or(StyleTag::Neutral, StyleTag::from),
        BadgeKind::ReportStatus => value
            .parse::<ReportStatus>()
            .map_or(StyleTag::Neutral, StyleTag::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tags() {
        assert_eq!(style_for(BadgeKind::Status, "new"), StyleTag::New);
        assert_eq!(style_for(BadgeKind::Status, "progress"), StyleTag::Progress);
        assert_eq!(style_for(BadgeKind::Status, "resolved"), StyleTag::Resolved);
        assert_eq!(style_for(BadgeKind::Status, "archived"), StyleTag::Neutral);
    }

    #[test]
    fn test_priority_tags() {
        assert_eq!(style_for(BadgeKind::Priority, "urgent"), StyleTag::Urgent);
        assert_eq!(style_for(BadgeKind::Priority, "medium"), StyleTag::Progress);
        assert_eq!(style_for(BadgeKind::Priority, "low"), StyleTag::Neutral);
        assert_eq!(style_for(BadgeKind::Priority, "new"), StyleTag::Neutral);
    }

    #[test]
    fn test_report_status_tags() {
        assert_eq!(style_for(BadgeKind::ReportStatus, "completed"), StyleTag::Resolved);
        assert_eq!(style_for(BadgeKind::ReportStatus, "processing"), StyleTag::Progress);
        assert_eq!(style_for(BadgeKind::ReportStatus, "pending"), StyleTag::New);
        assert_eq!(style_for(BadgeKind::ReportStatus, "failed"), StyleTag::Neutral);
    }

    #[test]
    fn test_typed_values_agree_with_strings() {
        for status in Status::ALL {
            assert_eq!(StyleTag::from(status), style_for(BadgeKind::Status, status.as_str()));
        }
        for priority in Priority::ALL {
            assert_eq!(
                StyleTag::from(priority),
                style_for(BadgeKind::Priority, priority.as_str())
            );
        }
        assert_eq!(StyleTag::from(ReportStatus::Pending), StyleTag::New);
    }

    #[test]
    fn test_values_are_case_sensitive() {
        assert_eq!(style_for(BadgeKind::Status, "New"), StyleTag::Neutral);
        assert_eq!(style_for(BadgeKind::ReportStatus, "Completed"), StyleTag::Neutral);
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(StyleTag::Progress.to_string(), "progress-style");
        assert_eq!(
            serde_json::to_string(&StyleTag::Neutral).unwrap(),
            "\"neutral-style\""
        );
    }
}
