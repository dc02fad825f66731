//! Issue data model for civic
//!
//! Field names follow the seed data format (camelCase, `type` for the
//! category label). Timestamps are display strings and are never parsed.

use serde::{Deserialize, Serialize};

/// Issue status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    New,
    Progress,
    Resolved,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::New, Status::Progress, Status::Resolved];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::Progress => "progress",
            Status::Resolved => "resolved",
        }
    }

    /// Human label used by selectors ("In Progress" rather than "progress")
    pub fn label(&self) -> &'static str {
        match self {
            Status::New => "New",
            Status::Progress => "In Progress",
            Status::Resolved => "Resolved",
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Status::Resolved)
    }
}

impl std::str::FromStr for Status {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Status::New),
            "progress" => Ok(Status::Progress),
            "resolved" => Ok(Status::Resolved),
            _ => Err(crate::Error::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Urgent, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Urgent => "Urgent",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "urgent" => Ok(Priority::Urgent),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(crate::Error::InvalidPriority(s.to_string())),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reported municipal problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Unique identifier
    pub id: u32,

    /// Category label, e.g. "Pothole"
    #[serde(rename = "type")]
    pub issue_type: String,

    /// Street address or landmark
    pub location: String,

    pub description: String,

    pub priority: Priority,

    pub status: Status,

    /// Who reported the issue
    pub reporter: String,

    /// Crew or staff member handling it; `None` means unassigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    pub created_at: String,

    pub updated_at: String,
}

impl Issue {
    /// Whether `query_lower` (already lowercased) occurs in the type,
    /// location or description. An empty query always matches.
    pub fn mentions(&self, query_lower: &str) -> bool {
        self.issue_type.to_lowercase().contains(query_lower)
            || self.location.to_lowercase().contains(query_lower)
            || self.description.to_lowercase().contains(query_lower)
    }

    /// Mark as resolved, stamping the update time
    pub fn resolve(&mut self, now: String) {
        self.status = Status::Resolved;
        self.updated_at = now;
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} [{}] [{}] {} - {}",
            self.id, self.priority, self.status, self.issue_type, self.location
        )
    }
}

/// Fields supplied by the user when filing a new issue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDraft {
    #[serde(rename = "type")]
    pub issue_type: String,
    pub location: String,
    pub description: String,
    pub priority: Priority,
    pub reporter: String,
    #[serde(default)]
    pub assignee: Option<String>,
}

impl IssueDraft {
    /// Build an issue from this draft. Status starts at `new`.
    pub fn into_issue(self, id: u32, now: String) -> Issue {
        let assignee = self
            .assignee
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        Issue {
            id,
            issue_type: self.issue_type.trim().to_string(),
            location: self.location,
            description: self.description,
            priority: self.priority,
            status: Status::New,
            reporter: self.reporter,
            assignee,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
