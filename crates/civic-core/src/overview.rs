//! Overview statistics derived from the issue collection

use crate::issue::{Issue, Priority, Status};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Counts shown on the overview stat cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub new: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub urgent: usize,
    /// Distinct assignees across all issues
    pub active_staff: usize,
}

impl DashboardStats {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let count = |status: Status| issues.iter().filter(|i| i.status == status).count();
        let staff: HashSet<&str> = issues.iter().filter_map(|i| i.assignee.as_deref()).collect();

        Self {
            total: issues.len(),
            new: count(Status::New),
            in_progress: count(Status::Progress),
            resolved: count(Status::Resolved),
            urgent: issues.iter().filter(|i| i.priority == Priority::Urgent).count(),
            active_staff: staff.len(),
        }
    }
}

/// The `n` most recently filed issues, newest first
pub fn recent_issues(issues: &[Issue], n: usize) -> Vec<&Issue> {
    issues.iter().rev().take(n).collect()
}

/// Progress of one category toward its workload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub name: String,
    pub current: u32,
    pub total: u32,
}

impl CategoryStat {
    /// `current / total`, clamped to `[0, 1]`; 0 when `total` is 0
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.current as f64 / self.total as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_stats_from_sample() {
        let stats = DashboardStats::from_issues(&seed::sample_issues());
        assert_eq!(
            stats,
            DashboardStats {
                total: 4,
                new: 1,
                in_progress: 2,
                resolved: 1,
                urgent: 2,
                active_staff: 3,
            }
        );
        assert_eq!(DashboardStats::from_issues(&[]), DashboardStats::default());
    }

    #[test]
    fn test_recent_issues_newest_first() {
        let issues = seed::sample_issues();
        let ids: Vec<u32> = recent_issues(&issues, 3).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![4, 3, 2]);
        assert_eq!(recent_issues(&issues, 10).len(), 4);
    }

    #[test]
    fn test_category_ratio() {
        let stat = CategoryStat {
            name: "Potholes".into(),
            current: 23,
            total: 50,
        };
        assert!((stat.ratio() - 0.46).abs() < f64::EPSILON);

        let empty = CategoryStat {
            name: "None".into(),
            current: 3,
            total: 0,
        };
        assert_eq!(empty.ratio(), 0.0);
    }
}
