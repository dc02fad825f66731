//! Issue filter engine
//!
//! Free-text search over type/location/description combined with a status
//! selector and a priority selector. All three must hold. The result keeps
//! the input order.

use crate::issue::{Issue, Priority, Status};
use std::fmt;
use std::str::FromStr;

/// Selector value for a categorical filter
///
/// Parsed from the same strings the selectors emit: `"all"` or one of the
/// canonical enum values. Anything else is kept as `Unmatched` and matches
/// no issue at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector<T> {
    #[default]
    All,
    Only(T),
    Unmatched(String),
}

impl<T: FromStr> Selector<T> {
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            return Selector::All;
        }
        match value.parse::<T>() {
            Ok(v) => Selector::Only(v),
            Err(_) => Selector::Unmatched(value.to_string()),
        }
    }
}

impl<T: PartialEq> Selector<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(v) => v == value,
            Selector::Unmatched(_) => false,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str("all"),
            Selector::Only(v) => write!(f, "{}", v),
            Selector::Unmatched(raw) => f.write_str(raw),
        }
    }
}

/// The three filter inputs of the issue list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    query: String,
    query_lower: String,
    pub status: Selector<Status>,
    pub priority: Selector<Priority>,
}

impl IssueFilter {
    pub fn new(query: &str, status: &str, priority: &str) -> Self {
        let mut filter = Self {
            status: Selector::parse(status),
            priority: Selector::parse(priority),
            ..Self::default()
        };
        filter.set_query(query);
        filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.query_lower = query.to_lowercase();
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = Selector::parse(status);
    }

    pub fn set_priority(&mut self, priority: &str) {
        self.priority = Selector::parse(priority);
    }

    /// Whether any input narrows the list
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || !self.status.is_all() || !self.priority.is_all()
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        issue.mentions(&self.query_lower)
            && self.status.matches(&issue.status)
            && self.priority.matches(&issue.priority)
    }

    /// Stable filter over `issues`
    pub fn apply<'a>(&self, issues: &'a [Issue]) -> Vec<&'a Issue> {
        issues.iter().filter(|i| self.matches(i)).collect()
    }
}

/// Filter `issues` by search text, status selector and priority selector
pub fn filter_issues<'a>(
    issues: &'a [Issue],
    query: &str,
    status: &str,
    priority: &str,
) -> Vec<&'a Issue> {
    IssueFilter::new(query, status, priority).apply(issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn ids(issues: &[&Issue]) -> Vec<u32> {
        issues.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_empty_query_and_all_is_identity() {
        let issues = seed::sample_issues();
        let out = filter_issues(&issues, "", "all", "all");
        assert_eq!(out.len(), issues.len());
        assert!(out.iter().zip(issues.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_status_progress() {
        let issues = seed::sample_issues();
        assert_eq!(ids(&filter_issues(&issues, "", "progress", "all")), vec![2, 4]);
    }

    #[test]
    fn test_text_leak() {
        let issues = seed::sample_issues();
        assert_eq!(ids(&filter_issues(&issues, "leak", "all", "all")), vec![4]);
    }

    #[test]
    fn test_priority_urgent() {
        let issues = seed::sample_issues();
        assert_eq!(ids(&filter_issues(&issues, "", "all", "urgent")), vec![1, 4]);
    }

    #[test]
    fn test_case_insensitive_query() {
        let issues = seed::sample_issues();
        let upper = ids(&filter_issues(&issues, "POTHOLE", "all", "all"));
        let lower = ids(&filter_issues(&issues, "pothole", "all", "all"));
        assert_eq!(upper, lower);
        assert_eq!(upper, vec![1]);
    }

    #[test]
    fn test_query_matches_location_and_description() {
        let issues = seed::sample_issues();
        // location of #2
        assert_eq!(ids(&filter_issues(&issues, "park avenue", "all", "all")), vec![2]);
        // description of #3
        assert_eq!(ids(&filter_issues(&issues, "PESTS", "all", "all")), vec![3]);
        // reporter is not searched
        assert!(filter_issues(&issues, "John Smith", "all", "all").is_empty());
    }

    #[test]
    fn test_unknown_selector_values_match_nothing() {
        let issues = seed::sample_issues();
        assert!(filter_issues(&issues, "", "archived", "all").is_empty());
        assert!(filter_issues(&issues, "", "all", "critical").is_empty());
        // selectors compare exactly
        assert!(filter_issues(&issues, "", "Progress", "all").is_empty());
        assert!(filter_issues(&[], "", "archived", "all").is_empty());
    }

    #[test]
    fn test_combined_predicates() {
        let issues = seed::sample_issues();
        assert_eq!(ids(&filter_issues(&issues, "", "progress", "urgent")), vec![4]);
        assert!(filter_issues(&issues, "pothole", "resolved", "all").is_empty());
    }

    #[test]
    fn test_soundness_and_completeness() {
        let issues = seed::sample_issues();
        let queries = ["", "st", "light", "zzz"];
        let statuses = ["all", "new", "progress", "resolved", "bogus"];
        let priorities = ["all", "urgent", "medium", "low"];

        for q in queries {
            for s in statuses {
                for p in priorities {
                    let filter = IssueFilter::new(q, s, p);
                    let out = filter.apply(&issues);
                    for issue in &issues {
                        let included = out.iter().any(|i| i.id == issue.id);
                        assert_eq!(included, filter.matches(issue), "q={q} s={s} p={p}");
                    }
                    // order preserved
                    let positions: Vec<usize> = out
                        .iter()
                        .map(|o| issues.iter().position(|i| i.id == o.id).unwrap())
                        .collect();
                    assert!(positions.windows(2).all(|w| w[0] < w[1]));
                }
            }
        }
    }

    #[test]
    fn test_selector_display_round_trips_raw_value() {
        assert_eq!(Selector::<Status>::parse("all").to_string(), "all");
        assert_eq!(Selector::<Status>::parse("new").to_string(), "new");
        assert_eq!(Selector::<Status>::parse("archived").to_string(), "archived");
    }

    #[test]
    fn test_is_active() {
        assert!(!IssueFilter::new("", "all", "all").is_active());
        assert!(IssueFilter::new("x", "all", "all").is_active());
        assert!(IssueFilter::new("", "all", "low").is_active());
    }
}
