//! In-memory issue store
//!
//! Seeded once at start-up, either from the built-in fixtures or from a
//! read-only JSON seed file. Mutations stay in memory and are never saved.

use crate::overview::{CategoryStat, DashboardStats};
use crate::seed::Seed;
use crate::{Category, Config, Error, Issue, IssueDraft, IssueFilter, Report, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Issues and reports held for one session
#[derive(Debug, Clone)]
pub struct Store {
    issues: Vec<Issue>,
    reports: Vec<Report>,
    category_stats: Vec<CategoryStat>,
    date_format: String,
}

impl Store {
    /// Store over caller-supplied fixtures
    pub fn new(issues: Vec<Issue>, reports: Vec<Report>) -> Self {
        Self {
            issues,
            reports,
            category_stats: Vec::new(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Store over the built-in sample data
    pub fn seeded() -> Self {
        Self::assemble(Seed::builtin())
    }

    /// Store over a seed document; issue ids must be unique
    pub fn from_seed(seed: Seed) -> Result<Self> {
        let mut seen = HashSet::with_capacity(seed.issues.len());
        if let Some(dup) = seed.issues.iter().find(|i| !seen.insert(i.id)) {
            return Err(Error::InvalidSeed(format!("duplicate issue id #{}", dup.id)));
        }
        Ok(Self::assemble(seed))
    }

    fn assemble(seed: Seed) -> Self {
        let mut store = Self::new(seed.issues, seed.reports);
        store.category_stats = seed.category_stats;
        store
    }

    /// Load a JSON seed file (`{"issues": [...], "reports": [...]}`)
    pub fn load_seed(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let seed: Seed = serde_json::from_str(&content)?;
        info!(
            path = %path.display(),
            issues = seed.issues.len(),
            reports = seed.reports.len(),
            "loaded seed file"
        );
        Self::from_seed(seed)
    }

    /// Open the store described by `config`
    pub fn open(config: &Config) -> Result<Self> {
        let store = match &config.seed_file {
            Some(path) => Self::load_seed(path)?,
            None => Self::seeded(),
        };
        Ok(store.with_date_format(&config.display.date_format))
    }

    /// strftime format used when stamping mutations
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn category_stats(&self) -> &[CategoryStat] {
        &self.category_stats
    }

    pub fn get(&self, id: u32) -> Option<&Issue> {
        self.issues.iter().find(|i| i.id == id)
    }

    pub fn filter(&self, filter: &IssueFilter) -> Vec<&Issue> {
        filter.apply(&self.issues)
    }

    /// Issues whose type belongs to `category`, in store order
    pub fn in_category(&self, category: Category) -> Vec<&Issue> {
        self.issues.iter().filter(|i| category.includes(i)).collect()
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_issues(&self.issues)
    }

    /// Set an issue's status to resolved. Already-resolved issues are left
    /// untouched.
    pub fn mark_resolved(&mut self, id: u32) -> Result<&Issue> {
        let now = self.now();
        let issue = self
            .issues
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(Error::NotFound(id))?;

        if !issue.status.is_resolved() {
            issue.resolve(now);
            info!(id, "issue marked resolved");
        }
        Ok(issue)
    }

    /// File a new issue at the end of the collection
    pub fn create_issue(&mut self, draft: IssueDraft) -> Result<&Issue> {
        if draft.issue_type.trim().is_empty() {
            return Err(Error::InvalidDraft("type cannot be empty".to_string()));
        }

        let id = self.next_id()?;
        let issue = draft.into_issue(id, self.now());
        info!(id, issue_type = %issue.issue_type, "issue created");
        self.issues.push(issue);
        Ok(&self.issues[self.issues.len() - 1])
    }

    fn next_id(&self) -> Result<u32> {
        match self.issues.iter().map(|i| i.id).max() {
            Some(max) => max.checked_add(1).ok_or(Error::IdsExhausted),
            None => Ok(1),
        }
    }

    fn now(&self) -> String {
        chrono::Local::now().format(&self.date_format).to_string()
    }
}
