//! civic-core: Core library for the civic issue dashboard
//!
//! Holds the issue/report data model, the issue filter engine, the
//! view-state controller and the badge style mapping. Everything lives in
//! memory; seed data is injected at construction and never written back.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod issue;
pub mod overview;
pub mod report;
pub mod seed;
pub mod store;
pub mod style;
pub mod view;

pub use config::{Config, DisplayConfig};
pub use dashboard::{Dashboard, Event};
pub use error::Error;
pub use filter::{IssueFilter, Selector, filter_issues};
pub use issue::{Issue, IssueDraft, Priority, Status};
pub use overview::{CategoryStat, DashboardStats};
pub use report::{Report, ReportStatus};
pub use store::Store;
pub use style::{BadgeKind, StyleTag, style_for};
pub use view::{Category, View, ViewState};

/// Result type for civic operations
pub type Result<T> = std::result::Result<T, Error>;
