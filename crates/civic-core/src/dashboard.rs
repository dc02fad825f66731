//! Dashboard controller
//!
//! Owns the store, the view state and the three issue-list inputs.
//! Front-ends translate user input into [`Event`]s and read back the
//! filtered list, the active view and the sidebar flag.

use crate::{Config, Issue, IssueDraft, IssueFilter, Result, Store, View, ViewState};
use tracing::debug;

/// Discrete user events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SearchChanged(String),
    StatusFilterChanged(String),
    PriorityFilterChanged(String),
    Navigate(View),
    ToggleSidebar,
    MarkResolved(u32),
    CreateIssue(IssueDraft),
}

pub struct Dashboard {
    store: Store,
    view: ViewState,
    filter: IssueFilter,
}

impl Dashboard {
    pub fn new(store: Store, sidebar_open: bool) -> Self {
        Self {
            store,
            view: ViewState::new(sidebar_open),
            filter: IssueFilter::new("", "all", "all"),
        }
    }

    /// Build from configuration: seed source, date format, initial sidebar
    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self::new(Store::open(config)?, config.sidebar_open))
    }

    /// Apply one event
    pub fn dispatch(&mut self, event: Event) -> Result<()> {
        match event {
            Event::SearchChanged(text) => {
                debug!(query = %text, "search changed");
                self.filter.set_query(&text);
            }
            Event::StatusFilterChanged(value) => {
                debug!(status = %value, "status filter changed");
                self.filter.set_status(&value);
            }
            Event::PriorityFilterChanged(value) => {
                debug!(priority = %value, "priority filter changed");
                self.filter.set_priority(&value);
            }
            Event::Navigate(view) => self.view.set_active_view(view),
            Event::ToggleSidebar => self.view.toggle_sidebar(),
            Event::MarkResolved(id) => {
                self.store.mark_resolved(id)?;
            }
            Event::CreateIssue(draft) => {
                self.store.create_issue(draft)?;
            }
        }
        Ok(())
    }

    pub fn filtered_issues(&self) -> Vec<&Issue> {
        self.store.filter(&self.filter)
    }

    pub fn active_view(&self) -> View {
        self.view.active_view()
    }

    pub fn sidebar_open(&self) -> bool {
        self.view.sidebar_open()
    }

    pub fn filter(&self) -> &IssueFilter {
        &self.filter
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}
