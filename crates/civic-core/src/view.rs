//! View-state controller
//!
//! Which top-level panel is showing and whether the sidebar is expanded.
//! Views form a flat set: any view can be reached from any other, there is
//! no history.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Issue category shown in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pothole,
    Streetlight,
    Trash,
    Graffiti,
    Property,
    Water,
    Sidewalk,
    Traffic,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Pothole,
        Category::Streetlight,
        Category::Trash,
        Category::Graffiti,
        Category::Property,
        Category::Water,
        Category::Sidewalk,
        Category::Traffic,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Category::Pothole => "pothole",
            Category::Streetlight => "streetlight",
            Category::Trash => "trash",
            Category::Graffiti => "graffiti",
            Category::Property => "property",
            Category::Water => "water",
            Category::Sidewalk => "sidewalk",
            Category::Traffic => "traffic",
        }
    }

    /// Sidebar title
    pub fn title(&self) -> &'static str {
        match self {
            Category::Pothole => "Potholes",
            Category::Streetlight => "Street Lights",
            Category::Trash => "Trash Bins",
            Category::Graffiti => "Graffiti",
            Category::Property => "Public Property",
            Category::Water => "Water Leaks",
            Category::Sidewalk => "Sidewalk",
            Category::Traffic => "Traffic Signals",
        }
    }

    /// The `type` label issues of this category carry
    pub fn issue_type(&self) -> &'static str {
        match self {
            Category::Pothole => "Pothole",
            Category::Streetlight => "Street Light",
            Category::Trash => "Trash Bin",
            Category::Graffiti => "Graffiti",
            Category::Property => "Public Property",
            Category::Water => "Water Leak",
            Category::Sidewalk => "Sidewalk",
            Category::Traffic => "Traffic Signal",
        }
    }

    /// Open-issue count shown next to the sidebar entry
    pub fn count(&self) -> u32 {
        match self {
            Category::Pothole => 23,
            Category::Streetlight => 12,
            Category::Trash => 8,
            Category::Graffiti => 15,
            Category::Property => 6,
            Category::Water => 4,
            Category::Sidewalk => 11,
            Category::Traffic => 3,
        }
    }

    pub fn includes(&self, issue: &crate::Issue) -> bool {
        issue.issue_type.eq_ignore_ascii_case(self.issue_type())
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Navigable top-level view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Overview,
    Issues,
    Reports,
    Categories,
    Category(Category),
}

impl View {
    /// Views in the main navigation bar
    pub const MAIN: [View; 4] = [View::Overview, View::Issues, View::Reports, View::Categories];

    pub fn id(&self) -> &'static str {
        match self {
            View::Overview => "overview",
            View::Issues => "issues",
            View::Reports => "reports",
            View::Categories => "categories",
            View::Category(c) => c.id(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Overview => "Dashboard",
            View::Issues => "All Issues",
            View::Reports => "Reports",
            View::Categories => "Categories",
            View::Category(c) => c.title(),
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            View::Category(c) => Some(*c),
            _ => None,
        }
    }
}

impl std::str::FromStr for View {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overview" => Ok(View::Overview),
            "issues" => Ok(View::Issues),
            "reports" => Ok(View::Reports),
            "categories" => Ok(View::Categories),
            other => Category::ALL
                .into_iter()
                .find(|c| c.id() == other)
                .map(View::Category)
                .ok_or_else(|| crate::Error::InvalidView(other.to_string())),
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Active view plus sidebar visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    active_view: View,
    sidebar_open: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ViewState {
    pub fn new(sidebar_open: bool) -> Self {
        Self {
            active_view: View::Overview,
            sidebar_open,
        }
    }

    pub fn active_view(&self) -> View {
        self.active_view
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn set_active_view(&mut self, next: View) {
        debug!(from = %self.active_view, to = %next, "navigate");
        self.active_view = next;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
        debug!(open = self.sidebar_open, "toggle sidebar");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ViewState::default();
        assert_eq!(state.active_view(), View::Overview);
        assert!(state.sidebar_open());
        assert!(!ViewState::new(false).sidebar_open());
    }

    #[test]
    fn test_navigation_leaves_no_history() {
        let mut via_reports = ViewState::default();
        via_reports.set_active_view(View::Reports);
        via_reports.set_active_view(View::Overview);

        let mut direct = ViewState::default();
        direct.set_active_view(View::Overview);

        assert_eq!(via_reports, direct);
    }

    #[test]
    fn test_every_view_is_reachable() {
        let mut state = ViewState::default();
        let mut all: Vec<View> = View::MAIN.to_vec();
        all.extend(Category::ALL.map(View::Category));
        for from in &all {
            for to in &all {
                state.set_active_view(*from);
                state.set_active_view(*to);
                assert_eq!(state.active_view(), *to);
            }
        }
    }

    #[test]
    fn test_sidebar_is_independent_of_view() {
        let mut state = ViewState::default();
        state.set_active_view(View::Issues);
        state.toggle_sidebar();
        assert_eq!(state.active_view(), View::Issues);
        assert!(!state.sidebar_open());
        state.set_active_view(View::Category(Category::Water));
        assert!(!state.sidebar_open());
        state.toggle_sidebar();
        assert!(state.sidebar_open());
    }

    #[test]
    fn test_view_parse() {
        assert_eq!("reports".parse::<View>().unwrap(), View::Reports);
        assert_eq!(
            "streetlight".parse::<View>().unwrap(),
            View::Category(Category::Streetlight)
        );
        assert!("settings".parse::<View>().is_err());
        for c in Category::ALL {
            assert_eq!(View::Category(c).to_string().parse::<View>().unwrap(), View::Category(c));
        }
    }

    #[test]
    fn test_category_cycle() {
        assert_eq!(Category::Pothole.next(), Category::Streetlight);
        assert_eq!(Category::Traffic.next(), Category::Pothole);
        assert_eq!(Category::Pothole.previous(), Category::Traffic);
    }
}
