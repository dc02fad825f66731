//! Application state and key handling

use civic_core::{
    Category, Config, Dashboard, DisplayConfig, Event, Issue, IssueDraft, Priority, Status, View,
};
use std::time::{Duration, Instant};

/// Rows per page for paging motions
const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Search,
    Help,
    WhichKey(WhichKeyContext),
    AddIssue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhichKeyContext {
    Status,
    Priority,
}

impl WhichKeyContext {
    pub fn title(self) -> &'static str {
        match self {
            WhichKeyContext::Status => "Status Filter",
            WhichKeyContext::Priority => "Priority Filter",
        }
    }

    pub fn all_label(self) -> &'static str {
        match self {
            WhichKeyContext::Status => "All Status",
            WhichKeyContext::Priority => "All Priority",
        }
    }

    /// `(value, label)` pairs bound to keys 1.. in order; 0 selects all
    pub fn options(self) -> Vec<(&'static str, &'static str)> {
        match self {
            WhichKeyContext::Status => {
                Status::ALL.iter().map(|s| (s.as_str(), s.label())).collect()
            }
            WhichKeyContext::Priority => {
                Priority::ALL.iter().map(|p| (p.as_str(), p.label())).collect()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    Quit,
    Up,
    Down,
    Left,
    Right,
    PageDown,
    PageUp,
    Enter,
    Tab,
    BackTab,
    Escape,
    Backspace,
    Char(char),
    Noop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    IssueType,
    Location,
    Description,
    Reporter,
    Assignee,
    Priority,
}

impl FormField {
    const ORDER: [FormField; 6] = [
        FormField::IssueType,
        FormField::Location,
        FormField::Description,
        FormField::Reporter,
        FormField::Assignee,
        FormField::Priority,
    ];

    fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Fields of the "Add New Issue" overlay
pub struct IssueForm {
    pub issue_type: String,
    pub location: String,
    pub description: String,
    pub reporter: String,
    pub assignee: String,
    pub priority: Priority,
    pub selected_field: FormField,
}

impl IssueForm {
    fn new() -> Self {
        Self {
            issue_type: String::new(),
            location: String::new(),
            description: String::new(),
            reporter: String::new(),
            assignee: String::new(),
            priority: Priority::Medium,
            selected_field: FormField::IssueType,
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn field_mut(&mut self) -> Option<&mut String> {
        match self.selected_field {
            FormField::IssueType => Some(&mut self.issue_type),
            FormField::Location => Some(&mut self.location),
            FormField::Description => Some(&mut self.description),
            FormField::Reporter => Some(&mut self.reporter),
            FormField::Assignee => Some(&mut self.assignee),
            FormField::Priority => None,
        }
    }

    fn cycle_priority(&mut self, forward: bool) {
        let all = Priority::ALL;
        let idx = all.iter().position(|p| *p == self.priority).unwrap_or(0);
        let new_idx = if forward {
            (idx + 1) % all.len()
        } else {
            (idx + all.len() - 1) % all.len()
        };
        self.priority = all[new_idx];
    }

    fn to_draft(&self) -> IssueDraft {
        IssueDraft {
            issue_type: self.issue_type.clone(),
            location: self.location.clone(),
            description: self.description.clone(),
            priority: self.priority,
            reporter: self.reporter.clone(),
            assignee: Some(self.assignee.clone()),
        }
    }
}

/// Cursor and scroll offset of the visible issue list
pub struct SelectionState {
    pub index: usize,
    pub offset: usize,
}

impl SelectionState {
    fn new() -> Self {
        Self {
            index: 0,
            offset: 0,
        }
    }

    fn next(&mut self, max: usize, page_size: usize) {
        if max == 0 {
            return;
        }
        self.index = (self.index + 1).min(max - 1);
        self.adjust_offset(page_size);
    }

    fn previous(&mut self) {
        self.index = self.index.saturating_sub(1);
        self.adjust_offset(0);
    }

    fn top(&mut self) {
        self.index = 0;
        self.offset = 0;
    }

    fn bottom(&mut self, max: usize, page_size: usize) {
        if max == 0 {
            return;
        }
        self.index = max - 1;
        if self.index >= self.offset + page_size {
            self.offset = max.saturating_sub(page_size);
        }
    }

    fn page_down(&mut self, max: usize, page_size: usize) {
        if max == 0 {
            return;
        }
        self.index = (self.index + page_size).min(max - 1);
        self.adjust_offset(page_size);
    }

    fn page_up(&mut self, page_size: usize) {
        self.index = self.index.saturating_sub(page_size);
        self.adjust_offset(0);
    }

    fn clamp(&mut self, max: usize) {
        if self.index >= max {
            self.index = max.saturating_sub(1);
        }
        if self.offset > self.index {
            self.offset = self.index;
        }
    }

    fn adjust_offset(&mut self, page_size: usize) {
        if self.index < self.offset {
            self.offset = self.index;
        } else if page_size > 0 && self.index >= self.offset + page_size {
            self.offset = self.index.saturating_sub(page_size - 1);
        }
    }
}

pub struct App {
    pub dashboard: Dashboard,
    pub mode: AppMode,
    g_prefix: bool,

    pub selection: SelectionState,

    pub status_message: Option<String>,
    status_message_time: Option<Instant>,

    pub issue_form: IssueForm,

    pub display: DisplayConfig,
}

impl App {
    pub fn new(dashboard: Dashboard, config: &Config) -> Self {
        Self {
            dashboard,
            mode: AppMode::Normal,
            g_prefix: false,
            selection: SelectionState::new(),
            status_message: None,
            status_message_time: None,
            issue_form: IssueForm::new(),
            display: config.display.clone(),
        }
    }

    /// Issues listed by the active view
    pub fn visible_issues(&self) -> Vec<&Issue> {
        match self.dashboard.active_view() {
            View::Issues => self.dashboard.filtered_issues(),
            View::Category(c) => self.dashboard.store().in_category(c),
            _ => Vec::new(),
        }
    }

    pub fn current_issue(&self) -> Option<&Issue> {
        self.visible_issues().get(self.selection.index).copied()
    }

    /// Returns true when the app should exit
    pub fn handle_key_action(&mut self, action: KeyAction) -> bool {
        match self.mode {
            AppMode::Normal => self.handle_normal_mode(action),
            AppMode::Search => self.handle_search_mode(action),
            AppMode::Help => self.handle_help_mode(action),
            AppMode::WhichKey(ctx) => self.handle_which_key_mode(ctx, action),
            AppMode::AddIssue => self.handle_add_issue_mode(action),
        }
    }

    fn handle_normal_mode(&mut self, action: KeyAction) -> bool {
        let max = self.visible_issues().len();
        let g_pressed = action == KeyAction::Char('g');

        match action {
            KeyAction::Quit | KeyAction::Char('q') => return true,
            KeyAction::Escape => self.mode = AppMode::Normal,
            KeyAction::Up | KeyAction::Char('k') => self.selection.previous(),
            KeyAction::Down | KeyAction::Char('j') => self.selection.next(max, PAGE_SIZE),
            KeyAction::PageDown => self.selection.page_down(max, PAGE_SIZE),
            KeyAction::PageUp => self.selection.page_up(PAGE_SIZE),
            KeyAction::Char('g') => {
                if self.g_prefix {
                    self.selection.top();
                }
            }
            KeyAction::Char('G') => self.selection.bottom(max, PAGE_SIZE),
            KeyAction::Char('1') => self.navigate(View::Overview),
            KeyAction::Char('2') => self.navigate(View::Issues),
            KeyAction::Char('3') => self.navigate(View::Reports),
            KeyAction::Char('4') => self.navigate(View::Categories),
            KeyAction::Tab | KeyAction::Right | KeyAction::Char('l') => self.cycle_main_view(true),
            KeyAction::BackTab | KeyAction::Left | KeyAction::Char('h') => {
                self.cycle_main_view(false)
            }
            KeyAction::Char(']') => self.cycle_category(true),
            KeyAction::Char('[') => self.cycle_category(false),
            KeyAction::Char('b') => self.send(Event::ToggleSidebar),
            KeyAction::Char('/') => {
                self.navigate(View::Issues);
                self.mode = AppMode::Search;
            }
            KeyAction::Char('s') => self.mode = AppMode::WhichKey(WhichKeyContext::Status),
            KeyAction::Char('p') => self.mode = AppMode::WhichKey(WhichKeyContext::Priority),
            KeyAction::Char('x') => self.clear_filters(),
            KeyAction::Char('R') => self.mark_resolved(),
            KeyAction::Char('a') => {
                self.issue_form.reset();
                self.mode = AppMode::AddIssue;
            }
            KeyAction::Char('?') => self.mode = AppMode::Help,
            _ => {}
        }

        self.g_prefix = g_pressed && !self.g_prefix;
        false
    }

    fn handle_search_mode(&mut self, action: KeyAction) -> bool {
        let mut query = self.dashboard.filter().query().to_string();
        match action {
            KeyAction::Quit => return true,
            KeyAction::Escape | KeyAction::Enter => {
                self.mode = AppMode::Normal;
                return false;
            }
            KeyAction::Backspace => {
                query.pop();
            }
            KeyAction::Char(c) => query.push(c),
            _ => return false,
        }
        self.send(Event::SearchChanged(query));
        self.refresh_selection();
        false
    }

    fn handle_help_mode(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Quit => return true,
            KeyAction::Escape | KeyAction::Char('q') | KeyAction::Char('?') => {
                self.mode = AppMode::Normal;
            }
            _ => {}
        }
        false
    }

    fn handle_which_key_mode(&mut self, ctx: WhichKeyContext, action: KeyAction) -> bool {
        let value = match (ctx, action) {
            (_, KeyAction::Quit) => return true,
            (_, KeyAction::Escape) => {
                self.mode = AppMode::Normal;
                return false;
            }
            (_, KeyAction::Char('0')) => "all",
            (_, KeyAction::Char(c)) => {
                let picked = c
                    .to_digit(10)
                    .and_then(|d| ctx.options().get((d as usize).checked_sub(1)?).copied());
                match picked {
                    Some((value, _)) => value,
                    None => return false,
                }
            }
            _ => return false,
        };

        let event = match ctx {
            WhichKeyContext::Status => Event::StatusFilterChanged(value.to_string()),
            WhichKeyContext::Priority => Event::PriorityFilterChanged(value.to_string()),
        };
        self.send(event);
        self.navigate(View::Issues);
        self.refresh_selection();
        self.show_status(format!("Showing {} issues", self.dashboard.filtered_issues().len()));
        self.mode = AppMode::Normal;
        false
    }

    fn handle_add_issue_mode(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Quit => return true,
            KeyAction::Escape => {
                self.mode = AppMode::Normal;
                self.issue_form.reset();
            }
            KeyAction::Tab => self.issue_form.selected_field = self.issue_form.selected_field.next(),
            KeyAction::BackTab => {
                self.issue_form.selected_field = self.issue_form.selected_field.previous()
            }
            KeyAction::Up | KeyAction::Down
                if self.issue_form.selected_field == FormField::Priority =>
            {
                self.issue_form.cycle_priority(action == KeyAction::Down);
            }
            KeyAction::Enter => self.create_issue(),
            KeyAction::Backspace => {
                if let Some(field) = self.issue_form.field_mut() {
                    field.pop();
                }
            }
            KeyAction::Char(c) => {
                if let Some(field) = self.issue_form.field_mut() {
                    field.push(c);
                }
            }
            _ => {}
        }
        false
    }

    fn navigate(&mut self, view: View) {
        if self.dashboard.active_view() != view {
            self.selection.top();
        }
        self.send(Event::Navigate(view));
    }

    fn cycle_main_view(&mut self, forward: bool) {
        let main = View::MAIN;
        let next = match main.iter().position(|v| *v == self.dashboard.active_view()) {
            Some(idx) if forward => main[(idx + 1) % main.len()],
            Some(idx) => main[(idx + main.len() - 1) % main.len()],
            None => View::Categories,
        };
        self.navigate(next);
    }

    fn cycle_category(&mut self, forward: bool) {
        let next = match self.dashboard.active_view().category() {
            Some(c) if forward => c.next(),
            Some(c) => c.previous(),
            None if forward => Category::ALL[0],
            None => Category::ALL[Category::ALL.len() - 1],
        };
        self.navigate(View::Category(next));
    }

    fn clear_filters(&mut self) {
        self.send(Event::SearchChanged(String::new()));
        self.send(Event::StatusFilterChanged("all".to_string()));
        self.send(Event::PriorityFilterChanged("all".to_string()));
        self.refresh_selection();
        self.show_status("Filters cleared".to_string());
    }

    fn mark_resolved(&mut self) {
        let Some(id) = self.current_issue().map(|i| i.id) else {
            self.show_status("No issue selected".to_string());
            return;
        };
        self.send(Event::MarkResolved(id));
        self.refresh_selection();
        if self.status_message.is_none() {
            self.show_status(format!("Issue #{} marked resolved", id));
        }
    }

    fn create_issue(&mut self) {
        if self.issue_form.issue_type.trim().is_empty() {
            self.show_status("Type cannot be empty".to_string());
            return;
        }
        let draft = self.issue_form.to_draft();
        match self.dashboard.dispatch(Event::CreateIssue(draft)) {
            Ok(()) => {
                self.issue_form.reset();
                self.mode = AppMode::Normal;
                self.refresh_selection();
                self.show_status("Issue created".to_string());
            }
            Err(e) => self.show_status(e.to_string()),
        }
    }

    /// Dispatch to the dashboard, surfacing failures in the status bar
    fn send(&mut self, event: Event) {
        self.status_message = None;
        if let Err(e) = self.dashboard.dispatch(event) {
            tracing::warn!(error = %e, "event rejected");
            self.show_status(e.to_string());
        }
    }

    fn refresh_selection(&mut self) {
        let max = self.visible_issues().len();
        self.selection.clamp(max);
    }

    fn show_status(&mut self, msg: String) {
        self.status_message = Some(msg);
        self.status_message_time = Some(Instant::now());
    }

    pub fn on_tick(&mut self) {
        if let Some(time) = self.status_message_time
            && time.elapsed() > Duration::from_secs(3)
        {
            self.status_message = None;
            self.status_message_time = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_core::Store;

    fn app() -> App {
        App::new(Dashboard::new(Store::seeded(), true), &Config::default())
    }

    fn press(app: &mut App, keys: &str) {
        for c in keys.chars() {
            app.handle_key_action(KeyAction::Char(c));
        }
    }

    fn visible_ids(app: &App) -> Vec<u32> {
        app.visible_issues().iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_number_keys_navigate() {
        let mut app = app();
        press(&mut app, "3");
        assert_eq!(app.dashboard.active_view(), View::Reports);
        press(&mut app, "1");
        assert_eq!(app.dashboard.active_view(), View::Overview);
    }

    #[test]
    fn test_tab_cycles_main_views() {
        let mut app = app();
        app.handle_key_action(KeyAction::Tab);
        assert_eq!(app.dashboard.active_view(), View::Issues);
        app.handle_key_action(KeyAction::BackTab);
        app.handle_key_action(KeyAction::BackTab);
        assert_eq!(app.dashboard.active_view(), View::Categories);
    }

    #[test]
    fn test_category_brackets() {
        let mut app = app();
        press(&mut app, "]");
        assert_eq!(app.dashboard.active_view(), View::Category(Category::Pothole));
        press(&mut app, "[[");
        assert_eq!(app.dashboard.active_view(), View::Category(Category::Sidewalk));
        assert!(app.visible_issues().is_empty());
    }

    #[test]
    fn test_sidebar_toggle() {
        let mut app = app();
        press(&mut app, "b");
        assert!(!app.dashboard.sidebar_open());
        press(&mut app, "b");
        assert!(app.dashboard.sidebar_open());
    }

    #[test]
    fn test_search_refilters_per_keystroke() {
        let mut app = app();
        press(&mut app, "/");
        assert_eq!(app.mode, AppMode::Search);
        assert_eq!(app.dashboard.active_view(), View::Issues);

        press(&mut app, "p");
        assert_eq!(visible_ids(&app), vec![1, 2, 3]);
        // h/l are text while searching, not view motions
        press(&mut app, "othole");
        assert_eq!(visible_ids(&app), vec![1]);
        assert_eq!(app.dashboard.active_view(), View::Issues);

        for _ in 0.."pothole".len() {
            app.handle_key_action(KeyAction::Backspace);
        }
        assert_eq!(visible_ids(&app), vec![1, 2, 3, 4]);
        press(&mut app, "street");
        assert_eq!(visible_ids(&app), vec![2, 4]);

        app.handle_key_action(KeyAction::Escape);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.dashboard.filter().query(), "street");
    }

    #[test]
    fn test_which_key_filters() {
        let mut app = app();
        press(&mut app, "s2");
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.dashboard.active_view(), View::Issues);
        assert_eq!(visible_ids(&app), vec![2, 4]);

        press(&mut app, "p1");
        assert_eq!(visible_ids(&app), vec![4]);

        press(&mut app, "s0p0");
        assert_eq!(visible_ids(&app), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_which_key_ignores_keys_without_option() {
        let mut app = app();
        press(&mut app, "s4");
        assert_eq!(app.mode, AppMode::WhichKey(WhichKeyContext::Status));
        assert!(!app.dashboard.filter().is_active());

        press(&mut app, "3");
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(visible_ids(&app), vec![3]);
    }

    #[test]
    fn test_which_key_options_follow_enum_order() {
        let labels: Vec<&str> = WhichKeyContext::Status
            .options()
            .into_iter()
            .map(|(_, label)| label)
            .collect();
        assert_eq!(labels, vec!["New", "In Progress", "Resolved"]);
        assert_eq!(WhichKeyContext::Priority.options()[2], ("low", "Low"));
    }

    #[test]
    fn test_clear_filters() {
        let mut app = app();
        press(&mut app, "s3");
        assert_eq!(visible_ids(&app), vec![3]);
        press(&mut app, "x");
        assert!(!app.dashboard.filter().is_active());
        assert_eq!(visible_ids(&app), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_selection_clamps_after_filtering() {
        let mut app = app();
        press(&mut app, "2G");
        assert_eq!(app.selection.index, 3);
        press(&mut app, "s1");
        assert_eq!(app.selection.index, 0);
        assert_eq!(app.current_issue().map(|i| i.id), Some(1));
    }

    #[test]
    fn test_gg_goes_to_top() {
        let mut app = app();
        press(&mut app, "2jj");
        assert_eq!(app.selection.index, 2);
        press(&mut app, "g");
        assert_eq!(app.selection.index, 2);
        press(&mut app, "g");
        assert_eq!(app.selection.index, 0);
    }

    #[test]
    fn test_mark_resolved_current_issue() {
        let mut app = app();
        press(&mut app, "2jR");
        let issue = app.dashboard.store().get(2).unwrap();
        assert_eq!(issue.status, Status::Resolved);
        assert_eq!(app.status_message.as_deref(), Some("Issue #2 marked resolved"));
    }

    #[test]
    fn test_mark_resolved_without_list() {
        let mut app = app();
        press(&mut app, "R");
        assert_eq!(app.status_message.as_deref(), Some("No issue selected"));
    }

    #[test]
    fn test_add_issue_form() {
        let mut app = app();
        press(&mut app, "a");
        assert_eq!(app.mode, AppMode::AddIssue);

        // empty type is rejected
        app.handle_key_action(KeyAction::Enter);
        assert_eq!(app.mode, AppMode::AddIssue);

        press(&mut app, "Graffiti");
        app.handle_key_action(KeyAction::Tab);
        press(&mut app, "Elm St");
        for _ in 0..4 {
            app.handle_key_action(KeyAction::Tab);
        }
        assert_eq!(app.issue_form.selected_field, FormField::Priority);
        app.handle_key_action(KeyAction::Down);
        assert_eq!(app.issue_form.priority, Priority::Low);
        app.handle_key_action(KeyAction::Enter);

        assert_eq!(app.mode, AppMode::Normal);
        let created = app.dashboard.store().get(5).unwrap();
        assert_eq!(created.issue_type, "Graffiti");
        assert_eq!(created.location, "Elm St");
        assert_eq!(created.priority, Priority::Low);
        assert_eq!(created.assignee, None);
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = app();
        press(&mut app, "?");
        assert_eq!(app.mode, AppMode::Help);
        assert!(!app.handle_key_action(KeyAction::Char('q')));
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.handle_key_action(KeyAction::Char('q')));
    }
}
