//! Rendering

use crate::app::{App, AppMode, FormField, WhichKeyContext};
use civic_core::overview::recent_issues;
use civic_core::{BadgeKind, Category, Issue, StyleTag, View, style_for};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap},
};

const SIDEBAR_OPEN_WIDTH: u16 = 28;
const SIDEBAR_CLOSED_WIDTH: u16 = 8;

pub fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    let sidebar_width = if app.dashboard.sidebar_open() {
        SIDEBAR_OPEN_WIDTH
    } else {
        SIDEBAR_CLOSED_WIDTH
    };
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
        .split(main_chunks[1]);

    render_header(f, app, main_chunks[0]);
    render_sidebar(f, app, body_chunks[0]);

    let content = body_chunks[1];
    match app.dashboard.active_view() {
        View::Overview => render_overview(f, app, content),
        View::Issues => render_issues(f, app, content),
        View::Reports => render_reports(f, app, content),
        View::Categories => render_categories(f, app, content),
        View::Category(c) => render_category(f, app, c, content),
    }

    render_status_bar(f, app, main_chunks[2]);

    match app.mode {
        AppMode::Help => render_help_overlay(f),
        AppMode::WhichKey(ctx) => render_which_key_overlay(f, ctx),
        AppMode::AddIssue => render_issue_form(f, app),
        AppMode::Normal | AppMode::Search => {}
    }
}

fn color(app: &App, c: Color) -> Style {
    if app.display.colors {
        Style::default().fg(c)
    } else {
        Style::default()
    }
}

fn tag_style(app: &App, tag: StyleTag) -> Style {
    let c = match tag {
        StyleTag::New => Color::Blue,
        StyleTag::Progress => Color::Yellow,
        StyleTag::Resolved => Color::Green,
        StyleTag::Urgent => Color::Red,
        StyleTag::Neutral => Color::Gray,
    };
    color(app, c).add_modifier(Modifier::BOLD)
}

fn badge(app: &App, kind: BadgeKind, value: &str) -> Span<'static> {
    Span::styled(format!("[{}]", value), tag_style(app, style_for(kind, value)))
}

fn panel(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(title)
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let active = app.dashboard.active_view();
    let mut spans = vec![
        Span::styled(
            "Admin Dashboard",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];

    for (idx, view) in View::MAIN.iter().enumerate() {
        let style = if *view == active {
            color(app, Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {} {} ", idx + 1, view.title()), style));
        spans.push(Span::raw(" "));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn render_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let open = app.dashboard.sidebar_open();
    let active = app.dashboard.active_view();
    let highlight = |view: View| {
        if view == active {
            color(app, Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };

    let mut items = Vec::new();
    if open {
        items.push(ListItem::new(Line::from(Span::styled(
            "Navigation",
            Style::default().fg(Color::DarkGray),
        ))));
    }
    for view in [View::Overview, View::Issues, View::Reports] {
        let label = if open { view.title() } else { &view.id()[..2] };
        items.push(ListItem::new(Line::from(Span::styled(
            format!(" {}", label),
            highlight(view),
        ))));
    }

    items.push(ListItem::new(""));
    if open {
        items.push(ListItem::new(Line::from(Span::styled(
            "Categories",
            Style::default().fg(Color::DarkGray),
        ))));
    }
    for category in Category::ALL {
        let view = View::Category(category);
        let line = if open {
            Line::from(vec![
                Span::styled(format!(" {:<18}", category.title()), highlight(view)),
                Span::styled(format!("{:>3}", category.count()), color(app, Color::Magenta)),
            ])
        } else {
            Line::from(Span::styled(format!(" {}", &category.id()[..2]), highlight(view)))
        };
        items.push(ListItem::new(line));
    }

    let title = if open { "Admin Panel" } else { "AP" };
    let list = List::new(items).block(panel(title.to_string()));
    f.render_widget(list, area);
}

fn render_overview(f: &mut Frame, app: &App, area: Rect) {
    let store = app.dashboard.store();
    let stats = store.stats();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);

    let card_data = [
        ("Total Issues", stats.total, StyleTag::Urgent),
        ("Resolved", stats.resolved, StyleTag::Resolved),
        ("In Progress", stats.in_progress, StyleTag::Progress),
        ("Active Staff", stats.active_staff, StyleTag::New),
    ];
    for (i, (title, value, tag)) in card_data.into_iter().enumerate() {
        let card = Paragraph::new(Line::from(Span::styled(value.to_string(), tag_style(app, tag))))
            .alignment(Alignment::Center)
            .block(panel(title.to_string()));
        f.render_widget(card, cards[i]);
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let recent: Vec<ListItem> = recent_issues(store.issues(), 5)
        .into_iter()
        .map(|issue| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        issue.issue_type.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" "),
                    badge(app, BadgeKind::Status, issue.status.as_str()),
                    Span::raw(" "),
                    badge(app, BadgeKind::Priority, issue.priority.as_str()),
                ]),
                Line::from(Span::styled(
                    format!("  {}  {}", issue.location, issue.updated_at),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();
    f.render_widget(List::new(recent).block(panel("Recent Issues".to_string())), bottom[0]);

    let stats_block = panel("Category Overview".to_string());
    let inner = stats_block.inner(bottom[1]);
    f.render_widget(stats_block, bottom[1]);

    let category_stats = store.category_stats();
    let gauge_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(2); category_stats.len()])
        .split(inner);
    for (stat, row) in category_stats.iter().zip(gauge_rows.iter()) {
        let gauge = Gauge::default()
            .gauge_style(color(app, Color::Cyan))
            .ratio(stat.ratio())
            .label(format!("{} {}/{}", stat.name, stat.current, stat.total));
        f.render_widget(gauge, Rect { height: 1, ..*row });
    }
}

fn render_issues(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let filter = app.dashboard.filter();
    let search_style = if app.mode == AppMode::Search {
        color(app, Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let mut search = vec![
        Span::styled("Search: ", search_style),
        Span::raw(filter.query().to_string()),
    ];
    if app.mode == AppMode::Search {
        search.push(Span::raw("_"));
    }
    search.extend([
        Span::raw("   "),
        Span::styled("[s] Status: ", color(app, Color::Cyan)),
        Span::raw(filter.status.to_string()),
        Span::raw("   "),
        Span::styled("[p] Priority: ", color(app, Color::Cyan)),
        Span::raw(filter.priority.to_string()),
    ]);
    f.render_widget(
        Paragraph::new(Line::from(search)).block(panel("Filters".to_string())),
        rows[0],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    let issues = app.visible_issues();
    render_issue_list(f, app, &issues, format!("Issues ({})", issues.len()), columns[0]);
    render_issue_details(f, app, columns[1]);
}

fn render_issue_list(f: &mut Frame, app: &App, issues: &[&Issue], title: String, area: Rect) {
    let items: Vec<ListItem> = issues
        .iter()
        .map(|issue| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("#{} ", issue.id), color(app, Color::Cyan)),
                    Span::styled(issue.issue_type.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" "),
                    badge(app, BadgeKind::Priority, issue.priority.as_str()),
                    Span::raw(" "),
                    badge(app, BadgeKind::Status, issue.status.as_str()),
                ]),
                Line::from(Span::styled(
                    format!(
                        "   {}",
                        app.display.truncate(&issue.description)
                    ),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(panel(title))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default()
        .with_selected(if issues.is_empty() {
            None
        } else {
            Some(app.selection.index)
        })
        .with_offset(app.selection.offset);
    f.render_stateful_widget(list, area, &mut state);
}

fn render_issue_details(f: &mut Frame, app: &App, area: Rect) {
    let content = if let Some(issue) = app.current_issue() {
        let field = |label: &'static str, value: String| {
            Line::from(vec![Span::raw(label), Span::raw(value)])
        };
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("#{} - {}", issue.id, issue.issue_type),
                    color(app, Color::Cyan).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                issue.location.clone(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw("Priority: "),
                badge(app, BadgeKind::Priority, issue.priority.as_str()),
                Span::raw("  Status: "),
                badge(app, BadgeKind::Status, issue.status.as_str()),
            ]),
            Line::from(""),
            Line::from(issue.description.clone()),
            Line::from(""),
            field("Reporter:    ", issue.reporter.clone()),
        ];
        if let Some(ref assignee) = issue.assignee {
            lines.push(field("Assigned to: ", assignee.clone()));
        }
        lines.push(field("Created:     ", issue.created_at.clone()));
        lines.push(field("Updated:     ", issue.updated_at.clone()));
        if !issue.status.is_resolved() {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("[R]", color(app, Color::Green)),
                Span::raw(" Mark Resolved"),
            ]));
        }
        Text::from(lines)
    } else {
        Text::from(vec![Line::from("No issue selected")])
    };

    let paragraph = Paragraph::new(content)
        .block(panel("Details".to_string()))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_reports(f: &mut Frame, app: &App, area: Rect) {
    let reports = app.dashboard.store().reports();
    let items: Vec<ListItem> = reports
        .iter()
        .map(|report| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(report.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" "),
                    Span::styled(
                        format!("({})", report.report_type),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(" "),
                    badge(app, BadgeKind::ReportStatus, report.status.as_str()),
                ]),
                Line::from(format!(
                    "  {}",
                    app.display.truncate(&report.description)
                )),
                Line::from(Span::styled(
                    format!(
                        "  {} | {} | {}",
                        report.created_by, report.created_at, report.category
                    ),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items).block(panel(format!("All Reports ({})", reports.len())));
    f.render_widget(list, area);
}

fn render_categories(f: &mut Frame, app: &App, area: Rect) {
    let store = app.dashboard.store();
    let items: Vec<ListItem> = Category::ALL
        .iter()
        .map(|category| {
            let loaded = store.in_category(*category).len();
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<12}", category.id()), color(app, Color::Cyan)),
                Span::styled(
                    format!("{:<18}", category.title()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("open {:>3}   loaded {:>3}", category.count(), loaded)),
            ]))
        })
        .collect();

    let list = List::new(items).block(panel("Categories ([ / ] to browse)".to_string()));
    f.render_widget(list, area);
}

fn render_category(f: &mut Frame, app: &App, category: Category, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let summary = Paragraph::new(Line::from(vec![
        Span::styled(category.title(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("  {} open", category.count())),
    ]))
    .block(panel(format!("Category: {}", category.id())));
    f.render_widget(summary, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    let issues = app.visible_issues();
    render_issue_list(
        f,
        app,
        &issues,
        format!("{} issues ({})", category.issue_type(), issues.len()),
        columns[0],
    );
    render_issue_details(f, app, columns[1]);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let mode_text = match app.mode {
        AppMode::Normal => "[NORMAL]",
        AppMode::Search => "[SEARCH]",
        AppMode::Help => "[HELP]",
        AppMode::WhichKey(_) => "[FILTER]",
        AppMode::AddIssue => "[ADD ISSUE]",
    };

    let mode_style = match app.mode {
        AppMode::Normal => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        _ => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    };

    let status_content = if let Some(ref msg) = app.status_message {
        Line::from(vec![
            Span::styled(mode_text, mode_style),
            Span::raw(" | "),
            Span::styled(msg.as_str(), Style::default().fg(Color::Cyan)),
        ])
    } else {
        Line::from(vec![
            Span::styled(mode_text, mode_style),
            Span::raw(" | "),
            Span::raw(format!("{} | ", app.dashboard.active_view())),
            Span::raw("[1-4]view [b]sidebar [/]search [s]tatus [p]riority [R]esolve [a]dd [?]help [q]uit"),
        ])
    };

    let status_bar = Paragraph::new(status_content)
        .style(Style::default().bg(Color::DarkGray))
        .alignment(Alignment::Left);

    f.render_widget(status_bar, area);
}

fn render_help_overlay(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());

    f.render_widget(Clear, area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Cyan),
        )]),
        Line::from(""),
        Line::from("Views:"),
        Line::from("  1-4        Dashboard / All Issues / Reports / Categories"),
        Line::from("  Tab, h/l   Next / previous main view"),
        Line::from("  [ ]        Previous / next category"),
        Line::from("  b          Toggle sidebar"),
        Line::from(""),
        Line::from("Issue list:"),
        Line::from("  j/Down     Move down"),
        Line::from("  k/Up       Move up"),
        Line::from("  gg / G     Top / bottom"),
        Line::from("  Ctrl-d/u   Page down / up"),
        Line::from("  /          Search type, location and description"),
        Line::from("  s          Status filter"),
        Line::from("  p          Priority filter"),
        Line::from("  x          Clear filters"),
        Line::from(""),
        Line::from("Actions:"),
        Line::from("  R          Mark resolved"),
        Line::from("  a          Add new issue"),
        Line::from("  ?          Help"),
        Line::from("  q          Quit"),
        Line::from("  Esc        Return to normal mode"),
        Line::from(""),
        Line::from("Changes stay in memory for this session."),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .style(Style::default().bg(Color::Black))
                .title("Help (press Esc to close)"),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn render_which_key_overlay(f: &mut Frame, ctx: WhichKeyContext) {
    let area = Rect {
        x: 0,
        y: f.area().height.saturating_sub(4),
        width: f.area().width,
        height: 4.min(f.area().height),
    };

    f.render_widget(Clear, area);

    let mut spans = vec![Span::styled(
        format!("[{}] ", ctx.title()),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    spans.push(Span::raw(format!("[0] {} | ", ctx.all_label())));
    for (i, (_, label)) in ctx.options().into_iter().enumerate() {
        spans.push(Span::raw(format!("[{}] {} | ", i + 1, label)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

fn render_issue_form(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 60, f.area());

    f.render_widget(Clear, area);

    let form = &app.issue_form;

    let field_style = |field: FormField| {
        if form.selected_field == field {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };
    let cursor = |field: FormField| if form.selected_field == field { "_" } else { "" };
    let text_line = |label: &'static str, value: &str, field: FormField| {
        Line::from(vec![
            Span::styled(label, field_style(field)),
            Span::raw(value.to_string()),
            Span::raw(cursor(field)),
        ])
    };

    let text = vec![
        Line::from(vec![Span::styled(
            "Add New Issue",
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Cyan),
        )]),
        Line::from(""),
        text_line("Type:        ", &form.issue_type, FormField::IssueType),
        text_line("Location:    ", &form.location, FormField::Location),
        text_line("Description: ", &form.description, FormField::Description),
        text_line("Reporter:    ", &form.reporter, FormField::Reporter),
        text_line("Assignee:    ", &form.assignee, FormField::Assignee),
        Line::from(vec![
            Span::styled("Priority:    ", field_style(FormField::Priority)),
            badge(app, BadgeKind::Priority, form.priority.as_str()),
            Span::raw(" (↑/↓ to change)"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Green)),
            Span::raw(" Save  "),
            Span::styled("[Esc]", Style::default().fg(Color::Red)),
            Span::raw(" Cancel  "),
            Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
            Span::raw(" Next field"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .style(Style::default().bg(Color::Black))
                .title("New Issue"),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::KeyAction;
    use civic_core::{Config, Dashboard, Store};
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        App::new(Dashboard::new(Store::seeded(), true), &Config::default())
    }

    #[test]
    fn test_overview_renders_stats_and_categories() {
        let screen = render(&app());
        assert!(screen.contains("Admin Dashboard"));
        assert!(screen.contains("Total Issues"));
        assert!(screen.contains("Potholes 23/50"));
        assert!(screen.contains("Admin Panel"));
    }

    #[test]
    fn test_recent_issues_carry_status_and_priority() {
        let screen = render(&app());
        assert!(screen.contains("Water Leak [progress] [urgent]"));
        assert!(screen.contains("[medium]"));
    }

    #[test]
    fn test_which_key_overlay_lists_labels() {
        let mut app = app();
        app.handle_key_action(KeyAction::Char('s'));
        let screen = render(&app);
        assert!(screen.contains("[0] All Status"));
        assert!(screen.contains("[2] In Progress"));

        app.handle_key_action(KeyAction::Escape);
        app.handle_key_action(KeyAction::Char('p'));
        let screen = render(&app);
        assert!(screen.contains("[1] Urgent"));
        assert!(screen.contains("[3] Low"));
    }

    #[test]
    fn test_issue_view_shows_filtered_list() {
        let mut app = app();
        for c in "2s2".chars() {
            app.handle_key_action(KeyAction::Char(c));
        }
        let screen = render(&app);
        assert!(screen.contains("Issues (2)"));
        assert!(screen.contains("Status: progress"));
        assert!(screen.contains("Water Leak"));
        assert!(!screen.contains("#1 Pothole"));
    }

    #[test]
    fn test_collapsed_sidebar() {
        let mut app = app();
        app.handle_key_action(KeyAction::Char('b'));
        let screen = render(&app);
        assert!(screen.contains("AP"));
        assert!(!screen.contains("Admin Panel"));
    }

    #[test]
    fn test_reports_view() {
        let mut app = app();
        app.handle_key_action(KeyAction::Char('3'));
        let screen = render(&app);
        assert!(screen.contains("All Reports (6)"));
        assert!(screen.contains("Pothole Repair Analysis"));
    }
}
