//! CLI command implementations

use anyhow::Result;
use civic_core::overview::recent_issues;
use civic_core::{
    BadgeKind, Category, Config, DisplayConfig, Issue, IssueFilter, Report, StyleTag, Store,
    style_for,
};
use colored::{ColoredString, Colorize};
use std::path::Path;
use tabled::{Table, Tabled, settings::Style};

fn load(config_path: Option<&Path>) -> Result<(Config, Store)> {
    let config = Config::discover(config_path)?;
    if !config.display.colors {
        colored::control::set_override(false);
    }
    let store = Store::open(&config)?;
    Ok((config, store))
}

fn paint(text: &str, tag: StyleTag) -> ColoredString {
    match tag {
        StyleTag::New => text.blue(),
        StyleTag::Progress => text.yellow(),
        StyleTag::Resolved => text.green(),
        StyleTag::Urgent => text.red().bold(),
        StyleTag::Neutral => text.dimmed(),
    }
}

pub fn issues(
    config_path: Option<&Path>,
    search: &str,
    status: &str,
    priority: &str,
    json: bool,
) -> Result<()> {
    let (config, store) = load(config_path)?;
    let filter = IssueFilter::new(search, status, priority);
    let issues = store.filter(&filter);

    if json {
        println!("{}", serde_json::to_string(&issues)?);
    } else if issues.is_empty() {
        println!("No issues found");
    } else {
        for issue in issues {
            print_issue(issue, &config.display);
        }
    }

    Ok(())
}

fn print_issue(issue: &Issue, display: &DisplayConfig) {
    let priority = issue.priority.as_str();
    let status = issue.status.as_str();
    println!(
        "{} {} [{}] [{}] {}",
        format!("#{}", issue.id).cyan(),
        issue.issue_type.bold(),
        paint(priority, style_for(BadgeKind::Priority, priority)),
        paint(status, style_for(BadgeKind::Status, status)),
        issue.location
    );
    println!("    {}", display.truncate(&issue.description).dimmed());

    let assignee = issue.assignee.as_deref().unwrap_or("unassigned");
    println!(
        "    reporter: {}  assignee: {}  updated: {}",
        issue.reporter, assignee, issue.updated_at
    );
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    report_type: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Created by")]
    created_by: String,
    #[tabled(rename = "Date")]
    created_at: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl ReportRow {
    fn new(r: &Report, display: &DisplayConfig) -> Self {
        let status = r.status.as_str();
        Self {
            id: r.id,
            title: r.title.clone(),
            report_type: r.report_type.clone(),
            category: r.category.clone(),
            created_by: r.created_by.clone(),
            created_at: r.created_at.clone(),
            status: paint(status, style_for(BadgeKind::ReportStatus, status)).to_string(),
            description: display.truncate(&r.description),
        }
    }
}

fn reports_table(reports: &[Report], display: &DisplayConfig) -> String {
    let rows: Vec<ReportRow> = reports.iter().map(|r| ReportRow::new(r, display)).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn reports(config_path: Option<&Path>, json: bool) -> Result<()> {
    let (config, store) = load(config_path)?;
    let reports = store.reports();

    if json {
        println!("{}", serde_json::to_string(reports)?);
    } else {
        println!("{} ({})", "All Reports".bold(), reports.len());
        if !reports.is_empty() {
            println!("{}", reports_table(reports, &config.display));
        }
    }
    Ok(())
}

pub fn overview(config_path: Option<&Path>, json: bool) -> Result<()> {
    let (_, store) = load(config_path)?;
    let stats = store.stats();
    let recent = recent_issues(store.issues(), 5);

    if json {
        let out = serde_json::json!({
            "stats": stats,
            "recent": recent,
            "categories": store.category_stats(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", "Overview".bold());
    println!("  Total issues:  {}", stats.total);
    println!("  New:           {}", stats.new);
    println!("  In progress:   {}", stats.in_progress);
    println!("  Resolved:      {}", stats.resolved);
    println!("  Urgent:        {}", stats.urgent.to_string().red());
    println!("  Active staff:  {}", stats.active_staff);

    if !recent.is_empty() {
        println!();
        println!("{}", "Recent Issues".bold());
        for issue in recent {
            let status = issue.status.as_str();
            let priority = issue.priority.as_str();
            println!(
                "  {} {} - {} [{}] [{}]",
                format!("#{}", issue.id).cyan(),
                issue.issue_type,
                issue.location,
                paint(status, style_for(BadgeKind::Status, status)),
                paint(priority, style_for(BadgeKind::Priority, priority))
            );
        }
    }

    if !store.category_stats().is_empty() {
        println!();
        println!("{}", "Category Overview".bold());
        for stat in store.category_stats() {
            println!(
                "  {:<16} {:>3}/{:<3} {}",
                stat.name,
                stat.current,
                stat.total,
                progress_bar(stat.ratio(), 20)
            );
        }
    }
    Ok(())
}

fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn categories(config_path: Option<&Path>, json: bool) -> Result<()> {
    let (_, store) = load(config_path)?;

    if json {
        let out: Vec<_> = Category::ALL
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.id(),
                    "title": c.title(),
                    "issueType": c.issue_type(),
                    "count": c.count(),
                    "loaded": store.in_category(*c).len(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string(&out)?);
        return Ok(());
    }

    for c in Category::ALL {
        println!(
            "{:<12} {:<16} {:>3} open  ({} loaded)",
            c.id().cyan(),
            c.title(),
            c.count(),
            store.in_category(c).len()
        );
    }
    Ok(())
}

pub fn style(kind: &str, value: &str, json: bool) -> Result<()> {
    let kind: BadgeKind = kind.parse()?;
    let tag = style_for(kind, value);
    if json {
        println!("{}", serde_json::to_string(&tag)?);
    } else {
        println!("{}", tag);
    }
    Ok(())
}

pub fn config_show(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = Config::discover(config_path)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", config.to_toml()?);
    }
    Ok(())
}

pub fn config_path(config_path: Option<&Path>) -> Result<()> {
    match Config::resolve_path(config_path) {
        Some(path) => {
            let note = if path.exists() { "" } else { " (not created)" };
            println!("{}{}", path.display(), note);
        }
        None => println!("No config directory available"),
    }
    Ok(())
}

pub fn config_init() -> Result<()> {
    print!("{}", Config::default_with_comments());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "----");
        assert_eq!(progress_bar(0.5, 4), "##--");
        assert_eq!(progress_bar(1.0, 4), "####");
    }

    #[test]
    fn test_reports_table_lists_every_report() {
        let store = Store::seeded();
        let display = DisplayConfig::default();
        let table = reports_table(store.reports(), &display);
        for report in store.reports() {
            assert!(table.contains(&report.title));
            assert!(table.contains(&report.category));
        }
        assert!(table.contains("Created by"));
        assert!(table.contains("Description"));
        assert!(table.contains("processing"));
    }

    #[test]
    fn test_reports_table_truncates_descriptions() {
        let store = Store::seeded();
        let display = DisplayConfig {
            max_description_length: 10,
            ..Default::default()
        };
        let table = reports_table(store.reports(), &display);
        let first = &store.reports()[0].description;
        assert!(first.chars().count() > 10);
        assert!(table.contains(&display.truncate(first)));
        assert!(!table.contains(first.as_str()));
    }
}
