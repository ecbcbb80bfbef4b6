//! Markdown report generator
//!
//! Generates a summary of the dataset followed by a table of every climb.
//! Renders well in GitHub, GitLab, and VS Code.

use crate::core::dataset::Cyclist;
use crate::core::report::{ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;
use std::fmt::Write;

/// Report template, see `templates/summary.md`
#[derive(Template)]
#[template(path = "summary.md")]
struct SummaryPage<'a> {
    title: &'a str,
    source: &'a str,
    record_count: usize,
    first_year: i32,
    last_year: i32,
    fastest: String,
    slowest: String,
    with_allegations: usize,
    without_allegations: usize,
    share: String,
    table: String,
}

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Table of climbs, ordered by place (unplaced last), then time
    fn generate_climbs_table(ctx: &ReportContext) -> String {
        let mut climbs: Vec<&Cyclist> = ctx.dataset.iter().collect();
        climbs.sort_by_key(|c| (c.place.is_none(), c.place, c.time));

        let mut table = String::from(
            "| Place | Rider | Nationality | Year | Time | Allegation |\n\
             |------:|-------|-------------|-----:|-----:|------------|\n",
        );
        for c in climbs {
            let place = c.place.map_or_else(|| "-".to_string(), |p| p.to_string());
            let allegation = if c.doping.trim().is_empty() {
                "-".to_string()
            } else if c.url.is_empty() {
                escape_cell(c.doping.trim())
            } else {
                format!(
                    "[{}]({})",
                    escape_cell(c.doping.trim()),
                    escape_link_target(c.url.trim())
                )
            };
            let _ = writeln!(
                table,
                "| {place} | {} | {} | {} | {} | {allegation} |",
                escape_cell(&c.name),
                escape_cell(&c.nationality),
                c.year,
                c.time
            );
        }
        table
    }
}

/// Keep table cells on one line and stop `|` from splitting them
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}

/// Percent-encode what would end a link target early or split the table row
fn escape_link_target(url: &str) -> String {
    let mut escaped = String::with_capacity(url.len());
    for ch in url.chars() {
        match ch {
            ' ' | '(' | ')' | '<' | '>' | '|' | '\\' => {
                let _ = write!(escaped, "%{:02X}", u32::from(ch));
            }
            '\n' | '\r' | '\t' => {}
            _ => escaped.push(ch),
        }
    }
    escaped
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let summary = ctx.summary;
        let page = SummaryPage {
            title: ctx.title(),
            source: ctx.source,
            record_count: summary.record_count,
            first_year: summary.first_year,
            last_year: summary.last_year,
            fastest: format!(
                "{} ({}, {})",
                summary.fastest.time, summary.fastest.name, summary.fastest.year
            ),
            slowest: format!(
                "{} ({}, {})",
                summary.slowest.time, summary.slowest.name, summary.slowest.year
            ),
            with_allegations: summary.with_allegations,
            without_allegations: summary.without_allegations(),
            share: format!("{:.1}", summary.allegation_share()),
            table: Self::generate_climbs_table(ctx),
        };
        Ok(page.render()?)
    }
}
