//! HTML report generator
//!
//! Generates a self-contained page: the inline SVG chart inside `#root`, a
//! `#tooltip` element, embedded CSS, and the mouse handlers that show and
//! hide the tooltip. `#root` is exactly the chart's size, so the placement
//! each dot carries in `data-tooltip-style` applies as is.

use crate::core::report::visualization::SvgChartWriter;
use crate::core::report::{ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;

/// Page template, see `templates/scatterplot.html`
#[derive(Template)]
#[template(path = "scatterplot.html")]
struct ScatterplotPage<'a> {
    title: &'a str,
    svg: String,
    source: &'a str,
    record_count: usize,
    first_year: i32,
    last_year: i32,
    tooltip_width: f64,
    tooltip_height: f64,
}

/// HTML report generator with interactive tooltips
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let geometry = ctx.plot.tooltip;
        let page = ScatterplotPage {
            title: ctx.title(),
            svg: SvgChartWriter::inline().write(ctx.plot),
            source: ctx.source,
            record_count: ctx.summary.record_count,
            first_year: ctx.summary.first_year,
            last_year: ctx.summary.last_year,
            tooltip_width: geometry.width,
            tooltip_height: geometry.height,
        };
        Ok(page.render()?)
    }
}
