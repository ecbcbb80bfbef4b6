//! SVG serializer for the scatterplot scene
//!
//! Emits the same element structure a browser-side chart would build: a
//! `#title` text, a translated plot group holding `#x-axis`, `#y-axis` and
//! the `.dot` circles, and a `#legend` group below the plot.

use crate::core::chart::{Axis, AxisSide, Dot, Legend, ScatterPlot};
use htmlize::{escape_attribute, escape_text};
use std::fmt::Write;

/// Length of tick marks and of the domain path's end caps
const TICK_SIZE: f64 = 6.0;
/// Gap between tick mark and label
const TICK_PADDING: f64 = 3.0;

/// Writes a [`ScatterPlot`] as SVG markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvgChartWriter {
    standalone: bool,
}

impl SvgChartWriter {
    /// Markup for embedding in an HTML page. Dots carry their tooltip in
    /// `data-tooltip` and its placement in `data-tooltip-style`.
    #[must_use]
    pub const fn inline() -> Self {
        Self { standalone: false }
    }

    /// Complete SVG document. Dots carry a `<title>` child instead.
    #[must_use]
    pub const fn standalone() -> Self {
        Self { standalone: true }
    }

    /// Serialize the scene
    #[must_use]
    pub fn write(&self, plot: &ScatterPlot) -> String {
        let mut svg = String::new();
        let layout = &plot.layout;

        if self.standalone {
            let _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            let _ = writeln!(
                svg,
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
                num(layout.width),
                num(layout.height),
                num(layout.width),
                num(layout.height)
            );
        } else {
            let _ = writeln!(
                svg,
                r#"<svg width="{}" height="{}">"#,
                num(layout.width),
                num(layout.height)
            );
        }

        let _ = writeln!(
            svg,
            r#"  <text id="title" x="{}" y="{}" text-anchor="middle" font-size="24">{}</text>"#,
            num(plot.title.x),
            num(plot.title.y),
            escape_text(plot.title.text.as_str())
        );

        let _ = writeln!(
            svg,
            r#"  <g transform="translate({}, {})">"#,
            num(layout.margin_left),
            num(layout.margin_top)
        );
        Self::write_axis(&mut svg, &plot.x_axis);
        Self::write_axis(&mut svg, &plot.y_axis);
        for dot in &plot.dots {
            self.write_dot(&mut svg, dot);
        }
        let _ = writeln!(svg, "  </g>");

        Self::write_legend(&mut svg, &plot.legend);
        let _ = writeln!(svg, "</svg>");
        svg
    }

    fn write_axis(svg: &mut String, axis: &Axis) {
        let len = num(axis.length);
        let (domain, text_anchor) = match axis.side {
            AxisSide::Bottom => (format!("M0,{TICK_SIZE}V0H{len}V{TICK_SIZE}"), "middle"),
            AxisSide::Left => (format!("M-{TICK_SIZE},{len}H0V0H-{TICK_SIZE}"), "end"),
        };

        let _ = writeln!(
            svg,
            r#"    <g id="{}" transform="translate({}, {})" fill="none" font-size="10" font-family="sans-serif" text-anchor="{text_anchor}">"#,
            axis.id,
            num(axis.offset.0),
            num(axis.offset.1)
        );
        let _ = writeln!(
            svg,
            r#"      <path class="domain" stroke="currentColor" d="{domain}"/>"#
        );

        let label_gap = TICK_SIZE + TICK_PADDING;
        for tick in &axis.ticks {
            let pos = num(tick.position);
            let label = escape_text(tick.label.as_str());
            match axis.side {
                AxisSide::Bottom => {
                    let _ = writeln!(
                        svg,
                        r#"      <g class="tick" transform="translate({pos}, 0)"><line stroke="currentColor" y2="{TICK_SIZE}"/><text fill="currentColor" y="{label_gap}" dy="0.71em">{label}</text></g>"#
                    );
                }
                AxisSide::Left => {
                    let _ = writeln!(
                        svg,
                        r#"      <g class="tick" transform="translate(0, {pos})"><line stroke="currentColor" x2="-{TICK_SIZE}"/><text fill="currentColor" x="-{label_gap}" dy="0.32em">{label}</text></g>"#
                    );
                }
            }
        }
        let _ = writeln!(svg, "    </g>");
    }

    fn write_dot(&self, svg: &mut String, dot: &Dot) {
        let _ = write!(
            svg,
            r#"    <circle class="dot" cx="{}" cy="{}" r="{}" fill="{}" data-xvalue="{}" data-yvalue="{}""#,
            num(dot.cx),
            num(dot.cy),
            num(dot.r),
            escape_attribute(dot.fill.as_str()),
            escape_attribute(dot.x_value.as_str()),
            escape_attribute(dot.y_value.as_str())
        );

        if self.standalone {
            let _ = writeln!(
                svg,
                "><title>{}</title></circle>",
                escape_text(dot.tooltip.to_plain())
            );
        } else {
            let _ = writeln!(
                svg,
                r#" data-year="{}" data-tooltip="{}" data-tooltip-style="{}"/>"#,
                escape_attribute(dot.tooltip.data_year.as_str()),
                escape_attribute(dot.tooltip.to_html()),
                escape_attribute(dot.tooltip_placement.to_css())
            );
        }
    }

    fn write_legend(svg: &mut String, legend: &Legend) {
        let _ = writeln!(
            svg,
            r#"  <g id="legend" transform="translate({}, {})">"#,
            num(legend.origin.0),
            num(legend.origin.1)
        );
        let size = num(legend.swatch_size);
        for item in &legend.items {
            let _ = writeln!(
                svg,
                r#"    <g><rect x="{}" y="0" width="{size}" height="{size}" fill="{}"/><text x="{}" y="0" dy=".71em" font-size="12" font-family="sans-serif">{}</text></g>"#,
                num(item.swatch_x),
                escape_attribute(item.color.as_str()),
                num(item.text_x),
                escape_text(item.label)
            );
        }
        let _ = writeln!(svg, "  </g>");
    }
}

/// Format a coordinate with at most two decimals and no trailing zeros
fn num(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chart::ChartStyle;
    use crate::core::dataset::Dataset;

    fn plot() -> ScatterPlot {
        let json = r#"[
            {"Time": "36:50", "Name": "Marco \"Il Pirata\" Pantani", "Year": 1995, "Nationality": "ITA",
             "Doping": "Alleged drug use <1995>"},
            {"Time": "39:50", "Name": "Rider Two", "Year": 2015, "Nationality": "FRA", "Doping": ""}
        ]"#;
        ScatterPlot::build(&Dataset::from_json(json).unwrap(), &ChartStyle::default()).unwrap()
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(5.0), "5");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(100.0), "100");
    }

    #[test]
    fn test_inline_markup_structure() {
        let svg = SvgChartWriter::inline().write(&plot());
        assert!(svg.starts_with("<svg width=\"960\" height=\"600\">"));
        assert!(svg.contains(r#"<text id="title" x="480" y="50""#));
        assert!(svg.contains(r#"<g transform="translate(80, 100)">"#));
        assert!(svg.contains(r#"<g id="x-axis" transform="translate(0, 420)""#));
        assert!(svg.contains(r#"<g id="y-axis" transform="translate(0, 0)""#));
        assert!(svg.contains(r#"<g id="legend" transform="translate(80, 560)">"#));
        assert_eq!(svg.matches("class=\"dot\"").count(), 2);
        assert!(svg.contains(r#"data-xvalue="1995-01-01" data-yvalue="1900-01-01T00:36:50""#));
        assert!(!svg.contains("<title>"));
        assert!(svg.contains("data-tooltip="));
        // Slowest climb sits at the canvas's right edge, so its tooltip flips left
        assert!(svg.contains(
            r#"data-tooltip-style="left: ; top: 120px; right: 70px; bottom: ; display: block;""#
        ));
    }

    #[test]
    fn test_inline_tooltip_is_attribute_escaped() {
        let svg = SvgChartWriter::inline().write(&plot());
        // The tooltip HTML escapes the text, then the attribute escapes the HTML
        assert!(svg.contains("&amp;lt;1995&amp;gt;"));
        assert!(svg.contains("&lt;br&gt;"));
        assert!(svg.contains("&quot;Il Pirata&quot;"));
    }

    #[test]
    fn test_standalone_document_has_native_tooltips() {
        let svg = SvgChartWriter::standalone().write(&plot());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
        assert!(svg.contains("<title>Rider Two: FRA\nYear: 2015 Time: 39:50</title>"));
        assert!(svg.contains("Alleged drug use &lt;1995&gt;"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_axis_domain_paths() {
        let svg = SvgChartWriter::inline().write(&plot());
        assert!(svg.contains(r#"d="M0,6V0H830V6""#));
        assert!(svg.contains(r#"d="M-6,420H0V0H-6""#));
    }
}
