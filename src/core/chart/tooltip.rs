//! Tooltip text and placement
//!
//! A tooltip opens next to the pointer, below and to the right of it. When the
//! box would overflow the viewport on an axis, it is anchored from the opposite
//! edge instead so it stays on screen.

use crate::core::dataset::Cyclist;
use htmlize::escape_text;

/// Text shown for a single dot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipContent {
    /// `"{name}: {nationality}"`
    pub heading: String,
    /// `"Year: {year} Time: {time}"`
    pub detail: String,
    /// Allegation text, when there is one
    pub allegation: Option<String>,
    /// Value of the tooltip's `data-year` attribute
    pub data_year: String,
}

impl TooltipContent {
    /// Build the tooltip for a record
    #[must_use]
    pub fn for_cyclist(cyclist: &Cyclist) -> Self {
        let doping = cyclist.doping.trim();
        Self {
            heading: format!("{}: {}", cyclist.name, cyclist.nationality),
            detail: format!("Year: {} Time: {}", cyclist.year, cyclist.time),
            allegation: (!doping.is_empty()).then(|| doping.to_string()),
            data_year: cyclist
                .year_date()
                .map_or_else(|| cyclist.year.to_string(), |d| d.format("%Y-%m-%d").to_string()),
        }
    }

    /// Lines of text, with an empty line before the allegation
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        let mut lines = vec![self.heading.as_str(), self.detail.as_str()];
        if let Some(allegation) = &self.allegation {
            lines.push("");
            lines.push(allegation);
        }
        lines
    }

    /// Plain text, newline separated
    #[must_use]
    pub fn to_plain(&self) -> String {
        self.lines().join("\n")
    }

    /// HTML fragment, `<br>` separated, text escaped
    #[must_use]
    pub fn to_html(&self) -> String {
        self.lines()
            .into_iter()
            .map(|line| escape_text(line).into_owned())
            .collect::<Vec<_>>()
            .join("<br>")
    }
}

/// Tooltip box size and pointer offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipGeometry {
    /// Box width
    pub width: f64,
    /// Box height
    pub height: f64,
    /// Gap between pointer and box
    pub offset: f64,
}

impl Default for TooltipGeometry {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 100.0,
            offset: 20.0,
        }
    }
}

/// Resolved CSS offsets. Exactly one of `left`/`right` and one of `top`/`bottom` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipPlacement {
    /// Distance from the viewport's left edge
    pub left: Option<f64>,
    /// Distance from the viewport's top edge
    pub top: Option<f64>,
    /// Distance from the viewport's right edge
    pub right: Option<f64>,
    /// Distance from the viewport's bottom edge
    pub bottom: Option<f64>,
}

impl TooltipPlacement {
    /// Place a tooltip for a pointer at `(x, y)` inside a `viewport` of `(width, height)`
    #[must_use]
    pub fn place(pointer: (f64, f64), viewport: (f64, f64), geometry: TooltipGeometry) -> Self {
        let (x, y) = pointer;
        let (view_w, view_h) = viewport;
        let left = x + geometry.offset;
        let top = y + geometry.offset;

        let overflow_x = left + geometry.width > view_w;
        let overflow_y = top + geometry.height > view_h;

        Self {
            left: (!overflow_x).then_some(left),
            top: (!overflow_y).then_some(top),
            right: overflow_x.then_some(view_w - x + geometry.offset),
            bottom: overflow_y.then_some(view_h - y + geometry.offset),
        }
    }

    /// Inline style for the shown tooltip; unused sides are cleared
    #[must_use]
    pub fn to_css(&self) -> String {
        let side = |name: &str, value: Option<f64>| {
            value.map_or_else(|| format!("{name}: ;"), |v| format!("{name}: {v}px;"))
        };
        [
            side("left", self.left),
            side("top", self.top),
            side("right", self.right),
            side("bottom", self.bottom),
            "display: block;".to_string(),
        ]
        .join(" ")
    }
}
