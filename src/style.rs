//! Style presets for figure and axis appearance.
//!
//! A [`Style`] is a per-instance template: every figure clones one at
//! construction and the template is copied again each time an axis record is
//! produced, so mutating one figure's style never leaks into another.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Direction tick marks are drawn in, relative to the plot frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickDirection {
    /// Ticks point into the plot area.
    #[default]
    Inside,
    /// Ticks point away from the plot area.
    Outside,
}

impl TickDirection {
    fn as_str(self) -> &'static str {
        match self {
            TickDirection::Inside => "inside",
            TickDirection::Outside => "outside",
        }
    }
}

/// Margins around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
    /// Right margin.
    pub right: f64,
    /// Top margin.
    pub top: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self { bottom: 20.0, left: 20.0, right: 20.0, top: 80.0 }
    }
}

/// Appearance preset applied to new figures and axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Figure width in pixels.
    pub width: f64,
    /// Figure height in pixels.
    pub height: f64,
    /// Base font family.
    pub font_family: String,
    /// Base font size.
    pub font_size: f64,
    /// Figure and axis title font size.
    pub title_font_size: f64,
    /// Tick label font size.
    pub tick_font_size: f64,
    /// Default marker size for quick plots.
    pub marker_size: f64,
    /// Axis boundary line width.
    pub axis_line_width: f64,
    /// Major tick length in pixels.
    pub major_tick_length: f64,
    /// Minor tick length in pixels.
    pub minor_tick_length: f64,
    /// Tick mark direction.
    pub tick_direction: TickDirection,
    /// Margins around the plot area.
    pub margin: Margin,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            width: 450.0,
            height: 450.0,
            font_family: "Arial".to_string(),
            font_size: 18.0,
            title_font_size: 20.0,
            tick_font_size: 18.0,
            marker_size: 5.0,
            axis_line_width: 1.0,
            major_tick_length: 5.0,
            minor_tick_length: 3.0,
            tick_direction: TickDirection::default(),
            margin: Margin::default(),
        }
    }
}

impl Style {
    /// Base layout template for a new figure.
    #[must_use]
    pub fn base_layout(&self) -> Map<String, Value> {
        let layout = json!({
            "width": self.width,
            "height": self.height,
            "font": {
                "family": self.font_family,
                "size": self.font_size,
            },
            "title": {
                "font": {"size": self.title_font_size},
                "xanchor": "center",
                "xref": "paper",
                "yanchor": "middle",
                "yref": "container",
            },
            "margin": {
                "b": self.margin.bottom,
                "l": self.margin.left,
                "r": self.margin.right,
                "t": self.margin.top,
            },
        });
        as_map(layout)
    }

    /// Title font record shared by the figure title and floating axis titles.
    #[must_use]
    pub fn title_font(&self) -> Map<String, Value> {
        as_map(json!({"size": self.title_font_size}))
    }

    fn common_axis(&self) -> Map<String, Value> {
        as_map(json!({
            "automargin": true,
            "zeroline": false,
            "showgrid": false,
            "ticks": self.tick_direction.as_str(),
        }))
    }

    /// Default record for a main (labeled) axis.
    #[must_use]
    pub fn main_axis_defaults(&self) -> Map<String, Value> {
        let mut record = self.common_axis();
        let main = as_map(json!({
            "title": {"font": {"size": self.title_font_size}},
            "showline": false,
            "showticklabels": true,
            "ticklen": self.major_tick_length,
            "tickfont": {"size": self.tick_font_size},
            "hoverformat": ".f",
        }));
        record.extend(main);
        record
    }

    /// Default record for a mirror (opposite-side tick) axis.
    #[must_use]
    pub fn mirror_axis_defaults(&self) -> Map<String, Value> {
        let mut record = self.common_axis();
        let mirror = as_map(json!({
            "showline": false,
            "showticklabels": false,
            "ticklen": self.major_tick_length,
        }));
        record.extend(mirror);
        record
    }

    /// Default record for a minor (subdivided tick) axis.
    ///
    /// The minor axis is the one companion that draws the plot boundary
    /// line, so it carries `showline` and the configured line width.
    #[must_use]
    pub fn minor_axis_defaults(&self) -> Map<String, Value> {
        let mut record = self.common_axis();
        let minor = as_map(json!({
            "showline": true,
            "showticklabels": false,
            "ticklen": self.minor_tick_length,
            "linewidth": self.axis_line_width,
            "mirror": "ticks",
        }));
        record.extend(minor);
        record
    }
}

fn as_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
