//! Figure wrapper: owns the layout tree, the axis map and the trace list.
//!
//! A [`Figure`] collects traces and axis configuration, then
//! [`finalize`](Figure::finalize) computes auto ranges/ticks, synthesizes
//! placeholder traces for companion axes, and assembles the layout tree the
//! rendering engine consumes. Subplot gridding and range alignment live in
//! the `subplots` submodule, the finalization pass in `finalize`.

mod finalize;
mod subplots;

pub use subplots::{Align, AlignScheme, Share, SubplotCell, SubplotOptions};

use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::axis::{Axes, AxisId, AxisSpec, Direction};
use crate::merge;
use crate::style::Style;
use crate::ticks::LogTicks;
use crate::traces::{Heatmap, Scatter, Trace};

use subplots::RangeAlignment;

/// Strings that are not italicized inside an axis-title symbol.
const UNITALICIZED: [&str; 17] = [
    "(", ")", "sin", "cos", "tan", "exp", "log", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
];

/// Invisible glyph used to blank a subplot's own axis title while keeping
/// the space it reserves.
const BLANK_TITLE: &str = "<span>\u{0020}</span>";

/// Legend placement inside the plot frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    /// Top-right corner.
    UpperRight,
    /// Bottom-right corner.
    LowerRight,
    /// Top-left corner.
    UpperLeft,
    /// Bottom-left corner.
    LowerLeft,
    /// Caller supplies every placement attribute.
    Custom,
    /// Engine default placement.
    Default,
}

/// Options for [`Figure::set_legend`].
#[derive(Debug, Clone)]
pub struct LegendOptions {
    /// Distance in pixels between the legend and the plot frame.
    pub padding: f64,
    /// Horizontal padding override.
    pub xpad: Option<f64>,
    /// Vertical padding override.
    pub ypad: Option<f64>,
    /// Extra legend attributes passed through to the engine.
    pub extra: Map<String, Value>,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self { padding: 10.0, xpad: None, ypad: None, extra: Map::new() }
    }
}

/// Axis title parts; the rendered title is `name, <i>symbol</i> [unit]`.
#[derive(Debug, Clone, Default)]
pub struct AxisTitle {
    name: Option<String>,
    symbol: Option<String>,
    unit: Option<String>,
    font: Option<Map<String, Value>>,
}

impl AxisTitle {
    /// Create an empty title (setting it removes the axis title).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Main part of the title.
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Symbol part, italicized except for function names and digits.
    #[must_use]
    pub fn symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_string());
        self
    }

    /// Unit part, rendered in square brackets.
    #[must_use]
    pub fn unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    /// Font record for the title.
    #[must_use]
    pub fn font(mut self, font: Map<String, Value>) -> Self {
        self.font = Some(font);
        self
    }

    fn is_empty(&self) -> bool {
        self.name.is_none() && self.symbol.is_none() && self.unit.is_none()
    }

    /// Assemble the title string, or `None` for an empty title.
    fn text(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut text = self.name.clone().unwrap_or_default();

        if let Some(symbol) = &self.symbol {
            let mut symbol = symbol.clone();
            for token in UNITALICIZED {
                symbol = symbol.replace(token, &format!("</i>{token}<i>"));
            }
            if !text.is_empty() {
                text.push_str(", ");
            }
            text.push_str(&format!("<i>{symbol}</i>"));
        }

        if let Some(unit) = &self.unit {
            text.push_str(&format!(" [{unit}]"));
        }

        Some(text)
    }
}

/// An extended figure: trace list, axis map and layout tree, with
/// automatic axis synthesis at finalization.
#[derive(Debug, Clone)]
pub struct Figure {
    style: Style,
    layout: Map<String, Value>,
    axes: IndexMap<AxisId, AxisSpec>,
    traces: Vec<Trace>,
    placeholder_uids: Vec<u64>,
    next_uid: u64,
    grid: Option<Vec<Vec<Option<(AxisId, AxisId)>>>>,
    alignment: RangeAlignment,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure {
    /// Create a figure with the default style.
    #[must_use]
    pub fn new() -> Self {
        Self::with_style(Style::default())
    }

    /// Create a figure with the given style preset.
    #[must_use]
    pub fn with_style(style: Style) -> Self {
        let layout = style.base_layout();
        let mut figure = Self {
            style,
            layout,
            axes: IndexMap::new(),
            traces: Vec::new(),
            placeholder_uids: Vec::new(),
            next_uid: 1,
            grid: None,
            alignment: RangeAlignment::default(),
        };
        figure.create_axis(AxisId::x());
        figure.create_axis(AxisId::y());
        figure
    }

    /// The figure's style preset.
    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Merge layout overrides onto the base layout tree.
    ///
    /// Keys naming an axis (`xaxis`, `yaxis2`, ...) are routed to the
    /// corresponding axis record, creating the axis if necessary; all other
    /// keys merge into the figure-level layout.
    pub fn merge_layout(&mut self, overrides: &Map<String, Value>) {
        for (key, value) in overrides {
            match (axis_id_from_layout_key(key), value) {
                (Some(id), Value::Object(record)) => {
                    if self.axes.contains_key(&id) {
                        if let Some(spec) = self.axes.get_mut(&id) {
                            for (k, v) in record {
                                spec.set(k, v.clone());
                            }
                        }
                    } else {
                        self.create_axis_with(id, record);
                    }
                }
                _ => {
                    let single = Map::from_iter([(key.clone(), value.clone())]);
                    merge::merge_into(&mut self.layout, &single);
                }
            }
        }
    }

    // Axis management ----------------------------------------------------

    /// Create an axis with default styling (no-op if it already exists).
    pub fn create_axis(&mut self, id: AxisId) {
        self.create_axis_with(id, &Map::new());
    }

    pub(crate) fn create_axis_with(&mut self, id: AxisId, overrides: &Map<String, Value>) {
        if !self.axes.contains_key(&id) {
            self.axes.insert(id, AxisSpec::new(id, &self.style, overrides));
        }
    }

    pub(crate) fn ensure_axis(&mut self, id: AxisId) -> &mut AxisSpec {
        self.axes.entry(id).or_insert_with(|| {
            debug!(axis = %id, "new axis created");
            AxisSpec::new(id, &self.style, &Map::new())
        })
    }

    /// Look up an axis.
    #[must_use]
    pub fn axis(&self, id: AxisId) -> Option<&AxisSpec> {
        self.axes.get(&id)
    }

    /// Identifiers of all main axes, in creation order.
    #[must_use]
    pub fn axis_ids(&self) -> Vec<AxisId> {
        self.axes.keys().copied().collect()
    }

    fn selected(&mut self, axes: Axes) -> Vec<AxisId> {
        if let Axes::One(id) = axes {
            self.ensure_axis(id);
        }
        self.axes.keys().copied().filter(|id| axes.matches(*id)).collect()
    }

    /// Set a layout attribute on the selected axes (main and companions).
    pub fn set_axis_layout(&mut self, axes: Axes, key: &str, value: Value) {
        self.set_axis_layout_with(axes, key, value, None, None);
    }

    /// Set a layout attribute with distinct values for mirror/minor
    /// companion records.
    pub fn set_axis_layout_with(
        &mut self,
        axes: Axes,
        key: &str,
        value: Value,
        mirror_value: Option<Value>,
        minor_value: Option<Value>,
    ) {
        for id in self.selected(axes) {
            if let Some(spec) = self.axes.get_mut(&id) {
                spec.set_with(key, value.clone(), mirror_value.clone(), minor_value.clone());
            }
        }
    }

    /// Remove a layout attribute from the selected axes.
    pub fn delete_axis_layout(&mut self, axes: Axes, key: &str) {
        for id in self.selected(axes) {
            if let Some(spec) = self.axes.get_mut(&id) {
                spec.delete(key);
            }
        }
    }

    /// Set the numeric range of one axis (mirrors and minors follow).
    pub fn set_axis_range(&mut self, axis: AxisId, minimum: f64, maximum: f64) {
        self.ensure_axis(axis).set("range", json!([minimum, maximum]));
    }

    /// Remove the numeric range of one axis, re-enabling auto-range.
    pub fn clear_axis_range(&mut self, axis: AxisId) {
        self.ensure_axis(axis).delete("range");
    }

    /// Set the range of every x axis.
    pub fn set_x_range(&mut self, minimum: f64, maximum: f64) {
        self.set_axis_layout(Axes::X, "range", json!([minimum, maximum]));
    }

    /// Set the range of every y axis.
    pub fn set_y_range(&mut self, minimum: f64, maximum: f64) {
        self.set_axis_layout(Axes::Y, "range", json!([minimum, maximum]));
    }

    /// Set the major tick interval and minor subdivision of the selected
    /// axes.
    pub fn set_axis_ticks(&mut self, axes: Axes, interval: f64, num_minor: u32) {
        self.delete_axis_layout(axes, "tickmode");
        self.delete_axis_layout(axes, "nticks");
        let minor = interval / f64::from(num_minor.max(1));
        self.set_axis_layout_with(axes, "dtick", json!(interval), None, Some(json!(minor)));
    }

    /// Set logarithmic tick intervals on the selected axes.
    pub fn set_axis_log_ticks(&mut self, axes: Axes, ticks: LogTicks) {
        self.delete_axis_layout(axes, "tickmode");
        self.delete_axis_layout(axes, "nticks");
        self.set_axis_layout_with(axes, "dtick", ticks.dtick(), None, Some(ticks.minor_dtick()));
    }

    /// Set the tick interval of every x axis.
    pub fn set_x_ticks(&mut self, interval: f64, num_minor: u32) {
        self.set_axis_ticks(Axes::X, interval, num_minor);
    }

    /// Set the tick interval of every y axis.
    pub fn set_y_ticks(&mut self, interval: f64, num_minor: u32) {
        self.set_axis_ticks(Axes::Y, interval, num_minor);
    }

    // Trace intake -------------------------------------------------------

    /// Replace all traces.
    pub fn set_data(&mut self, traces: Vec<Trace>) {
        self.traces.clear();
        for trace in traces {
            self.add_trace(trace);
        }
    }

    /// Append one trace, assigning its uid.
    pub fn add_trace(&mut self, trace: impl Into<Trace>) {
        let mut trace = trace.into();
        trace.set_uid(self.next_uid);
        self.next_uid += 1;
        self.traces.push(trace);
    }

    /// Append one scatter series.
    pub fn add_scatter(&mut self, scatter: Scatter) {
        self.add_trace(scatter);
    }

    /// Append several scatter series.
    pub fn add_scatters(&mut self, scatters: impl IntoIterator<Item = Scatter>) {
        for scatter in scatters {
            self.add_trace(scatter);
        }
    }

    /// Append one heatmap series.
    pub fn add_heatmap(&mut self, heatmap: Heatmap) {
        self.add_trace(heatmap);
    }

    /// Append several heatmap series.
    pub fn add_heatmaps(&mut self, heatmaps: impl IntoIterator<Item = Heatmap>) {
        for heatmap in heatmaps {
            self.add_trace(heatmap);
        }
    }

    /// The current trace list (placeholders included while finalized).
    #[must_use]
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    // Titles and legend --------------------------------------------------

    /// Set the figure title, vertically centered in the top margin.
    pub fn set_title(&mut self, text: &str) {
        self.set_title_with(text, 0.0, None);
    }

    /// Set the figure title with a vertical pixel shift and font override.
    pub fn set_title_with(&mut self, text: &str, shift: f64, font: Option<Map<String, Value>>) {
        let height = self.layout_f64("height").unwrap_or(self.style.height);
        let top = self
            .layout
            .get("margin")
            .and_then(|m| m.get("t"))
            .and_then(Value::as_f64)
            .unwrap_or(self.style.margin.top);

        let mut title = Map::new();
        title.insert("text".to_string(), Value::String(text.to_string()));
        title.insert("y".to_string(), json!((height - 0.5 * top + shift) / height));
        if let Some(font) = font {
            title.insert("font".to_string(), Value::Object(font));
        }

        let overrides = Map::from_iter([("title".to_string(), Value::Object(title))]);
        merge::merge_into(&mut self.layout, &overrides);
    }

    /// Set the title of one axis; an empty [`AxisTitle`] removes it.
    pub fn set_axis_title(&mut self, axis: AxisId, title: &AxisTitle) {
        let text = title.text();
        let font = title.font.clone();
        self.ensure_axis(axis).set_title_text(text.as_deref(), font);
    }

    /// Set the x-axis title.
    ///
    /// With subplots, blanks the bottom-row subplot titles and maintains a
    /// single floating title centered across the plot area; otherwise the
    /// title goes to the first x axis (warning if several exist).
    pub fn set_x_title(&mut self, title: &AxisTitle) {
        if let Some(grid) = self.grid.clone() {
            if let Some(bottom) = grid.last() {
                for (x, _) in bottom.iter().flatten() {
                    let blank = AxisTitle::new().name(BLANK_TITLE);
                    self.set_axis_title(*x, &blank);
                }
            }
            self.set_floating_title(Direction::X, title);
        } else {
            let xaxes: Vec<AxisId> =
                self.axes.keys().copied().filter(|id| id.direction == Direction::X).collect();
            if xaxes.len() > 1 {
                warn!(count = xaxes.len(), "setting title for 1 of several x axes");
            }
            if let Some(first) = xaxes.first() {
                self.set_axis_title(*first, title);
            }
        }
    }

    /// Set the y-axis title; the subplot behavior mirrors
    /// [`set_x_title`](Figure::set_x_title) with the left column.
    pub fn set_y_title(&mut self, title: &AxisTitle) {
        if let Some(grid) = self.grid.clone() {
            for row in &grid {
                if let Some((_, y)) = row.iter().flatten().next() {
                    let blank = AxisTitle::new().name(BLANK_TITLE);
                    self.set_axis_title(*y, &blank);
                }
            }
            self.set_floating_title(Direction::Y, title);
        } else {
            let yaxes: Vec<AxisId> =
                self.axes.keys().copied().filter(|id| id.direction == Direction::Y).collect();
            if yaxes.len() > 1 {
                warn!(count = yaxes.len(), "setting title for 1 of several y axes");
            }
            if let Some(first) = yaxes.first() {
                self.set_axis_title(*first, title);
            }
        }
    }

    /// Remove axis titles (and floating subplot titles) for the given
    /// direction, or for both directions with `None`.
    pub fn clear_axis_titles(&mut self, direction: Option<Direction>) {
        let ids: Vec<AxisId> = self
            .axes
            .keys()
            .copied()
            .filter(|id| direction.map_or(true, |d| id.direction == d))
            .collect();
        for id in ids {
            self.set_axis_title(id, &AxisTitle::new());
        }

        let names: Vec<&str> = match direction {
            Some(Direction::X) => vec!["x-title"],
            Some(Direction::Y) => vec!["y-title"],
            None => vec!["x-title", "y-title"],
        };
        if let Some(Value::Array(annotations)) = self.layout.get_mut("annotations") {
            annotations.retain(|a| {
                a.get("name").and_then(Value::as_str).map_or(true, |n| !names.contains(&n))
            });
        }
    }

    fn set_floating_title(&mut self, direction: Direction, title: &AxisTitle) {
        let name = match direction {
            Direction::X => "x-title",
            Direction::Y => "y-title",
        };

        let Some(text) = title.text() else {
            if let Some(Value::Array(annotations)) = self.layout.get_mut("annotations") {
                annotations.retain(|a| a.get("name").and_then(Value::as_str) != Some(name));
            }
            return;
        };

        let font = title.font.clone().unwrap_or_else(|| self.style.title_font());
        let mut annotation = match direction {
            Direction::X => json!({
                "name": name,
                "showarrow": false,
                "text": text,
                "x": 0.5,
                "xanchor": "center",
                "xref": "paper",
                "y": 0.0,
                "yanchor": "bottom",
                "yref": "paper",
            }),
            Direction::Y => json!({
                "name": name,
                "showarrow": false,
                "text": text,
                "textangle": -90,
                "x": 0.0,
                "xanchor": "left",
                "xref": "paper",
                "y": 0.5,
                "yanchor": "middle",
                "yref": "paper",
            }),
        };
        if let Value::Object(map) = &mut annotation {
            map.insert("font".to_string(), Value::Object(font));
        }

        self.upsert_annotation(name, annotation);
    }

    pub(crate) fn upsert_annotation(&mut self, name: &str, annotation: Value) {
        let annotations = self
            .layout
            .entry("annotations".to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(annotations) = annotations {
            for existing in annotations.iter_mut() {
                if existing.get("name").and_then(Value::as_str) == Some(name) {
                    *existing = annotation;
                    return;
                }
            }
            annotations.push(annotation);
        }
    }

    /// Place the legend inside the plot frame.
    pub fn set_legend(&mut self, position: LegendPosition, options: &LegendOptions) {
        self.layout.insert("showlegend".to_string(), Value::Bool(true));

        let mut legend = match position {
            LegendPosition::Default => Map::new(),
            _ => options.extra.clone(),
        };

        let corner = match position {
            LegendPosition::UpperRight => Some((true, true)),
            LegendPosition::LowerRight => Some((false, true)),
            LegendPosition::UpperLeft => Some((true, false)),
            LegendPosition::LowerLeft => Some((false, false)),
            LegendPosition::Custom | LegendPosition::Default => None,
        };

        if let Some((upper, right)) = corner {
            // pixel padding approximated in paper coordinates; the true
            // plot domain is smaller than the full figure size
            let width = self.layout_f64("width").unwrap_or(self.style.width);
            let height = self.layout_f64("height").unwrap_or(self.style.height);
            let xpadding = options.xpad.unwrap_or(options.padding) / width;
            let ypadding = options.ypad.unwrap_or(options.padding) / height;

            legend.insert("x".to_string(), json!(if right { 1.0 - xpadding } else { xpadding }));
            legend.insert(
                "xanchor".to_string(),
                Value::String(if right { "right" } else { "left" }.to_string()),
            );
            legend.insert("y".to_string(), json!(if upper { 1.0 - ypadding } else { ypadding }));
            legend.insert(
                "yanchor".to_string(),
                Value::String(if upper { "top" } else { "bottom" }.to_string()),
            );
        }

        self.layout.insert("legend".to_string(), Value::Object(legend));
    }

    /// Hide the legend.
    pub fn hide_legend(&mut self) {
        self.layout.insert("showlegend".to_string(), Value::Bool(false));
        self.layout.insert("legend".to_string(), Value::Object(Map::new()));
    }

    // Internals shared with finalize/subplots/render ---------------------

    pub(crate) fn layout_f64(&self, key: &str) -> Option<f64> {
        self.layout.get(key).and_then(Value::as_f64)
    }

    pub(crate) fn base_layout_map(&self) -> &Map<String, Value> {
        &self.layout
    }

    pub(crate) fn clear_axes(&mut self) {
        self.axes.clear();
        self.layout.retain(|key, _| axis_id_from_layout_key(key).is_none());
    }
}

/// Parse a layout key such as `xaxis2` into an axis identifier.
fn axis_id_from_layout_key(key: &str) -> Option<AxisId> {
    let (direction, rest) = if let Some(rest) = key.strip_prefix("xaxis") {
        (Direction::X, rest)
    } else if let Some(rest) = key.strip_prefix("yaxis") {
        (Direction::Y, rest)
    } else {
        return None;
    };

    if rest.is_empty() {
        Some(AxisId::new(direction, 1))
    } else {
        rest.parse::<u32>().ok().filter(|i| *i > 0).map(|i| AxisId::new(direction, i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_figure_has_default_axes() {
        let figure = Figure::new();
        assert_eq!(figure.axis_ids(), vec![AxisId::x(), AxisId::y()]);
    }

    #[test]
    fn test_axis_id_from_layout_key() {
        assert_eq!(axis_id_from_layout_key("xaxis"), Some(AxisId::x()));
        assert_eq!(axis_id_from_layout_key("yaxis102"), Some(AxisId::new(Direction::Y, 102)));
        assert_eq!(axis_id_from_layout_key("margin"), None);
        assert_eq!(axis_id_from_layout_key("xaxis0"), None);
        assert_eq!(axis_id_from_layout_key("xaxisfoo"), None);
    }

    #[test]
    fn test_merge_layout_routes_axis_keys() {
        let mut figure = Figure::new();
        let overrides = match json!({
            "width": 600,
            "xaxis": {"type": "log"},
            "xaxis2": {"showgrid": true},
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        figure.merge_layout(&overrides);

        assert_eq!(figure.layout_f64("width"), Some(600.0));
        assert!(figure.axis(AxisId::x()).unwrap().is_log());
        assert!(figure.axis(AxisId::new(Direction::X, 2)).is_some());
    }

    #[test]
    fn test_set_axis_range_syncs_and_clears() {
        let mut figure = Figure::new();
        figure.set_axis_range(AxisId::y(), 0.0, 4.0);
        assert_eq!(figure.axis(AxisId::y()).unwrap().range(), Some((0.0, 4.0)));
        assert!(figure.axis(AxisId::y()).unwrap().has("range"));

        figure.clear_axis_range(AxisId::y());
        assert!(!figure.axis(AxisId::y()).unwrap().has("range"));
    }

    #[test]
    fn test_set_x_range_targets_all_x_axes() {
        let mut figure = Figure::new();
        figure.create_axis(AxisId::new(Direction::X, 2));
        figure.set_x_range(-1.0, 1.0);

        assert_eq!(figure.axis(AxisId::x()).unwrap().range(), Some((-1.0, 1.0)));
        assert_eq!(figure.axis(AxisId::new(Direction::X, 2)).unwrap().range(), Some((-1.0, 1.0)));
        assert_eq!(figure.axis(AxisId::y()).unwrap().range(), None);
    }

    #[test]
    fn test_set_axis_ticks_sets_minor_interval() {
        let mut figure = Figure::new();
        figure.set_axis_ticks(Axes::One(AxisId::x()), 2.0, 4);

        let spec = figure.axis(AxisId::x()).unwrap();
        assert_eq!(spec.get("dtick"), Some(&json!(2.0)));
        assert!(spec.has("dtick"));
    }

    #[test]
    fn test_axis_title_formatting() {
        let title = AxisTitle::new().name("Energy").symbol("E(x)").unit("eV");
        assert_eq!(title.text().unwrap(), "Energy, <i>E</i>(<i>x</i>)<i></i> [eV]");
    }

    #[test]
    fn test_axis_title_simple_symbol() {
        let title = AxisTitle::new().name("Time").symbol("t").unit("s");
        assert_eq!(title.text().unwrap(), "Time, <i>t</i> [s]");
    }

    #[test]
    fn test_axis_title_unitalicized_tokens() {
        let title = AxisTitle::new().symbol("sin");
        assert_eq!(title.text().unwrap(), "<i></i>sin<i></i>");
    }

    #[test]
    fn test_empty_axis_title_removes_text() {
        let mut figure = Figure::new();
        figure.set_axis_title(AxisId::x(), &AxisTitle::new().name("Time"));
        assert!(figure.axis(AxisId::x()).unwrap().get("title").unwrap().get("text").is_some());

        figure.set_axis_title(AxisId::x(), &AxisTitle::new());
        assert!(figure.axis(AxisId::x()).unwrap().get("title").unwrap().get("text").is_none());
    }

    #[test]
    fn test_set_legend_corner_positions() {
        let mut figure = Figure::new();
        figure.set_legend(LegendPosition::UpperRight, &LegendOptions::default());

        let legend = figure.base_layout_map()["legend"].clone();
        assert_eq!(legend["xanchor"], "right");
        assert_eq!(legend["yanchor"], "top");
        let x = legend["x"].as_f64().unwrap();
        assert!(x < 1.0 && x > 0.9);
        assert_eq!(figure.base_layout_map()["showlegend"], true);
    }

    #[test]
    fn test_hide_legend() {
        let mut figure = Figure::new();
        figure.hide_legend();
        assert_eq!(figure.base_layout_map()["showlegend"], false);
    }

    #[test]
    fn test_set_title_position() {
        let mut figure = Figure::new();
        figure.set_title("Spectrum");

        let title = &figure.base_layout_map()["title"];
        assert_eq!(title["text"], "Spectrum");
        // default 450px height, 80px top margin: y = (450 - 40) / 450
        let y = title["y"].as_f64().unwrap();
        assert!((y - (450.0 - 40.0) / 450.0).abs() < 1e-12);
    }

    #[test]
    fn test_set_x_title_single_axis() {
        let mut figure = Figure::new();
        figure.set_x_title(&AxisTitle::new().name("Time"));
        let spec = figure.axis(AxisId::x()).unwrap();
        assert_eq!(spec.get("title").unwrap()["text"], "Time");
    }

    #[test]
    fn test_clear_axis_titles() {
        let mut figure = Figure::new();
        figure.set_x_title(&AxisTitle::new().name("Time"));
        figure.set_y_title(&AxisTitle::new().name("Value"));
        figure.clear_axis_titles(None);

        assert!(figure.axis(AxisId::x()).unwrap().get("title").unwrap().get("text").is_none());
        assert!(figure.axis(AxisId::y()).unwrap().get("title").unwrap().get("text").is_none());
    }

    #[test]
    fn test_uids_are_sequential() {
        let mut figure = Figure::new();
        figure.add_scatter(Scatter::new().x(&[1.0]).y(&[1.0]).build().unwrap());
        figure.add_scatter(Scatter::new().x(&[2.0]).y(&[2.0]).build().unwrap());

        let uids: Vec<u64> = figure.traces().iter().map(Trace::uid).collect();
        assert_eq!(uids, vec![1, 2]);
    }

    #[test]
    fn test_set_data_replaces() {
        let mut figure = Figure::new();
        figure.add_scatter(Scatter::new().x(&[1.0]).y(&[1.0]).build().unwrap());
        figure.set_data(vec![Scatter::new().x(&[2.0]).y(&[2.0]).build().unwrap().into()]);
        assert_eq!(figure.traces().len(), 1);
    }
}
