//! Layout finalization: auto ranges, auto ticks, placeholder traces.
//!
//! Runs once before render. Axes the user configured explicitly (detected
//! via `has("range")` / `has("dtick")` at the start of each pass) are left
//! untouched; everything else is computed from the trace data. Companion
//! axes only render when a trace references them, so one invisible
//! placeholder trace is synthesized per axis pair per companion
//! combination and removed again after render.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use crate::axis::{Axes, AxisId, Direction};
use crate::error::{Error, Result};
use crate::ticks;
use crate::traces::{Trace, TraceKind};

use super::Figure;

impl Figure {
    /// Compute auto ranges and ticks, synthesize placeholder traces and
    /// apply range alignment.
    ///
    /// Must be paired with [`cleanup`](Figure::cleanup) after the render
    /// call; [`show`](Figure::show) does both.
    ///
    /// # Errors
    ///
    /// Returns an error if a heatmap claims an axis already used by
    /// another heatmap, if a heatmap trace was not built, or if aligned
    /// axes disagree on their axis type.
    pub fn finalize(&mut self) -> Result<()> {
        let explicit_ticks: IndexMap<AxisId, bool> =
            self.axes.iter().map(|(id, spec)| (*id, spec.has("dtick"))).collect();

        self.layout_scatters()?;
        self.layout_heatmaps()?;

        if !self.alignment.is_empty() {
            self.apply_range_alignment(&explicit_ticks)?;
        }

        Ok(())
    }

    /// Remove the placeholder traces synthesized by
    /// [`finalize`](Figure::finalize).
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlaceholderMismatch`] if the number of traces
    /// removed differs from the number synthesized.
    pub fn cleanup(&mut self) -> Result<()> {
        let expected = self.placeholder_uids.len();
        let before = self.traces.len();

        self.traces.retain(|trace| !self.placeholder_uids.contains(&trace.uid()));

        let removed = before - self.traces.len();
        if removed == expected {
            self.placeholder_uids.clear();
            Ok(())
        } else {
            Err(Error::PlaceholderMismatch { expected, removed })
        }
    }

    /// The assembled layout tree: base layout plus every axis record.
    pub(crate) fn assembled_layout(&self) -> Map<String, Value> {
        let mut layout = self.layout.clone();
        for spec in self.axes.values() {
            spec.write_layout(&mut layout);
        }
        layout
    }

    /// Engine JSON for the trace list.
    pub(crate) fn data_values(&self) -> Vec<Value> {
        self.traces.iter().map(Trace::to_value).collect()
    }

    // Scatter pass -------------------------------------------------------

    fn layout_scatters(&mut self) -> Result<()> {
        let mut groups: IndexMap<(AxisId, AxisId), Vec<usize>> = IndexMap::new();
        for (index, trace) in self.traces.iter().enumerate() {
            if trace.kind() == TraceKind::Scatter
                && !self.placeholder_uids.contains(&trace.uid())
            {
                groups.entry(trace.axis_pair()).or_default().push(index);
            }
        }

        for (x, y) in groups.keys().copied().collect::<Vec<_>>() {
            self.ensure_axis(x);
            self.ensure_axis(y);
        }

        let (skip_range, skip_ticks) = self.pass_flags();

        for (pair, indices) in &groups {
            for axis in [pair.0, pair.1] {
                if !skip_range[&axis] {
                    let (minimum, maximum) = self.scatter_extent(axis, indices)?;
                    self.extend_axis_range(axis, minimum, maximum);
                }
                if !skip_ticks[&axis] {
                    self.auto_ticks(axis);
                }
            }
            self.add_placeholders(*pair, TraceKind::Scatter);
        }

        Ok(())
    }

    /// Padded value extent of one axis over a group of scatter traces.
    fn scatter_extent(&self, axis: AxisId, indices: &[usize]) -> Result<(f64, f64)> {
        let is_log = self.axes[&axis].is_log();
        let mut minimum = f64::INFINITY;
        let mut maximum = f64::NEG_INFINITY;

        for &index in indices {
            if let Trace::Scatter(scatter) = &self.traces[index] {
                let values = match axis.direction {
                    Direction::X => scatter.x_values(),
                    Direction::Y => scatter.y_values(),
                };
                for &value in values {
                    let value = if is_log { value.log10() } else { value };
                    if value.is_finite() {
                        minimum = minimum.min(value);
                        maximum = maximum.max(value);
                    }
                }
            }
        }

        if !minimum.is_finite() || !maximum.is_finite() {
            return Err(Error::EmptyData);
        }

        // log axes pad in log space regardless of direction; linear axes
        // pad in the y direction only
        let padding = if is_log || axis.direction == Direction::Y {
            0.05 * (maximum - minimum)
        } else {
            0.0
        };

        Ok((minimum - padding, maximum + padding))
    }

    // Heatmap pass -------------------------------------------------------

    fn layout_heatmaps(&mut self) -> Result<()> {
        let heatmaps: Vec<usize> = self
            .traces
            .iter()
            .enumerate()
            .filter(|(_, trace)| {
                trace.kind() == TraceKind::Heatmap
                    && !self.placeholder_uids.contains(&trace.uid())
            })
            .map(|(index, _)| index)
            .collect();

        if heatmaps.is_empty() {
            return Ok(());
        }

        for &index in &heatmaps {
            let (x, y) = self.traces[index].axis_pair();
            self.ensure_axis(x);
            self.ensure_axis(y);
        }

        let (skip_range, skip_ticks) = self.pass_flags();
        let mut claimed: IndexMap<AxisId, String> = IndexMap::new();

        for &index in &heatmaps {
            let pair = self.traces[index].axis_pair();
            let label = self.traces[index].label();

            for axis in [pair.0, pair.1] {
                if let Some(by) = claimed.get(&axis) {
                    return Err(Error::AxisClaimed { axis: axis.to_string(), by: by.clone() });
                }
                claimed.insert(axis, label.clone());
            }

            let (nx, ny, x_coords, y_coords) = match &self.traces[index] {
                Trace::Heatmap(heatmap) => {
                    let (nx, ny) = heatmap.cell_counts();
                    let x = heatmap.x_coords().map(<[f64]>::to_vec);
                    let y = heatmap.y_coords().map(<[f64]>::to_vec);
                    (nx, ny, x, y)
                }
                Trace::Scatter(_) => continue,
            };
            let (Some(x_coords), Some(y_coords)) = (x_coords, y_coords) else {
                return Err(Error::HeatmapCoords(format!("{label} has no coordinate arrays")));
            };

            for (axis, cells, coords) in [(pair.0, nx, x_coords), (pair.1, ny, y_coords)] {
                if !skip_range[&axis] {
                    let (minimum, maximum) = cell_extent(&coords, cells);
                    self.extend_axis_range(axis, minimum, maximum);
                }
                if !skip_ticks[&axis] {
                    self.auto_ticks(axis);
                }
                if let Some(spec) = self.axes.get_mut(&axis) {
                    spec.set("ticks", Value::String("outside".to_string()));
                    spec.set("constrain", Value::String("domain".to_string()));
                }
            }

            // cells render square: the y axis keeps the x axis' scale
            if let Some(spec) = self.axes.get_mut(&pair.1) {
                spec.set_main("scaleanchor", Value::String(pair.0.to_string()));
            }

            self.add_placeholders(pair, TraceKind::Heatmap);
        }

        Ok(())
    }

    // Shared helpers -----------------------------------------------------

    /// Explicit-configuration snapshot taken at the start of a pass.
    fn pass_flags(&self) -> (IndexMap<AxisId, bool>, IndexMap<AxisId, bool>) {
        let skip_range = self.axes.iter().map(|(id, spec)| (*id, spec.has("range"))).collect();
        let skip_ticks = self.axes.iter().map(|(id, spec)| (*id, spec.has("dtick"))).collect();
        (skip_range, skip_ticks)
    }

    /// Widen an axis range to include the given extent; never shrinks.
    pub(crate) fn extend_axis_range(&mut self, axis: AxisId, minimum: f64, maximum: f64) {
        let current = {
            let spec = self.ensure_axis(axis);
            if spec.has("range") {
                spec.range()
            } else {
                None
            }
        };

        match current {
            Some((lo, hi)) => self.set_axis_range(axis, lo.min(minimum), hi.max(maximum)),
            None => self.set_axis_range(axis, minimum, maximum),
        }
    }

    /// Compute and apply tick intervals for the axis' current range.
    pub(crate) fn auto_ticks(&mut self, axis: AxisId) {
        let Some(spec) = self.axes.get(&axis) else { return };
        let Some((minimum, maximum)) = spec.range() else { return };

        if spec.is_log() {
            self.set_axis_log_ticks(Axes::One(axis), ticks::log_ticks(minimum, maximum));
        } else {
            let plan = ticks::linear_ticks(minimum, maximum);
            self.set_axis_ticks(Axes::One(axis), plan.interval, plan.num_minor);
        }
    }

    /// Synthesize the invisible traces that force companion axes to
    /// render: one per (x-mirror, y-mirror) pair and one per (x-minor,
    /// y-minor) pair.
    fn add_placeholders(&mut self, pair: (AxisId, AxisId), kind: TraceKind) {
        let x_mirrors: Vec<AxisId> = self.axes[&pair.0].mirror_ids().collect();
        let y_mirrors: Vec<AxisId> = self.axes[&pair.1].mirror_ids().collect();
        let x_minors: Vec<AxisId> = self.axes[&pair.0].minor_ids().collect();
        let y_minors: Vec<AxisId> = self.axes[&pair.1].minor_ids().collect();

        let pairs = x_mirrors
            .iter()
            .flat_map(|x| y_mirrors.iter().map(move |y| (*x, *y)))
            .chain(x_minors.iter().flat_map(|x| y_minors.iter().map(move |y| (*x, *y))))
            .collect::<Vec<_>>();

        for (x, y) in pairs {
            let mut placeholder = Trace::placeholder(kind, x, y);
            placeholder.set_uid(self.next_uid);
            self.next_uid += 1;
            self.placeholder_uids.push(placeholder.uid());
            self.traces.push(placeholder);
        }
    }

    // Range alignment ----------------------------------------------------

    /// Re-apply grouped ranges last, overriding the per-group auto ranges.
    fn apply_range_alignment(&mut self, explicit_ticks: &IndexMap<AxisId, bool>) -> Result<()> {
        for group in self.alignment.groups().to_vec() {
            let log_flags: Vec<bool> =
                group.iter().filter_map(|id| self.axes.get(id)).map(|s| s.is_log()).collect();
            if log_flags.iter().any(|&f| f) && log_flags.iter().any(|&f| !f) {
                let members = group.iter().map(ToString::to_string).collect::<Vec<_>>();
                return Err(Error::AxisTypeMismatch(members.join(", ")));
            }

            let mut minimum = f64::INFINITY;
            let mut maximum = f64::NEG_INFINITY;
            let mut any = false;
            for id in &group {
                if let Some((lo, hi)) = self.axes.get(id).and_then(|s| s.range()) {
                    minimum = minimum.min(lo);
                    maximum = maximum.max(hi);
                    any = true;
                }
            }
            if !any {
                continue;
            }

            debug!(members = ?group.iter().map(ToString::to_string).collect::<Vec<_>>(),
                   range = ?(minimum, maximum),
                   "aligned axis range");

            for id in &group {
                self.set_axis_range(*id, minimum, maximum);
                if !explicit_ticks.get(id).copied().unwrap_or(false) {
                    self.auto_ticks(*id);
                }
            }
        }

        Ok(())
    }
}

/// Numeric extent of a coordinate array: arrays of length N+1 are cell
/// edges used directly, arrays of length N are cell centers extended by
/// half a cell on each end.
fn cell_extent(coords: &[f64], cells: usize) -> (f64, f64) {
    let first = coords[0];
    let last = coords[coords.len() - 1];

    if coords.len() == cells + 1 || coords.len() < 2 {
        (first, last)
    } else {
        let lead = coords[1] - coords[0];
        let tail = coords[coords.len() - 1] - coords[coords.len() - 2];
        (first - 0.5 * lead, last + 0.5 * tail)
    }
}
