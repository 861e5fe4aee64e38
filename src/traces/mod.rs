//! Chart trace types.
//!
//! A trace is one plotted data series. Traces serialize to the rendering
//! engine's JSON form; the figure assigns each trace a `uid` at intake so
//! synthesized placeholder traces can be matched and removed after render.

mod heatmap;
mod scatter;

pub use heatmap::Heatmap;
pub use scatter::Scatter;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::axis::AxisId;

/// Kind of chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    /// Scatter-like series (points/lines over x-y data).
    Scatter,
    /// Heatmap-like series (2-D grid of cell values).
    Heatmap,
}

/// One plotted data series.
#[derive(Debug, Clone)]
pub enum Trace {
    /// Scatter series.
    Scatter(Scatter),
    /// Heatmap series.
    Heatmap(Heatmap),
}

impl Trace {
    /// The series kind.
    #[must_use]
    pub fn kind(&self) -> TraceKind {
        match self {
            Trace::Scatter(_) => TraceKind::Scatter,
            Trace::Heatmap(_) => TraceKind::Heatmap,
        }
    }

    /// Unique identifier assigned at figure intake (0 before intake).
    #[must_use]
    pub fn uid(&self) -> u64 {
        match self {
            Trace::Scatter(t) => t.uid,
            Trace::Heatmap(t) => t.uid,
        }
    }

    pub(crate) fn set_uid(&mut self, uid: u64) {
        match self {
            Trace::Scatter(t) => t.uid = uid,
            Trace::Heatmap(t) => t.uid = uid,
        }
    }

    /// The axis pair this trace draws on, defaulting to (`x`, `y`).
    #[must_use]
    pub fn axis_pair(&self) -> (AxisId, AxisId) {
        let (x, y) = match self {
            Trace::Scatter(t) => (t.xaxis, t.yaxis),
            Trace::Heatmap(t) => (t.xaxis, t.yaxis),
        };
        (x.unwrap_or(AxisId::x()), y.unwrap_or(AxisId::y()))
    }

    pub(crate) fn set_axes(&mut self, x: AxisId, y: AxisId) {
        match self {
            Trace::Scatter(t) => {
                t.xaxis = Some(x);
                t.yaxis = Some(y);
            }
            Trace::Heatmap(t) => {
                t.xaxis = Some(x);
                t.yaxis = Some(y);
            }
        }
    }

    /// The user-supplied series name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Trace::Scatter(t) => t.name.as_deref(),
            Trace::Heatmap(t) => t.name.as_deref(),
        }
    }

    /// Short human-readable description used in error messages.
    #[must_use]
    pub fn label(&self) -> String {
        let kind = match self.kind() {
            TraceKind::Scatter => "scatter",
            TraceKind::Heatmap => "heatmap",
        };
        match self.name() {
            Some(name) => format!("{kind} \"{name}\""),
            None => kind.to_string(),
        }
    }

    /// Engine JSON for this trace.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Trace::Scatter(t) => t.to_value(),
            Trace::Heatmap(t) => t.to_value(),
        }
    }

    /// An invisible zero-data trace of the given kind, attached to a
    /// companion axis pair solely to force the engine to draw those axes.
    pub(crate) fn placeholder(kind: TraceKind, x: AxisId, y: AxisId) -> Self {
        match kind {
            TraceKind::Scatter => Trace::Scatter(Scatter::placeholder(x, y)),
            TraceKind::Heatmap => Trace::Heatmap(Heatmap::placeholder(x, y)),
        }
    }
}

impl From<Scatter> for Trace {
    fn from(trace: Scatter) -> Self {
        Trace::Scatter(trace)
    }
}

impl From<Heatmap> for Trace {
    fn from(trace: Heatmap) -> Self {
        Trace::Heatmap(trace)
    }
}

impl Serialize for Trace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}
