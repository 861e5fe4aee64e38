//! Tick-interval heuristics.
//!
//! Given an axis range, chooses a "nice" human-legible major interval of the
//! form {1, 2, 5} x 10^k that yields three to six labeled ticks, plus the
//! matching minor subdivision count. Logarithmic axes follow a separate
//! rule keyed on how many decades the range spans.

use serde_json::{json, Value};

/// Major interval and minor subdivision for a linear axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTicks {
    /// Distance between consecutive major ticks.
    pub interval: f64,
    /// Number of minor ticks per major tick.
    pub num_minor: u32,
}

impl LinearTicks {
    /// Minor tick interval derived from the major interval.
    #[must_use]
    pub fn minor_interval(&self) -> f64 {
        self.interval / f64::from(self.num_minor)
    }
}

/// Tick specification for a logarithmic axis.
///
/// Values map onto the rendering engine's special `dtick` forms: whole
/// decades use per-decade digit minors (`"D1"`), short ranges use ticks
/// linearly spaced in value within the decade (`"L<f>"`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogTicks {
    /// One major tick per decade, all digits as minors.
    Decades,
    /// Linear spacing in value; the payload is the major interval.
    Linear(f64),
}

impl LogTicks {
    /// Engine value for the major `dtick` setting.
    #[must_use]
    pub fn dtick(&self) -> Value {
        match self {
            LogTicks::Decades => json!(1),
            LogTicks::Linear(d) => json!(format!("L{d}")),
        }
    }

    /// Engine value for the companion minor-axis `dtick` setting.
    #[must_use]
    pub fn minor_dtick(&self) -> Value {
        match self {
            LogTicks::Decades => json!("D1"),
            LogTicks::Linear(d) => json!(format!("L{}", d / 5.0)),
        }
    }
}

/// Round a raw interval down to the nearest {1, 2, 5} x 10^k value,
/// returning the interval and its minor subdivision count.
fn nice_interval(raw: f64) -> LinearTicks {
    if !raw.is_finite() || raw <= 0.0 {
        return LinearTicks { interval: 1.0, num_minor: 5 };
    }

    let order = raw.log10().floor();
    let magnitude = 10f64.powf(order);
    let scaled = raw / magnitude;

    if scaled > 5.0 {
        LinearTicks { interval: 5.0 * magnitude, num_minor: 5 }
    } else if scaled > 2.0 {
        LinearTicks { interval: 2.0 * magnitude, num_minor: 4 }
    } else {
        LinearTicks { interval: magnitude, num_minor: 5 }
    }
}

/// Choose the major interval and minor count for a linear axis range.
///
/// The raw interval targets at least three labels; rounding to the nice
/// form keeps the label count at six or fewer.
#[must_use]
pub fn linear_ticks(minimum: f64, maximum: f64) -> LinearTicks {
    nice_interval((maximum - minimum) / 3.0)
}

/// Choose the tick specification for a logarithmic axis whose range is
/// given in log10 units.
#[must_use]
pub fn log_ticks(log_minimum: f64, log_maximum: f64) -> LogTicks {
    if log_maximum - log_minimum > 2.0 {
        return LogTicks::Decades;
    }

    let span = 10f64.powf(log_maximum) - 10f64.powf(log_minimum);
    let ticks = nice_interval(span / 3.0);
    LogTicks::Linear(ticks.interval)
}
