//! Scatter trace builder.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::axis::AxisId;
use crate::error::{Error, Result};

/// Builder for a scatter-like series.
#[derive(Debug, Clone, Default)]
pub struct Scatter {
    pub(crate) uid: u64,
    pub(crate) x: Vec<f64>,
    pub(crate) y: Vec<f64>,
    pub(crate) name: Option<String>,
    pub(crate) mode: Option<String>,
    pub(crate) invisible: bool,
    pub(crate) xaxis: Option<AxisId>,
    pub(crate) yaxis: Option<AxisId>,
    pub(crate) extra: Map<String, Value>,
}

impl Scatter {
    /// Create a new scatter builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the x-axis data.
    #[must_use]
    pub fn x(mut self, data: &[f64]) -> Self {
        self.x = data.to_vec();
        self
    }

    /// Set the y-axis data.
    #[must_use]
    pub fn y(mut self, data: &[f64]) -> Self {
        self.y = data.to_vec();
        self
    }

    /// Set the series name shown in the legend.
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set the drawing mode (`"lines"`, `"markers"`, `"lines+markers"`).
    #[must_use]
    pub fn mode(mut self, mode: &str) -> Self {
        self.mode = Some(mode.to_string());
        self
    }

    /// Attach the series to a specific x axis.
    #[must_use]
    pub fn x_axis(mut self, axis: AxisId) -> Self {
        self.xaxis = Some(axis);
        self
    }

    /// Attach the series to a specific y axis.
    #[must_use]
    pub fn y_axis(mut self, axis: AxisId) -> Self {
        self.yaxis = Some(axis);
        self
    }

    /// Set an arbitrary engine option (marker styling, line styling, ...).
    #[must_use]
    pub fn option(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    /// Validate the series.
    ///
    /// # Errors
    ///
    /// Returns an error if data is empty or x/y lengths don't match.
    pub fn build(self) -> Result<Self> {
        if self.x.is_empty() || self.y.is_empty() {
            return Err(Error::EmptyData);
        }

        if self.x.len() != self.y.len() {
            return Err(Error::DataLengthMismatch { x_len: self.x.len(), y_len: self.y.len() });
        }

        Ok(self)
    }

    /// The x values.
    #[must_use]
    pub fn x_values(&self) -> &[f64] {
        &self.x
    }

    /// The y values.
    #[must_use]
    pub fn y_values(&self) -> &[f64] {
        &self.y
    }

    /// Engine JSON for this trace.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".to_string(), Value::String("scatter".to_string()));
        map.insert("uid".to_string(), Value::from(self.uid));
        if self.invisible {
            map.insert("visible".to_string(), Value::Bool(false));
        }
        if let Some(name) = &self.name {
            map.insert("name".to_string(), Value::String(name.clone()));
        }
        if let Some(mode) = &self.mode {
            map.insert("mode".to_string(), Value::String(mode.clone()));
        }
        if !self.x.is_empty() {
            map.insert("x".to_string(), Value::from(self.x.clone()));
        }
        if !self.y.is_empty() {
            map.insert("y".to_string(), Value::from(self.y.clone()));
        }
        if let Some(axis) = self.xaxis {
            map.insert("xaxis".to_string(), Value::String(axis.to_string()));
        }
        if let Some(axis) = self.yaxis {
            map.insert("yaxis".to_string(), Value::String(axis.to_string()));
        }
        for (key, value) in &self.extra {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }

    /// An invisible zero-data series used to force companion axes to
    /// render.
    pub(crate) fn placeholder(x: AxisId, y: AxisId) -> Self {
        Self { invisible: true, xaxis: Some(x), yaxis: Some(y), ..Self::default() }
    }
}

impl Serialize for Scatter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Direction;
    use serde_json::json;

    #[test]
    fn test_scatter_builder() {
        let trace = Scatter::new()
            .x(&[1.0, 2.0, 3.0])
            .y(&[4.0, 5.0, 6.0])
            .name("signal")
            .mode("lines")
            .build()
            .unwrap();

        assert_eq!(trace.x_values().len(), 3);
    }

    #[test]
    fn test_scatter_empty_data() {
        let result = Scatter::new().build();
        assert!(matches!(result, Err(Error::EmptyData)));
    }

    #[test]
    fn test_scatter_length_mismatch() {
        let result = Scatter::new().x(&[1.0, 2.0, 3.0]).y(&[4.0, 5.0]).build();
        assert!(matches!(result, Err(Error::DataLengthMismatch { x_len: 3, y_len: 2 })));
    }

    #[test]
    fn test_scatter_json_shape() {
        let trace = Scatter::new()
            .x(&[1.0])
            .y(&[2.0])
            .name("s")
            .x_axis(AxisId::new(Direction::X, 2))
            .option("marker", json!({"size": 8}))
            .build()
            .unwrap();

        let value = trace.to_value();
        assert_eq!(value["type"], "scatter");
        assert_eq!(value["name"], "s");
        assert_eq!(value["xaxis"], "x2");
        assert_eq!(value["marker"]["size"], 8);
        assert!(value.get("visible").is_none());
    }

    #[test]
    fn test_placeholder_shape() {
        let value = Scatter::placeholder(
            AxisId::new(Direction::X, 101),
            AxisId::new(Direction::Y, 201),
        )
        .to_value();
        assert_eq!(value["visible"], false);
        assert!(value.get("x").is_none());
    }
}
