//! Heatmap trace builder.
//!
//! Coordinates may be given either as an origin plus per-cell spacing, from
//! which cell-edge arrays are derived, or as explicit arrays for both axes
//! (length N for cell centers, N+1 for cell edges).

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::axis::AxisId;
use crate::error::{Error, Result};

/// Builder for a heatmap-like series.
#[derive(Debug, Clone)]
pub struct Heatmap {
    pub(crate) uid: u64,
    pub(crate) z: Vec<Vec<f64>>,
    pub(crate) transpose: bool,
    pub(crate) x: Option<Vec<f64>>,
    pub(crate) y: Option<Vec<f64>>,
    pub(crate) origin: Option<(f64, f64)>,
    pub(crate) dx: Option<f64>,
    pub(crate) dy: Option<f64>,
    pub(crate) name: Option<String>,
    pub(crate) invisible: bool,
    pub(crate) xaxis: Option<AxisId>,
    pub(crate) yaxis: Option<AxisId>,
    pub(crate) extra: Map<String, Value>,
}

impl Default for Heatmap {
    fn default() -> Self {
        Self {
            uid: 0,
            z: Vec::new(),
            transpose: true,
            x: None,
            y: None,
            origin: None,
            dx: None,
            dy: None,
            name: None,
            invisible: false,
            xaxis: None,
            yaxis: None,
            extra: Map::new(),
        }
    }
}

impl Heatmap {
    /// Create a new heatmap builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cell value matrix.
    ///
    /// With the default `transpose = true`, the outer index maps to the x
    /// axis and the inner index to the y axis.
    #[must_use]
    pub fn z(mut self, z: Vec<Vec<f64>>) -> Self {
        self.z = z;
        self
    }

    /// Set whether the matrix is transposed before rendering.
    #[must_use]
    pub fn transpose(mut self, transpose: bool) -> Self {
        self.transpose = transpose;
        self
    }

    /// Set explicit x coordinates (length N for centers, N+1 for edges).
    #[must_use]
    pub fn x(mut self, data: &[f64]) -> Self {
        self.x = Some(data.to_vec());
        self
    }

    /// Set explicit y coordinates (length N for centers, N+1 for edges).
    #[must_use]
    pub fn y(mut self, data: &[f64]) -> Self {
        self.y = Some(data.to_vec());
        self
    }

    /// Set the coordinate origin; requires [`spacing`](Self::spacing).
    #[must_use]
    pub fn origin(mut self, x0: f64, y0: f64) -> Self {
        self.origin = Some((x0, y0));
        self
    }

    /// Set the per-cell spacing used with [`origin`](Self::origin).
    #[must_use]
    pub fn spacing(mut self, dx: f64, dy: f64) -> Self {
        self.dx = Some(dx);
        self.dy = Some(dy);
        self
    }

    /// Set the series name.
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
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

    /// Set an arbitrary engine option (color scale, hover template, ...).
    #[must_use]
    pub fn option(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    /// Validate the series and derive coordinate arrays.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is empty or ragged, if `origin` is
    /// given without both spacing values, if neither origin nor both
    /// explicit coordinate arrays are supplied, or if an explicit array's
    /// length is neither N nor N+1.
    pub fn build(mut self) -> Result<Self> {
        if self.z.is_empty() || self.z[0].is_empty() {
            return Err(Error::EmptyData);
        }

        let cols = self.z[0].len();
        if self.z.iter().any(|row| row.len() != cols) {
            return Err(Error::HeatmapCoords("rows of z have unequal lengths".to_string()));
        }

        let (nx, ny) = self.cell_counts();

        if let Some((x0, y0)) = self.origin {
            let (Some(dx), Some(dy)) = (self.dx, self.dy) else {
                return Err(Error::HeatmapCoords(
                    "both dx and dy are required with origin".to_string(),
                ));
            };

            if self.x.is_some() || self.y.is_some() {
                debug!("explicit heatmap coordinates overwritten by origin-derived arrays");
            }

            self.x = Some((0..=nx).map(|i| x0 + i as f64 * dx).collect());
            self.y = Some((0..=ny).map(|i| y0 + i as f64 * dy).collect());
        } else {
            let (Some(x), Some(y)) = (&self.x, &self.y) else {
                return Err(Error::HeatmapCoords(
                    "either origin with spacing or explicit x and y arrays are required"
                        .to_string(),
                ));
            };

            for (axis, len, n) in [("x", x.len(), nx), ("y", y.len(), ny)] {
                if len != n && len != n + 1 {
                    return Err(Error::HeatmapCoords(format!(
                        "{axis} has {len} entries for {n} cells (expected {n} or {})",
                        n + 1
                    )));
                }
            }
        }

        Ok(self)
    }

    /// Cell counts along the x and y axes, honoring `transpose`.
    #[must_use]
    pub fn cell_counts(&self) -> (usize, usize) {
        let rows = self.z.len();
        let cols = self.z.first().map_or(0, Vec::len);
        if self.transpose {
            (rows, cols)
        } else {
            (cols, rows)
        }
    }

    /// The x coordinate array (present after a successful build).
    #[must_use]
    pub fn x_coords(&self) -> Option<&[f64]> {
        self.x.as_deref()
    }

    /// The y coordinate array (present after a successful build).
    #[must_use]
    pub fn y_coords(&self) -> Option<&[f64]> {
        self.y.as_deref()
    }

    /// Engine JSON for this trace.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".to_string(), Value::String("heatmap".to_string()));
        map.insert("uid".to_string(), Value::from(self.uid));
        if self.invisible {
            map.insert("visible".to_string(), Value::Bool(false));
        }
        if let Some(name) = &self.name {
            map.insert("name".to_string(), Value::String(name.clone()));
        }
        if !self.z.is_empty() {
            let rows: Vec<Value> = self.z.iter().map(|row| Value::from(row.clone())).collect();
            map.insert("z".to_string(), Value::Array(rows));
            map.insert("transpose".to_string(), Value::Bool(self.transpose));
        }
        if let Some(x) = &self.x {
            map.insert("x".to_string(), Value::from(x.clone()));
        }
        if let Some(y) = &self.y {
            map.insert("y".to_string(), Value::from(y.clone()));
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

impl Serialize for Heatmap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn z2x3() -> Vec<Vec<f64>> {
        vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]
    }

    #[test]
    fn test_origin_derives_edge_arrays() {
        let heatmap = Heatmap::new().z(z2x3()).origin(10.0, 20.0).spacing(0.5, 2.0).build().unwrap();

        // transpose default: 2 cells along x, 3 along y
        let x = heatmap.x_coords().unwrap();
        let y = heatmap.y_coords().unwrap();
        assert_eq!(x.len(), 3);
        assert_eq!(y.len(), 4);
        for (i, value) in x.iter().enumerate() {
            assert_relative_eq!(*value, 10.0 + i as f64 * 0.5);
        }
        for (i, value) in y.iter().enumerate() {
            assert_relative_eq!(*value, 20.0 + i as f64 * 2.0);
        }
    }

    #[test]
    fn test_origin_without_spacing_is_error() {
        let result = Heatmap::new().z(z2x3()).origin(0.0, 0.0).build();
        assert!(matches!(result, Err(Error::HeatmapCoords(_))));
    }

    #[test]
    fn test_missing_coordinates_is_error() {
        let result = Heatmap::new().z(z2x3()).build();
        assert!(matches!(result, Err(Error::HeatmapCoords(_))));
    }

    #[test]
    fn test_explicit_centers_and_edges() {
        // centers: len == n
        assert!(Heatmap::new().z(z2x3()).x(&[0.0, 1.0]).y(&[0.0, 1.0, 2.0]).build().is_ok());
        // edges: len == n + 1
        assert!(Heatmap::new()
            .z(z2x3())
            .x(&[0.0, 1.0, 2.0])
            .y(&[0.0, 1.0, 2.0, 3.0])
            .build()
            .is_ok());
    }

    #[test]
    fn test_bad_coordinate_length_is_error() {
        let result = Heatmap::new().z(z2x3()).x(&[0.0, 1.0, 2.0, 3.0]).y(&[0.0, 1.0, 2.0]).build();
        assert!(matches!(result, Err(Error::HeatmapCoords(_))));
    }

    #[test]
    fn test_transpose_swaps_cell_counts() {
        let heatmap = Heatmap::new().z(z2x3());
        assert_eq!(heatmap.cell_counts(), (2, 3));
        assert_eq!(heatmap.transpose(false).cell_counts(), (3, 2));
    }

    #[test]
    fn test_ragged_matrix_is_error() {
        let result = Heatmap::new().z(vec![vec![1.0, 2.0], vec![3.0]]).x(&[0.0, 1.0]).y(&[0.0, 1.0]).build();
        assert!(matches!(result, Err(Error::HeatmapCoords(_))));
    }

    #[test]
    fn test_empty_matrix_is_error() {
        assert!(matches!(Heatmap::new().build(), Err(Error::EmptyData)));
    }

    #[test]
    fn test_json_shape() {
        let heatmap = Heatmap::new().z(z2x3()).origin(0.0, 0.0).spacing(1.0, 1.0).build().unwrap();
        let value = heatmap.to_value();
        assert_eq!(value["type"], "heatmap");
        assert_eq!(value["transpose"], true);
        assert_eq!(value["z"][1][2], 6.0);
    }
}
