//! Render surface: figure JSON assembly and HTML handoff.
//!
//! The crate never rasterizes anything. [`Figure::to_json`] produces the
//! complete declarative figure description and [`Figure::write_html`]
//! wraps it in a self-contained document that hands the configuration to
//! the external rendering engine, together with an image-export
//! configuration (format, dimensions, filename).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::{json, Value};

use crate::error::Result;
use crate::figure::Figure;

/// Engine version loaded from the CDN by the emitted document.
const ENGINE_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";

/// Image format offered by the engine's export button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// Scalable vector graphics.
    #[default]
    Svg,
    /// Portable network graphics.
    Png,
}

impl ImageFormat {
    fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }
}

/// Image-export configuration passed through to the engine.
#[derive(Debug, Clone, Default)]
pub struct ExportConfig {
    /// Export image format.
    pub format: ImageFormat,
    /// Export width; defaults to the layout width.
    pub width: Option<f64>,
    /// Export height; defaults to the layout height.
    pub height: Option<f64>,
    /// Export filename stem; defaults to a timestamped name.
    pub filename: Option<String>,
}

impl ExportConfig {
    fn filename_or_generated(&self) -> String {
        self.filename
            .clone()
            .unwrap_or_else(|| format!("plot-{}", Local::now().format("%Y%m%d-%H%M%S")))
    }
}

impl Figure {
    /// The complete figure description: `{"data": [...], "layout": {...}}`.
    ///
    /// Call after [`finalize`](Figure::finalize) to include auto-computed
    /// ranges, ticks and placeholder traces.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "data": self.data_values(),
            "layout": self.assembled_layout(),
        })
    }

    /// A self-contained HTML document rendering this figure.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure fails to serialize.
    pub fn to_html(&self, export: &ExportConfig) -> Result<String> {
        let figure = serde_json::to_string(&self.to_json())?;

        let width = export.width.or_else(|| self.layout_f64("width"));
        let height = export.height.or_else(|| self.layout_f64("height"));
        let config = serde_json::to_string(&json!({
            "showLink": false,
            "toImageButtonOptions": {
                "format": export.format.as_str(),
                "width": width,
                "height": height,
                "filename": export.filename_or_generated(),
            },
        }))?;

        Ok(format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n\
             <script src=\"{ENGINE_CDN}\"></script>\n</head>\n<body>\n\
             <div id=\"autofig\"></div>\n<script>\n\
             var figure = {figure};\n\
             Plotly.newPlot(\"autofig\", figure.data, figure.layout, {config});\n\
             </script>\n</body>\n</html>\n"
        ))
    }

    /// Write the HTML document to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error on serialization or I/O failure.
    pub fn write_html(&self, path: &Path, export: &ExportConfig) -> Result<()> {
        fs::write(path, self.to_html(export)?)?;
        Ok(())
    }

    /// Finalize, write the HTML document and clean up placeholder traces.
    ///
    /// The document is written into the current directory using the
    /// export filename (generated if unset).
    ///
    /// # Errors
    ///
    /// Propagates finalization, serialization and I/O errors; a failed
    /// write aborts without cleanup (no rollback).
    pub fn show(&mut self) -> Result<PathBuf> {
        self.show_with(None, &ExportConfig::default())
    }

    /// [`show`](Figure::show) with an explicit output path and export
    /// configuration.
    ///
    /// # Errors
    ///
    /// Propagates finalization, serialization and I/O errors.
    pub fn show_with(&mut self, path: Option<&Path>, export: &ExportConfig) -> Result<PathBuf> {
        self.finalize()?;

        let path = match path {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(format!("{}.html", export.filename_or_generated())),
        };
        self.write_html(&path, export)?;

        self.cleanup()?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisId;
    use crate::traces::Scatter;

    fn figure_with_data() -> Figure {
        let mut figure = Figure::new();
        figure.add_scatter(Scatter::new().x(&[0.0, 1.0]).y(&[0.0, 2.0]).build().unwrap());
        figure
    }

    #[test]
    fn test_to_json_shape() {
        let mut figure = figure_with_data();
        figure.finalize().unwrap();
        let value = figure.to_json();

        assert!(value["data"].is_array());
        assert_eq!(value["data"][0]["type"], "scatter");
        assert!(value["layout"]["xaxis"].is_object());
        assert!(value["layout"]["xaxis101"].is_object());
        assert!(value["layout"]["xaxis201"].is_object());
    }

    #[test]
    fn test_to_html_embeds_figure_and_config() {
        let figure = figure_with_data();
        let html = figure.to_html(&ExportConfig::default()).unwrap();

        assert!(html.contains("Plotly.newPlot"));
        assert!(html.contains("\"showLink\":false"));
        assert!(html.contains("\"format\":\"svg\""));
    }

    #[test]
    fn test_export_dimensions_default_to_layout() {
        let figure = figure_with_data();
        let html = figure.to_html(&ExportConfig::default()).unwrap();
        // default style is 450 x 450
        assert!(html.contains("\"width\":450.0"));
    }

    #[test]
    fn test_show_writes_file_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.html");

        let mut figure = figure_with_data();
        let written =
            figure.show_with(Some(&path), &ExportConfig::default()).unwrap();

        assert_eq!(written, path);
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Plotly.newPlot"));
        // placeholders removed after render
        assert_eq!(figure.traces().len(), 1);
    }

    #[test]
    fn test_custom_filename_in_config() {
        let figure = figure_with_data();
        let export = ExportConfig { filename: Some("spectrum".to_string()), ..Default::default() };
        let html = figure.to_html(&export).unwrap();
        assert!(html.contains("\"filename\":\"spectrum\""));
    }
}
