//! Subplot gridding and range alignment.
//!
//! A grid of cells (each empty or holding one or more traces) becomes a
//! set of row/column-indexed axis pairs with paper-coordinate domains.
//! Optional range alignment groups axes across rows, columns or the whole
//! grid; at finalization every group's range becomes the union of its
//! members' ranges.

use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::axis::{AxisId, Direction};
use crate::error::{Error, Result};
use crate::traces::Trace;

use super::Figure;

/// One cell of a subplot grid: empty, or the traces drawn in it.
pub type SubplotCell = Option<Vec<Trace>>;

/// Which axes neighboring subplots share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Share {
    /// Every cell gets its own axis pair.
    #[default]
    None,
    /// Cells in the same column share one x axis.
    X,
    /// Cells in the same row share one y axis.
    Y,
    /// Both of the above.
    Both,
}

impl Share {
    fn shares_x(self) -> bool {
        matches!(self, Share::X | Share::Both)
    }

    fn shares_y(self) -> bool {
        matches!(self, Share::Y | Share::Both)
    }
}

/// Range-alignment scheme for one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignScheme {
    /// Align per column (x) or per row (y).
    Each,
    /// Align every axis of the direction across the whole grid.
    All,
}

/// Range-alignment request for both directions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Align {
    /// Alignment of x ranges.
    pub x: Option<AlignScheme>,
    /// Alignment of y ranges.
    pub y: Option<AlignScheme>,
}

/// Options for [`Figure::subplots`].
#[derive(Debug, Clone)]
pub struct SubplotOptions {
    /// Axis sharing between neighboring cells.
    pub share: Share,
    /// Range alignment across rows/columns.
    pub align: Align,
    /// Factor on the horizontal spacing between subplots.
    pub xspace: f64,
    /// Factor on the vertical spacing between subplots.
    pub yspace: f64,
    /// Per-cell titles, row-major over populated cells.
    pub titles: Option<Vec<String>>,
}

impl Default for SubplotOptions {
    fn default() -> Self {
        Self { share: Share::None, align: Align::default(), xspace: 1.0, yspace: 1.0, titles: None }
    }
}

/// Grouping of axes whose ranges must agree.
///
/// Each group has a master (its first member); registering an axis against
/// anything that is not itself or an existing master is an error.
#[derive(Debug, Clone, Default)]
pub(crate) struct RangeAlignment {
    membership: IndexMap<AxisId, usize>,
    groups: Vec<Vec<AxisId>>,
}

impl RangeAlignment {
    pub(crate) fn clear(&mut self) {
        self.membership.clear();
        self.groups.clear();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.membership.is_empty()
    }

    pub(crate) fn groups(&self) -> &[Vec<AxisId>] {
        &self.groups
    }

    /// Register `axis` as sharing its range with `master`'s group.
    /// Registering an axis twice is a no-op (the first registration wins).
    ///
    /// Only a group leader (the group's first member) may act as a
    /// master; a fresh axis becomes a leader by registering against
    /// itself.
    pub(crate) fn register(&mut self, master: AxisId, axis: AxisId) -> Result<()> {
        if self.membership.contains_key(&axis) {
            return Ok(());
        }

        match self.membership.get(&master) {
            Some(&group) if self.groups[group][0] == master => {
                self.membership.insert(axis, group);
                self.groups[group].push(axis);
            }
            None if master == axis => {
                let group = self.groups.len();
                self.membership.insert(axis, group);
                self.groups.push(vec![axis]);
            }
            _ => {
                return Err(Error::AlignmentMaster {
                    master: master.to_string(),
                    axis: axis.to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Figure {
    /// Arrange a 2-D grid of cells as subplots.
    ///
    /// All axes are cleared and recreated: each populated cell receives an
    /// axis pair (numbered bottom row first, left to right, so numbering
    /// is deterministic), the cells' traces are flattened into the trace
    /// list, and the cell-to-axis-pair grid is recorded for titles and
    /// range alignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty or ragged, or if an
    /// alignment registration is invalid.
    pub fn subplots(&mut self, grid: Vec<Vec<SubplotCell>>, options: &SubplotOptions) -> Result<()> {
        let n_rows = grid.len();
        if n_rows == 0 {
            return Err(Error::GridShape("grid has no rows".to_string()));
        }
        let n_cols = grid[0].len();
        if n_cols == 0 {
            return Err(Error::GridShape("grid has no columns".to_string()));
        }
        if grid.iter().any(|row| row.len() != n_cols) {
            return Err(Error::GridShape("rows have unequal lengths".to_string()));
        }

        self.clear_axes();
        self.alignment.clear();
        self.grid = None;

        let shared_x = options.share.shares_x();
        let shared_y = options.share.shares_y();

        let hspace = options.xspace * (if shared_y { 0.1 } else { 0.2 }) / n_cols as f64;
        let vspace = options.yspace * (if shared_x { 0.1 } else { 0.3 }) / n_rows as f64;
        let cell_width = (1.0 - hspace * (n_cols - 1) as f64) / n_cols as f64;
        let cell_height = (1.0 - vspace * (n_rows - 1) as f64) / n_rows as f64;

        let col_domain =
            |c: usize| -> (f64, f64) {
                let left = c as f64 * (cell_width + hspace);
                (left, left + cell_width)
            };
        // paper y runs bottom-up while grid rows are listed top-down
        let row_domain = |r: usize| -> (f64, f64) {
            let bottom = (n_rows - 1 - r) as f64 * (cell_height + vspace);
            (bottom, bottom + cell_height)
        };

        let mut cell_axes: Vec<Vec<Option<(AxisId, AxisId)>>> = vec![vec![None; n_cols]; n_rows];
        let mut column_x: Vec<Option<AxisId>> = vec![None; n_cols];
        let mut row_y: Vec<Option<AxisId>> = vec![None; n_rows];
        let mut subplot = 1u32;

        for r in (0..n_rows).rev() {
            for c in 0..n_cols {
                if grid[r][c].is_none() {
                    continue;
                }

                let existing_x = if shared_x { column_x[c] } else { None };
                let existing_y = if shared_y { row_y[r] } else { None };
                let x_id = existing_x.unwrap_or(AxisId::new(Direction::X, subplot));
                let y_id = existing_y.unwrap_or(AxisId::new(Direction::Y, subplot));

                let x_overrides = domain_overrides(col_domain(c), y_id);
                let y_overrides = domain_overrides(row_domain(r), x_id);

                for (id, overrides) in [(x_id, x_overrides), (y_id, y_overrides)] {
                    if self.axes.contains_key(&id) {
                        // shared axis: a further cell adds companions at
                        // the new cell's position
                        let style = self.style.clone();
                        if let Some(spec) = self.axes.get_mut(&id) {
                            spec.append_mirror(&style, &overrides);
                            spec.append_minor(&style, &overrides);
                        }
                    } else {
                        self.create_axis_with(id, &overrides);
                    }
                }

                cell_axes[r][c] = Some((x_id, y_id));
                if shared_x && column_x[c].is_none() {
                    column_x[c] = Some(x_id);
                }
                if shared_y && row_y[r].is_none() {
                    row_y[r] = Some(y_id);
                }
                subplot += 1;
            }
        }

        // flatten traces; the trace list keeps top-to-bottom grid order
        let mut traces: Vec<Trace> = Vec::new();
        for (r, row) in grid.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                let (Some(cell), Some((x_id, y_id))) = (cell, cell_axes[r][c]) else { continue };
                for mut trace in cell {
                    trace.set_axes(x_id, y_id);
                    traces.push(trace);
                }
            }
        }
        self.set_data(traces);

        if let Some(titles) = &options.titles {
            self.add_subplot_titles(&cell_axes, titles, col_domain, row_domain);
        }

        if tracing::enabled!(tracing::Level::DEBUG) {
            for (r, row) in cell_axes.iter().enumerate() {
                let cells: Vec<String> = row
                    .iter()
                    .map(|cell| match cell {
                        Some((x, y)) => format!("{x}/{y}"),
                        None => "-".to_string(),
                    })
                    .collect();
                debug!(row = r, cells = ?cells, "subplot grid");
            }
        }

        self.grid = Some(cell_axes);
        self.register_alignment(options.align)?;

        Ok(())
    }

    fn add_subplot_titles(
        &mut self,
        cell_axes: &[Vec<Option<(AxisId, AxisId)>>],
        titles: &[String],
        col_domain: impl Fn(usize) -> (f64, f64),
        row_domain: impl Fn(usize) -> (f64, f64),
    ) {
        let mut titles = titles.iter();
        for (r, row) in cell_axes.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.is_none() {
                    continue;
                }
                let Some(text) = titles.next() else { return };

                let (left, right) = col_domain(c);
                let (_, top) = row_domain(r);
                let annotation = json!({
                    "name": format!("subplot-{r}-{c}"),
                    "showarrow": false,
                    "text": text,
                    "font": Value::Object(self.style.title_font()),
                    "x": 0.5 * (left + right),
                    "xanchor": "center",
                    "xref": "paper",
                    "y": top,
                    "yanchor": "bottom",
                    "yref": "paper",
                });
                self.upsert_annotation(&format!("subplot-{r}-{c}"), annotation);
            }
        }
    }

    /// Record the alignment grouping for the current grid.
    ///
    /// Masters are chosen deterministically in row-major order: per-column
    /// masters are the topmost populated cell's x axis, per-row masters
    /// the leftmost populated cell's y axis, and `All` uses the first
    /// populated cell of the grid.
    fn register_alignment(&mut self, align: Align) -> Result<()> {
        let Some(grid) = self.grid.clone() else { return Ok(()) };

        if let Some(scheme) = align.x {
            let column_masters: Vec<Option<AxisId>> = (0..grid[0].len())
                .map(|c| grid.iter().find_map(|row| row[c].map(|(x, _)| x)))
                .collect();
            let global = grid.iter().flatten().flatten().map(|(x, _)| *x).next();

            for row in &grid {
                for (c, cell) in row.iter().enumerate() {
                    if let Some((x, _)) = cell {
                        let master = match scheme {
                            AlignScheme::Each => column_masters[c],
                            AlignScheme::All => global,
                        };
                        if let Some(master) = master {
                            self.alignment.register(master, *x)?;
                        }
                    }
                }
            }
        }

        if let Some(scheme) = align.y {
            let row_masters: Vec<Option<AxisId>> =
                grid.iter().map(|row| row.iter().flatten().map(|(_, y)| *y).next()).collect();
            let global = grid.iter().flatten().flatten().map(|(_, y)| *y).next();

            for (r, row) in grid.iter().enumerate() {
                for cell in row.iter() {
                    if let Some((_, y)) = cell {
                        let master = match scheme {
                            AlignScheme::Each => row_masters[r],
                            AlignScheme::All => global,
                        };
                        if let Some(master) = master {
                            self.alignment.register(master, *y)?;
                        }
                    }
                }
            }
        }

        if !self.alignment.is_empty() {
            for group in self.alignment.groups() {
                let members: Vec<String> = group.iter().map(ToString::to_string).collect();
                debug!(?members, "range alignment group");
            }
        }

        Ok(())
    }

    /// Whether this figure has been arranged into subplots.
    #[must_use]
    pub fn has_subplots(&self) -> bool {
        self.grid.is_some()
    }

    /// The axis pair assigned to a subplot cell.
    #[must_use]
    pub fn subplot_axes(&self, row: usize, col: usize) -> Option<(AxisId, AxisId)> {
        self.grid.as_ref()?.get(row)?.get(col).copied().flatten()
    }
}

fn domain_overrides(domain: (f64, f64), anchor: AxisId) -> Map<String, Value> {
    let mut overrides = Map::new();
    overrides.insert("domain".to_string(), json!([domain.0, domain.1]));
    overrides.insert("anchor".to_string(), Value::String(anchor.to_string()));
    overrides
}
