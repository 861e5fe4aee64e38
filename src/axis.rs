//! Axis model: identifiers, selectors, and per-axis style records.
//!
//! Every user-facing axis owns a *main* style record plus synthesized
//! companion records: *mirror* axes render tick marks on the opposite side
//! of the plot, and *minor* axes overlay the same scale with a finer tick
//! subdivision. The rendering engine treats each companion as a separate
//! axis, so their records are kept here and written into the layout tree at
//! finalization.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::merge;
use crate::style::Style;

/// Axis direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

impl Direction {
    /// The single-letter axis prefix.
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Direction::X => 'x',
            Direction::Y => 'y',
        }
    }

    /// The perpendicular direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Direction::X => Direction::Y,
            Direction::Y => Direction::X,
        }
    }

    /// Side of the plot where a mirror axis is placed.
    fn mirror_side(self) -> &'static str {
        match self {
            Direction::X => "top",
            Direction::Y => "right",
        }
    }
}

/// Identifier of one logical axis, e.g. `x`, `y2` or a synthesized
/// companion such as `x101`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisId {
    /// Axis direction.
    pub direction: Direction,
    /// One-based axis index; index 1 displays without a suffix.
    pub index: u32,
}

impl AxisId {
    /// Create an axis identifier.
    #[must_use]
    pub const fn new(direction: Direction, index: u32) -> Self {
        Self { direction, index }
    }

    /// The default x axis.
    #[must_use]
    pub const fn x() -> Self {
        Self::new(Direction::X, 1)
    }

    /// The default y axis.
    #[must_use]
    pub const fn y() -> Self {
        Self::new(Direction::Y, 1)
    }

    /// The same-index axis in the perpendicular direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        Self::new(self.direction.opposite(), self.index)
    }

    /// Key of this axis inside the layout tree (`xaxis`, `yaxis2`, ...).
    #[must_use]
    pub fn layout_key(self) -> String {
        if self.index == 1 {
            format!("{}axis", self.direction.letter())
        } else {
            format!("{}axis{}", self.direction.letter(), self.index)
        }
    }

    /// Identifier of the m-th mirror companion (0-based).
    #[must_use]
    pub fn mirror(self, m: usize) -> Self {
        Self::new(self.direction, 100 * (2 * m as u32 + 1) + self.index)
    }

    /// Identifier of the m-th minor companion (0-based).
    #[must_use]
    pub fn minor(self, m: usize) -> Self {
        Self::new(self.direction, 100 * (2 * m as u32 + 2) + self.index)
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.index == 1 {
            write!(f, "{}", self.direction.letter())
        } else {
            write!(f, "{}{}", self.direction.letter(), self.index)
        }
    }
}

impl FromStr for AxisId {
    type Err = Error;

    /// Parse an axis name such as `x`, `y2`; `x1` normalizes to `x`.
    fn from_str(s: &str) -> Result<Self, Error> {
        let mut chars = s.chars();
        let direction = match chars.next() {
            Some('x') => Direction::X,
            Some('y') => Direction::Y,
            _ => return Err(Error::InvalidAxis(s.to_string())),
        };

        let rest = chars.as_str();
        let index = if rest.is_empty() {
            1
        } else {
            rest.parse::<u32>().map_err(|_| Error::InvalidAxis(s.to_string()))?
        };

        if index == 0 {
            return Err(Error::InvalidAxis(s.to_string()));
        }

        Ok(Self::new(direction, index))
    }
}

impl Serialize for AxisId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Selector naming the axes an operation applies to.
///
/// Replaces pattern-based axis matching with an explicit enumeration: a
/// single identifier or a direction filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axes {
    /// Exactly one axis.
    One(AxisId),
    /// Every x axis.
    X,
    /// Every y axis.
    Y,
    /// Every axis.
    All,
}

impl Axes {
    /// Whether the selector covers the given axis.
    #[must_use]
    pub fn matches(&self, id: AxisId) -> bool {
        match self {
            Axes::One(axis) => *axis == id,
            Axes::X => id.direction == Direction::X,
            Axes::Y => id.direction == Direction::Y,
            Axes::All => true,
        }
    }
}

impl From<AxisId> for Axes {
    fn from(id: AxisId) -> Self {
        Axes::One(id)
    }
}

/// One logical axis: a main style record plus its mirror and minor
/// companion records, all owned by this value.
///
/// The `range` attribute is only ever written through [`AxisSpec::set`],
/// which keeps main, mirror and minor records in agreement.
#[derive(Debug, Clone)]
pub struct AxisSpec {
    id: AxisId,
    main: Map<String, Value>,
    mirrors: Vec<(AxisId, Map<String, Value>)>,
    minors: Vec<(AxisId, Map<String, Value>)>,
}

impl AxisSpec {
    /// Create an axis with one mirror and one minor companion.
    ///
    /// `overrides` are layered onto the style defaults of the main record
    /// and of both companions; subplot construction uses this to assign
    /// `domain` and `anchor`.
    pub(crate) fn new(id: AxisId, style: &Style, overrides: &Map<String, Value>) -> Self {
        let mut overrides = overrides.clone();
        overrides
            .entry("anchor".to_string())
            .or_insert_with(|| Value::String(id.opposite().to_string()));

        let mut main = style.main_axis_defaults();
        if id.direction == Direction::Y {
            // hair spaces keep tick labels clear of the axis line
            main.insert("tickprefix".to_string(), Value::String("\u{2004}".to_string()));
            main.insert("ticksuffix".to_string(), Value::String("\u{2009}".to_string()));
        }
        merge::merge_into(&mut main, &overrides);

        let mut spec = Self { id, main, mirrors: Vec::new(), minors: Vec::new() };
        spec.append_mirror(style, &overrides);
        spec.append_minor(style, &overrides);
        spec
    }

    /// The axis identifier.
    #[must_use]
    pub fn id(&self) -> AxisId {
        self.id
    }

    /// Identifiers of the mirror companions.
    pub fn mirror_ids(&self) -> impl Iterator<Item = AxisId> + '_ {
        self.mirrors.iter().map(|(id, _)| *id)
    }

    /// Identifiers of the minor companions.
    pub fn minor_ids(&self) -> impl Iterator<Item = AxisId> + '_ {
        self.minors.iter().map(|(id, _)| *id)
    }

    /// Append a mirror companion.
    ///
    /// The newest mirror takes the side opposite the main axis; any
    /// previous mirror loses its side and becomes tick-only.
    pub(crate) fn append_mirror(&mut self, style: &Style, overrides: &Map<String, Value>) {
        let mirror_id = self.id.mirror(self.mirrors.len());

        let mut record = style.mirror_axis_defaults();
        record.insert("overlaying".to_string(), Value::String(self.id.to_string()));
        record.insert("scaleanchor".to_string(), Value::String(self.id.to_string()));
        record.insert("side".to_string(), Value::String(self.id.direction.mirror_side().to_string()));

        if let Some((_, previous)) = self.mirrors.last_mut() {
            previous.remove("side");
            previous.insert("mirror".to_string(), Value::String("ticks".to_string()));
        }

        merge::merge_into(&mut record, overrides);
        self.mirrors.push((mirror_id, record));
    }

    /// Append a minor companion.
    pub(crate) fn append_minor(&mut self, style: &Style, overrides: &Map<String, Value>) {
        let minor_id = self.id.minor(self.minors.len());

        let mut record = style.minor_axis_defaults();
        record.insert("overlaying".to_string(), Value::String(self.id.to_string()));
        record.insert("scaleanchor".to_string(), Value::String(self.id.to_string()));

        merge::merge_into(&mut record, overrides);
        self.minors.push((minor_id, record));
    }

    /// Set a style attribute on the main record and on every companion.
    pub fn set(&mut self, key: &str, value: Value) {
        self.set_with(key, value, None, None);
    }

    /// Set a style attribute, overriding the value used for mirror and/or
    /// minor records.
    pub fn set_with(
        &mut self,
        key: &str,
        value: Value,
        mirror_value: Option<Value>,
        minor_value: Option<Value>,
    ) {
        let mirror_value = mirror_value.unwrap_or_else(|| value.clone());
        let minor_value = minor_value.unwrap_or_else(|| value.clone());

        self.main.insert(key.to_string(), value);
        for (_, record) in &mut self.mirrors {
            record.insert(key.to_string(), mirror_value.clone());
        }
        for (_, record) in &mut self.minors {
            record.insert(key.to_string(), minor_value.clone());
        }
    }

    /// Remove a style attribute from the main record and every companion.
    pub fn delete(&mut self, key: &str) {
        self.main.remove(key);
        for (_, record) in &mut self.mirrors {
            record.remove(key);
        }
        for (_, record) in &mut self.minors {
            record.remove(key);
        }
    }

    /// Whether the attribute is present on the main record and on every
    /// companion. Auto-range and auto-tick use this to detect explicit
    /// user configuration.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.main.contains_key(key)
            && self.mirrors.iter().all(|(_, record)| record.contains_key(key))
            && self.minors.iter().all(|(_, record)| record.contains_key(key))
    }

    /// Read an attribute from the main record.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.main.get(key)
    }

    /// Set an attribute on the main record only.
    pub(crate) fn set_main(&mut self, key: &str, value: Value) {
        self.main.insert(key.to_string(), value);
    }

    /// Whether this axis uses a logarithmic scale.
    #[must_use]
    pub fn is_log(&self) -> bool {
        self.main.get("type").and_then(Value::as_str) == Some("log")
    }

    /// The numeric range, if set.
    #[must_use]
    pub fn range(&self) -> Option<(f64, f64)> {
        let range = self.main.get("range")?.as_array()?;
        Some((range.first()?.as_f64()?, range.get(1)?.as_f64()?))
    }

    /// Set or remove the main record's title text, keeping companions
    /// label-free.
    pub(crate) fn set_title_text(&mut self, text: Option<&str>, font: Option<Map<String, Value>>) {
        let title = self
            .main
            .entry("title".to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(title) = title {
            match text {
                Some(text) => {
                    title.insert("text".to_string(), Value::String(text.to_string()));
                }
                None => {
                    title.remove("text");
                }
            }
            if let Some(font) = font {
                title.insert("font".to_string(), Value::Object(font));
            }
        }
    }

    /// Write the main and companion records into the layout tree.
    pub(crate) fn write_layout(&self, layout: &mut Map<String, Value>) {
        layout.insert(self.id.layout_key(), Value::Object(self.main.clone()));
        for (id, record) in self.mirrors.iter().chain(self.minors.iter()) {
            layout.insert(id.layout_key(), Value::Object(record.clone()));
        }
    }
}
