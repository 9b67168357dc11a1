//! Presentation styles for cells.
//!
//! A cell's presentation is an mxGraph style string: a `;`-separated list of
//! `key=value` pairs and bare flags such as `swimlane;`. The engine treats it
//! as opaque text.
//!
//! # Overview
//!
//! - [`Style`]: Opaque, immutable presentation string attached to a cell.
//! - [`ShapeCategory`]: Semantic shape categories known to the registry.
//! - [`StyleRegistry`]: Maps each category to its presentation string.
//! - [`StyleBuilder`]: Typed construction of style strings with colour checks.
//!
//! # Example
//!
//! ```
//! use mxdraft_core::style::{ShapeCategory, StyleBuilder, StyleRegistry};
//!
//! let registry = StyleRegistry::new();
//! let call_behavior = registry.get(ShapeCategory::Action).with("strokeWidth", "2");
//! assert!(call_behavior.as_str().ends_with("strokeWidth=2;"));
//!
//! let lane = StyleBuilder::new()
//!     .flag("swimlane")
//!     .color("strokeColor", "#616161")
//!     .unwrap()
//!     .set("startSize", "26")
//!     .build();
//! assert_eq!(lane.as_str(), "swimlane;strokeColor=#616161;startSize=26;");
//! ```

use std::{fmt, str::FromStr};

use color::DynamicColor;
use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// Style keys whose values are colours.
pub const COLOR_KEYS: &[&str] = &[
    "fillColor",
    "strokeColor",
    "fontColor",
    "gradientColor",
    "labelBackgroundColor",
    "labelBorderColor",
    "swimlaneFillColor",
];

/// Errors raised while building a style.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StyleError {
    #[error("invalid color `{value}` for style key `{key}`")]
    InvalidColor { key: String, value: String },
}

/// Returns `true` if `value` is usable as a colour in a style string.
///
/// Accepts the mxGraph keywords `none` and `default` as well as any CSS
/// colour understood by the `color` crate.
pub fn is_valid_color(value: &str) -> bool {
    matches!(value, "none" | "default") || DynamicColor::from_str(value).is_ok()
}

/// An opaque presentation string attached to a cell.
///
/// Any text is accepted verbatim. [`Style::with`] layers an ad hoc override
/// on top of an existing style, which is how a registry entry gets a widened
/// stroke or a dashed border for a single cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct Style(String);

impl Style {
    /// Wraps a presentation string.
    pub fn new(style: impl Into<String>) -> Self {
        Self(style.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a copy of this style with `key=value;` appended.
    ///
    /// The base text is kept as is; mxGraph resolves repeated keys by taking
    /// the last occurrence.
    pub fn with(&self, key: &str, value: &str) -> Self {
        let mut style = self.0.clone();
        if !style.is_empty() && !style.ends_with(';') {
            style.push(';');
        }
        style.push_str(key);
        style.push('=');
        style.push_str(value);
        style.push(';');
        Self(style)
    }

    /// Iterates over the entries of the style string.
    ///
    /// Bare flags are yielded with a `None` value. Empty segments are skipped.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0
            .split(';')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (segment, None),
            })
    }

    /// Returns the value of the last occurrence of `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries()
            .filter(|(entry, _)| *entry == key)
            .filter_map(|(_, value)| value)
            .last()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Style {
    fn from(style: &str) -> Self {
        Self::new(style)
    }
}

impl From<String> for Style {
    fn from(style: String) -> Self {
        Self(style)
    }
}

impl From<&Style> for Style {
    fn from(style: &Style) -> Self {
        style.clone()
    }
}

/// Semantic shape categories with a registered presentation.
///
/// The first group covers activity diagrams, the second state machines.
/// [`ShapeCategory::Connector`] is the default edge presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeCategory {
    /// Rounded rectangle for an action node
    Action,
    /// Object node carrying data between actions
    Object,
    /// Filled initial node of an activity
    Start,
    /// Outer ring of an activity final node
    FlowFinal,
    /// Filled centre of an activity final node
    FinalInner,
    Decision,
    /// Dashed diamond merging alternative flows
    Merge,
    /// Fork / join synchronisation bar
    Bar,
    /// Partition lane, rendered with a title band
    Swimlane,
    /// Dashed interruptible activity region
    Interruptible,
    /// Hexagon for send / receive signal actions
    Signal,
    Note,
    /// Simple state of a state machine
    State,
    /// State that contains nested states
    CompositeState,
    /// Initial pseudo-state
    Initial,
    /// Final state
    Final,
    /// Free text heading
    Title,
    /// State-machine transition
    Transition,
    /// Orthogonal connector with a filled block arrowhead
    Connector,
}

impl ShapeCategory {
    /// All categories in declaration order.
    pub const ALL: [ShapeCategory; 19] = [
        Self::Action,
        Self::Object,
        Self::Start,
        Self::FlowFinal,
        Self::FinalInner,
        Self::Decision,
        Self::Merge,
        Self::Bar,
        Self::Swimlane,
        Self::Interruptible,
        Self::Signal,
        Self::Note,
        Self::State,
        Self::CompositeState,
        Self::Initial,
        Self::Final,
        Self::Title,
        Self::Transition,
        Self::Connector,
    ];

    /// Returns the kebab-case name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Object => "object",
            Self::Start => "start",
            Self::FlowFinal => "flow-final",
            Self::FinalInner => "final-inner",
            Self::Decision => "decision",
            Self::Merge => "merge",
            Self::Bar => "bar",
            Self::Swimlane => "swimlane",
            Self::Interruptible => "interruptible",
            Self::Signal => "signal",
            Self::Note => "note",
            Self::State => "state",
            Self::CompositeState => "composite-state",
            Self::Initial => "initial",
            Self::Final => "final",
            Self::Title => "title",
            Self::Transition => "transition",
            Self::Connector => "connector",
        }
    }

    fn builtin_style(&self) -> &'static str {
        match self {
            Self::Action => "shape=rect;rounded=1;whiteSpace=wrap;html=1;fillColor=#e3f2fd;strokeColor=#1565c0;",
            Self::Object => "shape=rect;rounded=1;whiteSpace=wrap;html=1;fillColor=#fffde7;strokeColor=#f9a825;",
            Self::Start => "shape=ellipse;whiteSpace=wrap;html=1;fillColor=#111111;strokeColor=#111111;",
            Self::FlowFinal => "shape=ellipse;whiteSpace=wrap;html=1;fillColor=#ffffff;strokeColor=#c62828;strokeWidth=2;",
            Self::FinalInner => "shape=ellipse;whiteSpace=wrap;html=1;fillColor=#c62828;strokeColor=#c62828;",
            Self::Decision => "shape=rhombus;whiteSpace=wrap;html=1;fillColor=#f3e5f5;strokeColor=#6a1b9a;",
            Self::Merge => "shape=rhombus;whiteSpace=wrap;html=1;fillColor=#ede7f6;strokeColor=#4527a0;dashed=1;",
            Self::Bar => "shape=rect;rounded=0;whiteSpace=wrap;html=1;fillColor=#212121;strokeColor=#212121;",
            Self::Swimlane => "swimlane;strokeColor=#616161;fontStyle=1;align=center;horizontal=1;startSize=26;",
            Self::Interruptible => "shape=rect;rounded=1;dashed=1;dashPattern=8 4;strokeColor=#ef6c00;fillColor=#fff3e0;",
            Self::Signal => "shape=hexagon;perimeter=hexagonPerimeter2;whiteSpace=wrap;html=1;fillColor=#e8f5e9;strokeColor=#2e7d32;",
            Self::Note => "shape=note;whiteSpace=wrap;html=1;fillColor=#fffde7;strokeColor=#f9a825;",
            Self::State => "rounded=1;whiteSpace=wrap;html=1;labelPosition=center;verticalLabelPosition=middle;align=center;verticalAlign=middle;strokeColor=#1a1a1a;fillColor=#ffffff;spacing=4;",
            Self::CompositeState => "rounded=1;whiteSpace=wrap;html=1;labelPosition=center;verticalLabelPosition=middle;align=center;verticalAlign=middle;strokeColor=#1a1a1a;fillColor=#ffffff;spacing=4;container=1;recursiveResize=0;",
            Self::Initial => "shape=ellipse;perimeter=ellipsePerimeter;html=1;fillColor=#000000;strokeColor=#000000;",
            Self::Final => "shape=doubleEllipse;perimeter=ellipsePerimeter;html=1;fillColor=#ffffff;strokeColor=#000000;",
            Self::Title => "text;whiteSpace=wrap;html=1;align=left;verticalAlign=top;fontSize=18;fontStyle=1;",
            Self::Transition => "endArrow=block;endFill=1;html=1;rounded=1;strokeColor=#1a1a1a;labelBackgroundColor=#ffffff;",
            Self::Connector => "edgeStyle=orthogonalEdgeStyle;rounded=0;endArrow=block;endFill=1;",
        }
    }
}

impl fmt::Display for ShapeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed mapping from [`ShapeCategory`] to its presentation string.
///
/// The registry is populated once, optionally with overrides, and is
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    styles: IndexMap<ShapeCategory, Style>,
}

impl StyleRegistry {
    /// Creates a registry holding the built-in presentation of every category.
    pub fn new() -> Self {
        let styles = ShapeCategory::ALL
            .into_iter()
            .map(|category| (category, Style::new(category.builtin_style())))
            .collect();
        Self { styles }
    }

    /// Creates a registry with the built-ins replaced by `overrides`.
    ///
    /// Categories absent from `overrides` keep their built-in presentation.
    pub fn with_overrides<'a>(
        overrides: impl IntoIterator<Item = (&'a ShapeCategory, &'a Style)>,
    ) -> Self {
        let mut registry = Self::new();
        for (category, style) in overrides {
            log::debug!(category = category.name(), style = style.as_str(); "Overriding registry style");
            registry.styles.insert(*category, style.clone());
        }
        registry
    }

    /// Returns the presentation registered for `category`.
    pub fn get(&self, category: ShapeCategory) -> &Style {
        // Every category is inserted by `new`, overrides only replace values.
        &self.styles[&category]
    }

    /// Iterates over all entries in category declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ShapeCategory, &Style)> {
        self.styles.iter().map(|(category, style)| (*category, style))
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Typed builder for style strings.
///
/// Entries keep their insertion order; setting a key twice replaces the value
/// in place. Colour-valued keys go through [`StyleBuilder::color`], which
/// rejects values the `color` crate cannot parse.
#[derive(Debug, Clone, Default)]
pub struct StyleBuilder {
    entries: IndexMap<String, Option<String>>,
}

impl StyleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the entries of an existing style.
    pub fn from_style(style: &Style) -> Self {
        let entries = style
            .entries()
            .map(|(key, value)| (key.to_string(), value.map(str::to_string)))
            .collect();
        Self { entries }
    }

    /// Adds a bare flag such as `swimlane` or `text`.
    pub fn flag(mut self, name: &str) -> Self {
        self.entries.insert(name.to_string(), None);
        self
    }

    /// Sets `key=value`.
    pub fn set(mut self, key: &str, value: impl ToString) -> Self {
        self.entries.insert(key.to_string(), Some(value.to_string()));
        self
    }

    /// Sets a colour-valued key after checking the colour parses.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidColor`] if `value` is not a colour.
    pub fn color(self, key: &str, value: &str) -> Result<Self, StyleError> {
        if !is_valid_color(value) {
            return Err(StyleError::InvalidColor {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
        Ok(self.set(key, value))
    }

    /// Sets `shape=<name>`.
    pub fn shape(self, name: &str) -> Self {
        self.set("shape", name)
    }

    /// Sets `dashed=1`, optionally with a dash pattern.
    pub fn dashed(self, pattern: Option<&str>) -> Self {
        let builder = self.set("dashed", 1);
        match pattern {
            Some(pattern) => builder.set("dashPattern", pattern),
            None => builder,
        }
    }

    /// Sets `strokeWidth`.
    pub fn stroke_width(self, width: f64) -> Self {
        self.set("strokeWidth", width)
    }

    /// Renders the entries into an opaque [`Style`].
    pub fn build(self) -> Style {
        let mut style = String::new();
        for (key, value) in &self.entries {
            style.push_str(key);
            if let Some(value) = value {
                style.push('=');
                style.push_str(value);
            }
            style.push(';');
        }
        Style(style)
    }
}
