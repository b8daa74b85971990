//! Data models for boutique
//!
//! The catalog types serialize to exactly the JSON the plugin UI exchanges
//! and the document stores. Scene types describe canvas nodes as the host
//! reports them.

use serde::{Deserialize, Serialize};

/// Horizontal gap between generated siblings
pub const SPACING: f64 = 100.0;

/// One target rectangle size
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variation {
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Variation {
    /// Create an unnamed variation
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            name: None,
        }
    }

    /// Create a named variation
    pub fn named(width: f64, height: f64, name: impl Into<String>) -> Self {
        Self {
            width,
            height,
            name: Some(name.into()),
        }
    }

    /// `"{width}x{height}"` using `f64` `Display`. Matches how the UI prints
    /// ordinary sizes; JS switches to exponent form at 1e21 and below 1e-6,
    /// where this keeps full digits.
    pub fn dimensions(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// Explicit name when present, dimensions otherwise
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => self.dimensions(),
        }
    }
}

pub(crate) fn is_valid_side(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// A named group of variations generated together
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stand {
    pub name: String,
    pub variations: Vec<Variation>,
}

impl Stand {
    /// Create a stand with no variations
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variations: Vec::new(),
        }
    }
}

/// The full catalog of stands, persisted as one JSON array
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Boutique(pub Vec<Stand>);

impl Boutique {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn stands(&self) -> &[Stand] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, stand_id: usize) -> Option<&Stand> {
        self.0.get(stand_id)
    }

    pub fn get_mut(&mut self, stand_id: usize) -> Option<&mut Stand> {
        self.0.get_mut(stand_id)
    }
}

impl From<Vec<Stand>> for Boutique {
    fn from(stands: Vec<Stand>) -> Self {
        Self(stands)
    }
}

/// Opaque identifier the host assigns to a canvas node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canvas node kinds the layout cares about
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Frame,
    Component,
    Instance,
    Group,
    Rectangle,
    Text,
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeType::Frame => write!(f, "FRAME"),
            NodeType::Component => write!(f, "COMPONENT"),
            NodeType::Instance => write!(f, "INSTANCE"),
            NodeType::Group => write!(f, "GROUP"),
            NodeType::Rectangle => write!(f, "RECTANGLE"),
            NodeType::Text => write!(f, "TEXT"),
        }
    }
}

/// Snapshot of a canvas node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SceneNode {
    /// X coordinate of the right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Visible canvas rectangle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1440.0,
            height: 900.0,
        }
    }
}
