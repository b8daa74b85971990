//! In-memory canvas
//!
//! A minimal scene: a flat list of top-level nodes, a selection, and a
//! viewport. It can be saved to and loaded from a JSON file so CLI runs can
//! build on each other.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::{Host, HostError};
use crate::models::{Bounds, NodeId, NodeType, Point, SceneNode};

/// Name the host gives a freshly created container
pub const DEFAULT_CONTAINER_NAME: &str = "Frame";

/// Default container size before the layout resizes it
const DEFAULT_CONTAINER_SIZE: f64 = 100.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryHost {
    #[serde(default)]
    nodes: Vec<SceneNode>,
    #[serde(default)]
    selection: Vec<NodeId>,
    #[serde(default)]
    viewport: Bounds,
    #[serde(default)]
    notifications: Vec<String>,
    #[serde(default)]
    next_id: u64,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a specific viewport
    pub fn with_viewport(viewport: Bounds) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Load a scene file, or start empty when it does not exist yet
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse scene {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize scene")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write scene {}", path.display()))?;
        Ok(())
    }

    /// Place a node on the canvas
    pub fn add_node(
        &mut self,
        node_type: NodeType,
        name: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> NodeId {
        let id = self.allocate_id();
        self.nodes.push(SceneNode {
            id: id.clone(),
            node_type,
            name: name.to_string(),
            x,
            y,
            width,
            height,
        });
        id
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn selection_ids(&self) -> &[NodeId] {
        &self.selection
    }

    pub fn viewport(&self) -> Bounds {
        self.viewport
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    fn allocate_id(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId::new(format!("0:{}", self.next_id))
    }

    fn find(&self, id: &NodeId) -> Result<&SceneNode, HostError> {
        self.nodes
            .iter()
            .find(|n| &n.id == id)
            .ok_or_else(|| HostError::NodeNotFound(id.clone()))
    }

    fn find_mut(&mut self, id: &NodeId) -> Result<&mut SceneNode, HostError> {
        self.nodes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| HostError::NodeNotFound(id.clone()))
    }

    fn push_copy(&mut self, mut node: SceneNode) -> NodeId {
        let id = self.allocate_id();
        node.id = id.clone();
        self.nodes.push(node);
        id
    }
}

impl Host for MemoryHost {
    fn create_instance_of(&mut self, component: &NodeId) -> Result<NodeId, HostError> {
        let source = self.find(component)?;
        if source.node_type != NodeType::Component {
            return Err(HostError::NotAComponent(component.clone()));
        }
        let mut instance = source.clone();
        instance.node_type = NodeType::Instance;
        Ok(self.push_copy(instance))
    }

    fn clone_node(&mut self, node: &NodeId) -> Result<NodeId, HostError> {
        let copy = self.find(node)?.clone();
        Ok(self.push_copy(copy))
    }

    fn create_container(&mut self) -> NodeId {
        self.add_node(
            NodeType::Frame,
            DEFAULT_CONTAINER_NAME,
            0.0,
            0.0,
            DEFAULT_CONTAINER_SIZE,
            DEFAULT_CONTAINER_SIZE,
        )
    }

    fn resize_node(&mut self, node: &NodeId, width: f64, height: f64) -> Result<(), HostError> {
        let node = self.find_mut(node)?;
        node.width = width;
        node.height = height;
        Ok(())
    }

    fn move_node(&mut self, node: &NodeId, x: f64, y: f64) -> Result<(), HostError> {
        let node = self.find_mut(node)?;
        node.x = x;
        node.y = y;
        Ok(())
    }

    fn rename_node(&mut self, node: &NodeId, name: &str) -> Result<(), HostError> {
        self.find_mut(node)?.name = name.to_string();
        Ok(())
    }

    fn node(&self, node: &NodeId) -> Option<SceneNode> {
        self.find(node).ok().cloned()
    }

    fn current_selection(&self) -> Vec<SceneNode> {
        self.selection
            .iter()
            .filter_map(|id| self.node(id))
            .collect()
    }

    fn set_selection(&mut self, nodes: &[NodeId]) -> Result<(), HostError> {
        for id in nodes {
            self.find(id)?;
        }
        self.selection = nodes.to_vec();
        Ok(())
    }

    fn viewport_center(&self) -> Point {
        self.viewport.center()
    }

    fn scroll_into_view(&mut self, nodes: &[NodeId]) -> Result<(), HostError> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for id in nodes {
            let node = self.find(id)?;
            let (left, top, right, bottom) = (node.x, node.y, node.right(), node.y + node.height);
            bounds = Some(match bounds {
                None => (left, top, right, bottom),
                Some((l, t, r, b)) => (l.min(left), t.min(top), r.max(right), b.max(bottom)),
            });
        }
        // Zoom to fit, like the host does
        if let Some((left, top, right, bottom)) = bounds {
            self.viewport = Bounds {
                x: left,
                y: top,
                width: right - left,
                height: bottom - top,
            };
        }
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        log::info!("{}", message);
        self.notifications.push(message.to_string());
    }
}
