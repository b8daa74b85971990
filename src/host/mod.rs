//! Host capabilities
//!
//! The catalog core never talks to a concrete design tool. Everything it
//! needs from the canvas goes through [`Host`].

use crate::models::{NodeId, Point, SceneNode};

pub mod memory;

pub use memory::MemoryHost;

/// Host errors
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node {0} is not a component")]
    NotAComponent(NodeId),
}

/// Canvas operations the plugin core relies on
pub trait Host {
    /// Create an instance of a component
    fn create_instance_of(&mut self, component: &NodeId) -> Result<NodeId, HostError>;

    /// Duplicate any node next to its source
    fn clone_node(&mut self, node: &NodeId) -> Result<NodeId, HostError>;

    /// Create an empty top-level container with the host's default name
    fn create_container(&mut self) -> NodeId;

    fn resize_node(&mut self, node: &NodeId, width: f64, height: f64) -> Result<(), HostError>;

    fn move_node(&mut self, node: &NodeId, x: f64, y: f64) -> Result<(), HostError>;

    fn rename_node(&mut self, node: &NodeId, name: &str) -> Result<(), HostError>;

    /// Snapshot of a node
    fn node(&self, node: &NodeId) -> Option<SceneNode>;

    /// Snapshots of the selected nodes, in selection order
    fn current_selection(&self) -> Vec<SceneNode>;

    fn set_selection(&mut self, nodes: &[NodeId]) -> Result<(), HostError>;

    /// Center of the visible canvas area
    fn viewport_center(&self) -> Point;

    /// Move the viewport so every given node is visible
    fn scroll_into_view(&mut self, nodes: &[NodeId]) -> Result<(), HostError>;

    /// Show a transient message to the user
    fn notify(&mut self, message: &str);
}
