//! Layout engine
//!
//! Places generated nodes in a row. With an anchor, each node copies the
//! anchor and sits to its right; without one, fresh containers start from
//! the viewport center. Consecutive variations of a stand are separated by
//! [`SPACING`].
//!
//! Planning is pure. [`create_variation`] and [`create_stand`] carry a plan
//! out through the [`Host`].

use crate::host::{Host, HostError};
use crate::models::{NodeId, NodeType, Point, SceneNode, Stand, Variation, SPACING};

/// Where a generated node comes from
#[derive(Debug, Clone, PartialEq)]
pub enum NodeSource {
    /// Instance of the anchor component
    Instance(NodeId),
    /// Plain duplicate of the anchor
    Clone(NodeId),
    /// New empty container
    Container,
}

/// A node the layout wants created
#[derive(Debug, Clone, PartialEq)]
pub struct NodePlan {
    pub source: NodeSource,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// `None` keeps whatever name the host assigns
    pub name: Option<String>,
}

/// Plan one variation, shifted right by `offset`
pub fn plan_variation(
    anchor: Option<&SceneNode>,
    variation: &Variation,
    offset: f64,
    viewport_center: Point,
) -> NodePlan {
    match anchor {
        Some(anchor) => NodePlan {
            source: if anchor.node_type == NodeType::Component {
                NodeSource::Instance(anchor.id.clone())
            } else {
                NodeSource::Clone(anchor.id.clone())
            },
            x: anchor.right() + SPACING + offset,
            y: anchor.y,
            width: variation.width,
            height: variation.height,
            name: Some(format!("{}-{}", anchor.name, variation.label())),
        },
        None => NodePlan {
            source: NodeSource::Container,
            x: viewport_center.x + SPACING + offset,
            y: viewport_center.y,
            width: variation.width,
            height: variation.height,
            name: variation.name.clone().filter(|name| !name.is_empty()),
        },
    }
}

/// Plan every variation of a stand, left to right
pub fn plan_stand(anchor: Option<&SceneNode>, stand: &Stand, viewport_center: Point) -> Vec<NodePlan> {
    let mut offset = 0.0;
    let mut plans = Vec::with_capacity(stand.variations.len());
    for variation in &stand.variations {
        plans.push(plan_variation(anchor, variation, offset, viewport_center));
        offset += variation.width + SPACING;
    }
    plans
}

/// Create the node described by a plan
pub fn realize<H: Host>(host: &mut H, plan: &NodePlan) -> Result<NodeId, HostError> {
    let id = match &plan.source {
        NodeSource::Instance(component) => host.create_instance_of(component)?,
        NodeSource::Clone(node) => host.clone_node(node)?,
        NodeSource::Container => host.create_container(),
    };
    if let Some(name) = &plan.name {
        host.rename_node(&id, name)?;
    }
    host.move_node(&id, plan.x, plan.y)?;
    host.resize_node(&id, plan.width, plan.height)?;
    log::info!(
        "Created {} at ({}, {}) sized {}x{}",
        id,
        plan.x,
        plan.y,
        plan.width,
        plan.height
    );
    Ok(id)
}

/// Create one variation next to `anchor`, or at the viewport center
pub fn create_variation<H: Host>(
    host: &mut H,
    anchor: Option<&SceneNode>,
    variation: &Variation,
    offset: f64,
) -> Result<NodeId, HostError> {
    let plan = plan_variation(anchor, variation, offset, host.viewport_center());
    realize(host, &plan)
}

/// Create a whole stand; ids come back in creation order
pub fn create_stand<H: Host>(
    host: &mut H,
    anchor: Option<&SceneNode>,
    stand: &Stand,
) -> Result<Vec<NodeId>, HostError> {
    let plans = plan_stand(anchor, stand, host.viewport_center());
    plans.iter().map(|plan| realize(host, plan)).collect()
}
