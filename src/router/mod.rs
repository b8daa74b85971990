//! Message router
//!
//! Handles one UI command to completion and returns what to send back.
//! Run commands act on the canvas; everything else edits the catalog and
//! answers with either a full render or a targeted acknowledgement.

use anyhow::{Context, Result};

use crate::catalog::CatalogEditor;
use crate::host::Host;
use crate::layout;
use crate::messages::{Inbound, Outbound};
use crate::models::{NodeId, Stand, Variation};
use crate::store::{BoutiqueStore, PluginData};
use crate::validation;

/// Message shown after nodes were generated
pub const DEFAULT_NOTIFICATION: &str = "🕺 Frametastic!";

/// Dispatches inbound messages to the catalog and the layout engine
pub struct Router<P: PluginData, H: Host> {
    editor: CatalogEditor<P>,
    host: H,
    notification: String,
}

impl<P: PluginData, H: Host> Router<P, H> {
    pub fn new(data: P, host: H) -> Self {
        Self {
            editor: CatalogEditor::new(BoutiqueStore::new(data)),
            host,
            notification: DEFAULT_NOTIFICATION.to_string(),
        }
    }

    /// Override the post-run notification text
    pub fn with_notification(mut self, notification: impl Into<String>) -> Self {
        self.notification = notification.into();
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn editor(&self) -> &CatalogEditor<P> {
        &self.editor
    }

    /// `empty` when there are no stands, `render` otherwise
    pub fn render_from_saved_state(&self) -> Result<Outbound> {
        let boutique = self.editor.saved_boutique()?;
        if boutique.is_empty() {
            Ok(Outbound::Empty)
        } else {
            Ok(Outbound::Render { boutique })
        }
    }

    /// Handle one command
    pub fn handle(&mut self, msg: Inbound) -> Result<Vec<Outbound>> {
        log::debug!("Dispatching {}", msg.kind());

        let outbound = match msg {
            Inbound::RunStand { stand_id } => {
                let stand = self.editor.saved_stand(stand_id)?;
                self.run_stand(&stand)?;
                vec![]
            }
            Inbound::RunVariation {
                stand_id,
                variation_id,
            } => {
                let variation = self.editor.saved_variation(stand_id, variation_id)?;
                self.run_variation(&variation)?;
                vec![]
            }
            Inbound::RequestImport { data } => {
                validation::validate_import(&data)?;
                self.editor.import(&data)?;
                vec![self.render_from_saved_state()?]
            }
            Inbound::RequestExport => vec![Outbound::ExportData {
                data: self.editor.saved_boutique()?,
            }],
            Inbound::RequestDump => {
                self.editor.dump()?;
                vec![self.render_from_saved_state()?]
            }
            Inbound::RemoveStand { stand_id } => {
                self.editor.remove_stand(stand_id)?;
                vec![self.render_from_saved_state()?]
            }
            Inbound::RemoveVariation {
                stand_id,
                variation_id,
            } => {
                let change = self.editor.remove_variation(stand_id, variation_id)?;
                vec![Outbound::RemovedVariation {
                    stand_id: change.stand_id,
                    stand: change.stand,
                }]
            }
            Inbound::EditStand { stand_id, name } => {
                let change = self.editor.edit_stand(stand_id, &name)?;
                vec![Outbound::EditedStand {
                    stand_id: change.stand_id,
                    stand: change.stand,
                }]
            }
            Inbound::EditVariation {
                stand_id,
                variation_id,
                width,
                height,
            } => {
                let variation = self
                    .editor
                    .edit_variation(stand_id, variation_id, width, height)?;
                vec![Outbound::EditedVariation { variation }]
            }
            Inbound::AddStand { name } => {
                self.editor.add_stand(&name)?;
                vec![self.render_from_saved_state()?]
            }
            Inbound::AddVariation {
                stand_id,
                width,
                height,
            } => {
                let change = self.editor.add_variation(stand_id, width, height)?;
                vec![Outbound::AddedVariation {
                    stand_id: change.stand_id,
                    stand: change.stand,
                }]
            }
        };

        Ok(outbound)
    }

    /// Generate a stand next to every selected node, or once at the viewport center
    fn run_stand(&mut self, stand: &Stand) -> Result<()> {
        let selection = self.host.current_selection();
        if selection.is_empty() {
            let created = layout::create_stand(&mut self.host, None, stand)?;
            self.select_and_reveal(&created)?;
        } else {
            for node in &selection {
                layout::create_stand(&mut self.host, Some(node), stand)
                    .with_context(|| format!("Failed to generate stand next to {}", node.id))?;
            }
        }
        self.host.notify(&self.notification);
        Ok(())
    }

    /// Same as [`Self::run_stand`] for a single variation
    fn run_variation(&mut self, variation: &Variation) -> Result<()> {
        let selection = self.host.current_selection();
        if selection.is_empty() {
            let created = layout::create_variation(&mut self.host, None, variation, 0.0)?;
            self.select_and_reveal(&[created])?;
        } else {
            for node in &selection {
                layout::create_variation(&mut self.host, Some(node), variation, 0.0)
                    .with_context(|| format!("Failed to generate variation next to {}", node.id))?;
            }
        }
        self.host.notify(&self.notification);
        Ok(())
    }

    fn select_and_reveal(&mut self, nodes: &[NodeId]) -> Result<()> {
        self.host.set_selection(nodes)?;
        self.host.scroll_into_view(nodes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::models::{Bounds, Boutique, NodeType, SPACING};
    use crate::store::MemoryPluginData;

    fn router() -> Router<MemoryPluginData, MemoryHost> {
        let host = MemoryHost::with_viewport(Bounds {
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 600.0,
        });
        let mut router = Router::new(MemoryPluginData::new(), host);
        router
            .handle(Inbound::RequestImport {
                data: Boutique::from(vec![Stand {
                    name: "Devices".to_string(),
                    variations: vec![
                        Variation::named(375.0, 812.0, "Phone"),
                        Variation::new(768.0, 1024.0),
                    ],
                }]),
            })
            .unwrap();
        router
    }

    #[test]
    fn test_initial_render_is_empty() {
        let router = Router::new(MemoryPluginData::new(), MemoryHost::new());
        assert_eq!(router.render_from_saved_state().unwrap(), Outbound::Empty);
    }

    #[test]
    fn test_run_stand_without_selection() {
        let mut router = router();
        let out = router.handle(Inbound::RunStand { stand_id: 0 }).unwrap();
        assert!(out.is_empty());

        let host = router.host();
        assert_eq!(host.nodes().len(), 2);
        let selected = host.current_selection();
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].name, "Phone");
        assert_eq!((selected[0].x, selected[0].y), (400.0 + SPACING, 300.0));
        assert_eq!(selected[1].name, crate::host::memory::DEFAULT_CONTAINER_NAME);
        assert_eq!(selected[1].x, 400.0 + SPACING + 375.0 + SPACING);
        assert_eq!(host.viewport().x, 400.0 + SPACING);
        assert_eq!(host.notifications(), &[DEFAULT_NOTIFICATION.to_string()]);
    }

    #[test]
    fn test_run_stand_with_selection() {
        let mut router = router();
        let a = router
            .host_mut()
            .add_node(NodeType::Frame, "Hero", 0.0, 0.0, 1440.0, 900.0);
        let b = router
            .host_mut()
            .add_node(NodeType::Component, "Card", 0.0, 2000.0, 300.0, 400.0);
        router.host_mut().set_selection(&[a.clone(), b.clone()]).unwrap();

        router.handle(Inbound::RunStand { stand_id: 0 }).unwrap();

        let host = router.host();
        assert_eq!(host.nodes().len(), 2 + 4);
        assert_eq!(host.selection_ids(), &[a, b]);

        let names: Vec<&str> = host.nodes()[2..].iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Hero-Phone", "Hero-768x1024", "Card-Phone", "Card-768x1024"]);
        let card_copies = &host.nodes()[4..];
        assert!(card_copies.iter().all(|n| n.node_type == NodeType::Instance));
        assert!(card_copies.iter().all(|n| n.y == 2000.0));
        assert_eq!(card_copies[0].x, 300.0 + SPACING);
    }

    #[test]
    fn test_run_variation_without_selection() {
        let mut router = router();
        router
            .handle(Inbound::RunVariation {
                stand_id: 0,
                variation_id: 1,
            })
            .unwrap();
        let selected = router.host().current_selection();
        assert_eq!(selected.len(), 1);
        assert_eq!((selected[0].width, selected[0].height), (768.0, 1024.0));
    }

    #[test]
    fn test_run_unknown_stand_fails_without_side_effects() {
        let mut router = router();
        assert!(router.handle(Inbound::RunStand { stand_id: 4 }).is_err());
        assert!(router.host().nodes().is_empty());
        assert!(router.host().notifications().is_empty());
    }

    #[test]
    fn test_dump_then_render_is_empty() {
        let mut router = router();
        let out = router.handle(Inbound::RequestDump).unwrap();
        assert_eq!(out, vec![Outbound::Empty]);
        assert_eq!(router.render_from_saved_state().unwrap(), Outbound::Empty);
    }

    #[test]
    fn test_add_stand_renders_newest_first() {
        let mut router = router();
        let out = router
            .handle(Inbound::AddStand {
                name: "Social".to_string(),
            })
            .unwrap();
        let [Outbound::Render { boutique }] = out.as_slice() else {
            panic!("expected a single render, got {:?}", out);
        };
        assert_eq!(boutique.stands()[0].name, "Social");
        assert_eq!(boutique.stands()[1].name, "Devices");
    }

    #[test]
    fn test_targeted_acknowledgements() {
        let mut router = router();

        let out = router
            .handle(Inbound::AddVariation {
                stand_id: 0,
                width: 1920.0,
                height: 1080.0,
            })
            .unwrap();
        assert!(matches!(
            &out[..],
            [Outbound::AddedVariation { stand_id: 0, stand }] if stand.variations.len() == 3
        ));

        let out = router
            .handle(Inbound::EditStand {
                stand_id: 0,
                name: "Screens".to_string(),
            })
            .unwrap();
        assert!(matches!(
            &out[..],
            [Outbound::EditedStand { stand_id: 0, stand }] if stand.name == "Screens"
        ));

        let out = router
            .handle(Inbound::EditVariation {
                stand_id: 0,
                variation_id: 1,
                width: 390.0,
                height: 844.0,
            })
            .unwrap();
        assert!(matches!(
            &out[..],
            [Outbound::EditedVariation { variation }] if variation.variation_id == 1 && variation.width == 390.0
        ));

        let out = router
            .handle(Inbound::RemoveVariation {
                stand_id: 0,
                variation_id: 0,
            })
            .unwrap();
        assert!(matches!(
            &out[..],
            [Outbound::RemovedVariation { stand_id: 0, stand }] if stand.variations.len() == 2
        ));
    }

    #[test]
    fn test_export_and_remove_stand() {
        let mut router = router();
        let out = router.handle(Inbound::RequestExport).unwrap();
        assert!(matches!(&out[..], [Outbound::ExportData { data }] if data.len() == 1));

        let out = router.handle(Inbound::RemoveStand { stand_id: 0 }).unwrap();
        assert_eq!(out, vec![Outbound::Empty]);
    }

    #[test]
    fn test_import_rejects_invalid_sizes() {
        let mut router = router();
        let result = router.handle(Inbound::RequestImport {
            data: Boutique::from(vec![Stand {
                name: "Bad".to_string(),
                variations: vec![Variation::new(-5.0, 10.0)],
            }]),
        });
        assert!(result.is_err());
        assert_eq!(router.editor().saved_stand(0).unwrap().name, "Devices");
    }
}
