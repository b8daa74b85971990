//! Messages exchanged with the plugin UI
//!
//! Tagged on `"type"` with kebab-case tags and camelCase fields, e.g.
//! `{"type":"run-variation","standId":0,"variationId":2}`.

use serde::{Deserialize, Serialize};

use crate::catalog::EditedVariation;
use crate::models::{Boutique, Stand};

/// Commands sent by the UI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Inbound {
    RunStand {
        stand_id: usize,
    },
    RunVariation {
        stand_id: usize,
        variation_id: usize,
    },
    RequestImport {
        data: Boutique,
    },
    RequestExport,
    RequestDump,
    RemoveStand {
        stand_id: usize,
    },
    RemoveVariation {
        stand_id: usize,
        variation_id: usize,
    },
    EditStand {
        stand_id: usize,
        name: String,
    },
    EditVariation {
        stand_id: usize,
        variation_id: usize,
        width: f64,
        height: f64,
    },
    AddStand {
        name: String,
    },
    AddVariation {
        stand_id: usize,
        width: f64,
        height: f64,
    },
}

impl Inbound {
    /// Wire tag, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Inbound::RunStand { .. } => "run-stand",
            Inbound::RunVariation { .. } => "run-variation",
            Inbound::RequestImport { .. } => "request-import",
            Inbound::RequestExport => "request-export",
            Inbound::RequestDump => "request-dump",
            Inbound::RemoveStand { .. } => "remove-stand",
            Inbound::RemoveVariation { .. } => "remove-variation",
            Inbound::EditStand { .. } => "edit-stand",
            Inbound::EditVariation { .. } => "edit-variation",
            Inbound::AddStand { .. } => "add-stand",
            Inbound::AddVariation { .. } => "add-variation",
        }
    }
}

/// Responses and notifications sent to the UI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Outbound {
    /// No stands exist
    Empty,
    /// Full catalog snapshot
    Render {
        boutique: Boutique,
    },
    ExportData {
        data: Boutique,
    },
    RemovedVariation {
        stand_id: usize,
        stand: Stand,
    },
    EditedStand {
        stand_id: usize,
        stand: Stand,
    },
    EditedVariation {
        variation: EditedVariation,
    },
    AddedVariation {
        stand_id: usize,
        stand: Stand,
    },
    /// A command could not be carried out
    Error {
        message: String,
    },
}
