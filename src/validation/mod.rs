//! Shape validation for imported catalogs

use anyhow::{bail, Result};
use jsonschema::JSONSchema;
use serde_json::{json, Value};

use crate::models::Boutique;

/// JSON schema of a persisted catalog
pub fn boutique_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "array",
        "items": {
            "type": "object",
            "required": ["name", "variations"],
            "properties": {
                "name": { "type": "string" },
                "variations": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["width", "height"],
                        "properties": {
                            "width": { "type": "number", "exclusiveMinimum": 0 },
                            "height": { "type": "number", "exclusiveMinimum": 0 },
                            "name": { "type": "string" }
                        }
                    }
                }
            }
        }
    })
}

/// Validate raw JSON against the catalog schema
pub fn validate_boutique(value: &Value) -> Result<()> {
    let schema = boutique_schema();
    let compiled = JSONSchema::compile(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile boutique schema: {}", e))?;

    if let Err(errors) = compiled.validate(value) {
        let error_messages: Vec<String> = errors
            .map(|e| format!("{}: {}", e.instance_path, e))
            .collect();
        bail!("Invalid boutique:\n{}", error_messages.join("\n"));
    }

    Ok(())
}

/// Validate an already typed catalog before it replaces the saved one
pub fn validate_import(boutique: &Boutique) -> Result<()> {
    // NaN and infinities serialize as null, which the schema rejects
    let value = serde_json::to_value(boutique)?;
    validate_boutique(&value)
}

/// Parse and validate an export file's contents
pub fn parse_boutique(content: &str) -> Result<Boutique> {
    let value: Value = serde_json::from_str(content)?;
    validate_boutique(&value)?;
    Ok(serde_json::from_value(value)?)
}
