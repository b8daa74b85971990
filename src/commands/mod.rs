//! CLI commands for boutique

use anyhow::{bail, Context, Result};
use std::fs;
use std::io;
use std::path::Path;

use crate::bridge::Bridge;
use crate::catalog::CatalogEditor;
use crate::config::{BoutiquePaths, Config};
use crate::db::Database;
use crate::host::MemoryHost;
use crate::messages::{Inbound, Outbound};
use crate::models::{Boutique, Stand};
use crate::router::Router;
use crate::store::BoutiqueStore;
use crate::validation;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Summary,
}

/// Initialize boutique for first-time setup
pub fn init(paths: &BoutiquePaths) -> Result<()> {
    if paths.is_initialized() {
        println!("Boutique is already initialized at {}", paths.root.display());
        return Ok(());
    }

    println!("Initializing boutique at {}...", paths.root.display());

    paths.ensure_dirs()?;
    println!("  Created directory structure");

    paths.save_config(&Config::default())?;
    println!("  Created config.toml");

    Database::init(paths)?;
    println!("  Created database");

    println!();
    println!("Boutique initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  boutique add-stand <name>                 Create a stand");
    println!("  boutique add-variation <stand> <w> <h>    Add a size to it");
    println!("  boutique serve                            Serve the plugin UI over stdio");

    Ok(())
}

/// List the stands of a document
pub fn list(paths: &BoutiquePaths, document: Option<&str>, format: OutputFormat) -> Result<()> {
    let (db, document) = open(paths, document)?;
    let editor = CatalogEditor::new(BoutiqueStore::new(db.document(&document)));
    let boutique = editor.saved_boutique()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&boutique)?),
        OutputFormat::Summary => print_boutique(&document, &boutique),
    }
    Ok(())
}

/// Show one stand
pub fn show(
    paths: &BoutiquePaths,
    document: Option<&str>,
    stand_id: usize,
    format: OutputFormat,
) -> Result<()> {
    let (db, document) = open(paths, document)?;
    let editor = CatalogEditor::new(BoutiqueStore::new(db.document(&document)));
    let stand = editor.saved_stand(stand_id)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stand)?),
        OutputFormat::Summary => print_stand(stand_id, &stand),
    }
    Ok(())
}

/// List documents that have a saved catalog
pub fn documents(paths: &BoutiquePaths) -> Result<()> {
    ensure_initialized(paths)?;
    let db = Database::open(paths)?;
    let rows = db.list_values()?;

    if rows.is_empty() {
        println!("No documents found.");
        return Ok(());
    }

    println!("{:<30} {:<12} {:<20}", "DOCUMENT", "KEY", "UPDATED");
    println!("{}", "-".repeat(62));
    for row in rows {
        println!(
            "{:<30} {:<12} {:<20}",
            truncate(&row.document, 28),
            row.key,
            format_timestamp(row.updated_at)
        );
    }
    Ok(())
}

/// Dispatch one command through the router and print what it answers
pub fn send(
    paths: &BoutiquePaths,
    document: Option<&str>,
    scene: Option<&Path>,
    msg: Inbound,
) -> Result<Vec<Outbound>> {
    let config = paths.load_config()?;
    let (db, document) = open(paths, document)?;

    let host = match scene {
        Some(path) => MemoryHost::load(path)?,
        None => MemoryHost::new(),
    };
    let before = host.nodes().len();

    let mut router = Router::new(db.document(&document), host).with_notification(config.notification);
    let outbound = router.handle(msg)?;

    let host = router.host();
    let created = &host.nodes()[before..];
    for node in created {
        println!(
            "Created {} {} \"{}\" at ({}, {}) {}x{}",
            node.node_type, node.id, node.name, node.x, node.y, node.width, node.height
        );
    }
    for message in host.notifications() {
        println!("{}", message);
    }
    if let Some(path) = scene {
        host.save(path)?;
    }

    for msg in &outbound {
        print_outbound(&document, msg);
    }
    Ok(outbound)
}

/// Replace a document's catalog with the contents of an export file
pub fn import(paths: &BoutiquePaths, document: Option<&str>, file: &Path) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let data = validation::parse_boutique(&content)
        .with_context(|| format!("Failed to import {}", file.display()))?;
    let count = data.len();

    send(paths, document, None, Inbound::RequestImport { data })?;
    println!("✓ Imported {} stands from {}", count, file.display());
    Ok(())
}

/// Write a document's catalog as JSON to a file, or stdout
pub fn export(paths: &BoutiquePaths, document: Option<&str>, output: Option<&Path>) -> Result<()> {
    let (db, document) = open(paths, document)?;
    let mut router = Router::new(db.document(&document), MemoryHost::new());

    let data = match router.handle(Inbound::RequestExport)?.pop() {
        Some(Outbound::ExportData { data }) => data,
        other => bail!("Unexpected export response: {:?}", other),
    };
    let json = serde_json::to_string_pretty(&data)?;

    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Exported {} stands to {}", data.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Serve the plugin UI over stdin/stdout
pub fn serve(paths: &BoutiquePaths, document: Option<&str>, scene: Option<&Path>) -> Result<()> {
    let config = paths.load_config()?;
    let (db, document) = open(paths, document)?;
    log::info!("Serving document '{}'", document);

    let host = match scene {
        Some(path) => MemoryHost::load(path)?,
        None => MemoryHost::new(),
    };
    let router = Router::new(db.document(&document), host).with_notification(config.notification);
    let mut bridge = Bridge::new(router);
    if let Some(path) = scene {
        bridge = bridge.with_scene_file(path.to_path_buf());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    bridge.run(stdin.lock(), stdout.lock())
}

fn open(paths: &BoutiquePaths, document: Option<&str>) -> Result<(Database, String)> {
    ensure_initialized(paths)?;
    let document = match document {
        Some(name) => name.to_string(),
        None => paths.load_config()?.default_document,
    };
    Ok((Database::open(paths)?, document))
}

fn ensure_initialized(paths: &BoutiquePaths) -> Result<()> {
    if !paths.is_initialized() {
        bail!("Boutique is not initialized. Run: boutique init");
    }
    Ok(())
}

fn print_outbound(document: &str, msg: &Outbound) {
    match msg {
        Outbound::Empty => {
            println!("No stands in '{}'.", document);
            println!("Create one with: boutique add-stand <name>");
        }
        Outbound::Render { boutique } => print_boutique(document, boutique),
        Outbound::ExportData { data } => println!("Exported {} stands", data.len()),
        Outbound::RemovedVariation { stand_id, stand } => {
            println!("Removed variation");
            print_stand(*stand_id, stand);
        }
        Outbound::EditedStand { stand_id, stand } => {
            println!("Renamed stand");
            print_stand(*stand_id, stand);
        }
        Outbound::EditedVariation { variation } => println!(
            "Variation {} of stand {} is now {}x{}",
            variation.variation_id, variation.stand_id, variation.width, variation.height
        ),
        Outbound::AddedVariation { stand_id, stand } => {
            println!("Added variation");
            print_stand(*stand_id, stand);
        }
        Outbound::Error { message } => eprintln!("Error: {}", message),
    }
}

fn print_boutique(document: &str, boutique: &Boutique) {
    if boutique.is_empty() {
        println!("No stands in '{}'.", document);
        println!("Create one with: boutique add-stand <name>");
        return;
    }

    println!("{:<4} {:<30} {:<10}", "ID", "STAND", "SIZES");
    println!("{}", "-".repeat(46));
    for (id, stand) in boutique.stands().iter().enumerate() {
        println!(
            "{:<4} {:<30} {:<10}",
            id,
            truncate(&stand.name, 28),
            stand.variations.len()
        );
    }
}

fn print_stand(stand_id: usize, stand: &Stand) {
    println!("Stand {}: {}", stand_id, stand.name);
    println!("{}", "=".repeat(50));
    if stand.variations.is_empty() {
        println!("  (no variations)");
    }
    for (id, variation) in stand.variations.iter().enumerate() {
        match &variation.name {
            Some(name) => println!("  {:<3} {:<14} {}", id, variation.dimensions(), name),
            None => println!("  {:<3} {}", id, variation.dimensions()),
        }
    }
}

fn format_timestamp(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
