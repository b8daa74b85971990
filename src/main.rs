//! boutique - stands of size variations for the design canvas
//!
//! Manage stands from the command line, or serve them to the plugin UI over stdio.

use boutique::commands::{self, OutputFormat};
use boutique::config::BoutiquePaths;
use boutique::messages::Inbound;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "boutique")]
#[command(author, version, about = "Boutique - named stands of frame sizes, generated next to your selection")]
struct Cli {
    /// Document whose catalog to use (defaults to config.toml's default_document)
    #[arg(short, long, global = true)]
    document: Option<String>,

    /// Boutique home directory (defaults to ~/.boutique)
    #[arg(long, global = true, env = "BOUTIQUE_HOME")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize boutique (first-time setup)
    Init,

    /// List the stands of a document
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a stand and its variations
    Show {
        /// Stand ID (position in the list)
        stand_id: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List documents with saved stands
    Documents,

    /// Create a stand at the top of the list
    AddStand {
        name: String,
    },

    /// Rename a stand
    EditStand {
        stand_id: usize,
        name: String,
    },

    /// Delete a stand
    RemoveStand {
        stand_id: usize,
    },

    /// Add a size to the top of a stand
    AddVariation {
        stand_id: usize,
        width: f64,
        height: f64,
    },

    /// Replace a size (drops its name)
    EditVariation {
        stand_id: usize,
        variation_id: usize,
        width: f64,
        height: f64,
    },

    /// Delete a size from a stand
    RemoveVariation {
        stand_id: usize,
        variation_id: usize,
    },

    /// Generate every size of a stand on a canvas scene
    RunStand {
        stand_id: usize,

        /// Scene file holding the canvas
        #[arg(short, long)]
        scene: PathBuf,
    },

    /// Generate a single size on a canvas scene
    RunVariation {
        stand_id: usize,
        variation_id: usize,

        /// Scene file holding the canvas
        #[arg(short, long)]
        scene: PathBuf,
    },

    /// Replace all stands with the contents of an export file
    Import {
        file: PathBuf,
    },

    /// Export all stands as JSON
    Export {
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete all stands
    Dump,

    /// Serve the plugin UI (line-delimited JSON over stdio)
    Serve {
        /// Scene file holding the canvas (in-memory when omitted)
        #[arg(short, long)]
        scene: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let paths = match cli.home {
        Some(root) => BoutiquePaths::at(root),
        None => BoutiquePaths::new()?,
    };
    let document = cli.document.as_deref();

    match cli.command {
        Commands::Init => {
            commands::init(&paths)?;
        }
        Commands::List { json } => {
            commands::list(&paths, document, format(json))?;
        }
        Commands::Show { stand_id, json } => {
            commands::show(&paths, document, stand_id, format(json))?;
        }
        Commands::Documents => {
            commands::documents(&paths)?;
        }
        Commands::AddStand { name } => {
            commands::send(&paths, document, None, Inbound::AddStand { name })?;
        }
        Commands::EditStand { stand_id, name } => {
            commands::send(&paths, document, None, Inbound::EditStand { stand_id, name })?;
        }
        Commands::RemoveStand { stand_id } => {
            commands::send(&paths, document, None, Inbound::RemoveStand { stand_id })?;
        }
        Commands::AddVariation {
            stand_id,
            width,
            height,
        } => {
            let msg = Inbound::AddVariation {
                stand_id,
                width,
                height,
            };
            commands::send(&paths, document, None, msg)?;
        }
        Commands::EditVariation {
            stand_id,
            variation_id,
            width,
            height,
        } => {
            let msg = Inbound::EditVariation {
                stand_id,
                variation_id,
                width,
                height,
            };
            commands::send(&paths, document, None, msg)?;
        }
        Commands::RemoveVariation {
            stand_id,
            variation_id,
        } => {
            let msg = Inbound::RemoveVariation {
                stand_id,
                variation_id,
            };
            commands::send(&paths, document, None, msg)?;
        }
        Commands::RunStand { stand_id, scene } => {
            commands::send(&paths, document, Some(&scene), Inbound::RunStand { stand_id })?;
        }
        Commands::RunVariation {
            stand_id,
            variation_id,
            scene,
        } => {
            let msg = Inbound::RunVariation {
                stand_id,
                variation_id,
            };
            commands::send(&paths, document, Some(&scene), msg)?;
        }
        Commands::Import { file } => {
            commands::import(&paths, document, &file)?;
        }
        Commands::Export { output } => {
            commands::export(&paths, document, output.as_deref())?;
        }
        Commands::Dump => {
            commands::send(&paths, document, None, Inbound::RequestDump)?;
        }
        Commands::Serve { scene } => {
            commands::serve(&paths, document, scene.as_deref())?;
        }
    }

    Ok(())
}

fn format(json: bool) -> OutputFormat {
    if json {
        OutputFormat::Json
    } else {
        OutputFormat::Summary
    }
}
