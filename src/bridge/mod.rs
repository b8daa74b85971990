//! UI bridge
//!
//! Line-delimited JSON over a reader/writer pair (stdio when serving).
//! Each input line is one [`Inbound`] message; each output line is one
//! [`Outbound`] message. Messages are handled strictly one at a time.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::host::MemoryHost;
use crate::messages::{Inbound, Outbound};
use crate::router::Router;
use crate::store::PluginData;

/// Serves one document's catalog to a UI over a line protocol
pub struct Bridge<P: PluginData> {
    router: Router<P, MemoryHost>,
    scene_path: Option<PathBuf>,
}

impl<P: PluginData> Bridge<P> {
    pub fn new(router: Router<P, MemoryHost>) -> Self {
        Self {
            router,
            scene_path: None,
        }
    }

    /// Save the canvas to this file after every message
    pub fn with_scene_file(mut self, path: PathBuf) -> Self {
        self.scene_path = Some(path);
        self
    }

    /// Send the initial render, then serve until the input closes
    pub fn run<R: BufRead, W: Write>(&mut self, mut reader: R, mut writer: W) -> Result<()> {
        log::info!("Boutique bridge starting (line-delimited JSON)");

        let initial = self.router.render_from_saved_state().unwrap_or_else(|e| {
            log::error!("Failed to load saved boutique: {:#}", e);
            Outbound::Error {
                message: format!("Failed to load saved boutique: {:#}", e),
            }
        });
        send(&mut writer, &initial)?;

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let replies = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line),
                Err(e) => {
                    log::warn!("Rejected message: {}", e);
                    vec![Outbound::Error {
                        message: format!("Parse error: {}", e),
                    }]
                }
            };
            for msg in &replies {
                send(&mut writer, msg)?;
            }

            if let Err(e) = self.save_scene() {
                log::error!("Failed to save scene: {:#}", e);
                send(
                    &mut writer,
                    &Outbound::Error {
                        message: format!("Failed to save scene: {:#}", e),
                    },
                )?;
            }
        }

        log::info!("Input closed, bridge stopping");
        Ok(())
    }

    /// Handle a single raw line; failures become an `error` message
    pub fn handle_line(&mut self, line: &str) -> Vec<Outbound> {
        let msg: Inbound = match serde_json::from_str(line) {
            Ok(msg) => msg,
            Err(e) => {
                log::warn!("Rejected message: {}", e);
                return vec![Outbound::Error {
                    message: format!("Parse error: {}", e),
                }];
            }
        };

        let kind = msg.kind();
        match self.router.handle(msg) {
            Ok(outbound) => outbound,
            Err(e) => {
                log::error!("{} failed: {:#}", kind, e);
                vec![Outbound::Error {
                    message: format!("{} failed: {:#}", kind, e),
                }]
            }
        }
    }

    fn save_scene(&self) -> Result<()> {
        if let Some(path) = &self.scene_path {
            self.router.host().save(path)?;
        }
        Ok(())
    }
}

fn send<W: Write>(writer: &mut W, msg: &Outbound) -> Result<()> {
    let json = serde_json::to_string(msg)?;
    writeln!(writer, "{}", json)?;
    writer.flush()?;
    Ok(())
}
