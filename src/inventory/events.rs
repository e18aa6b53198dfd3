use crate::inventory::paths::InventoryPaths;
use crate::inventory::util::now_epoch_secs;
use crate::inventory::warn::{self, WarnEvent};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandEvent {
    pub at_epoch_secs: u64,
    pub command: String,
    pub status: String,
    pub message: String,
}

pub fn events_path(logs_dir: &Path) -> PathBuf {
    logs_dir.join("events.jsonl")
}

pub fn append_event(logs_dir: &Path, command: &str, status: &str, message: &str) -> Result<()> {
    fs::create_dir_all(logs_dir)
        .with_context(|| format!("failed to create {}", logs_dir.display()))?;
    let event = CommandEvent {
        at_epoch_secs: now_epoch_secs()?,
        command: command.to_string(),
        status: status.to_string(),
        message: message.to_string(),
    };

    let line = format!("{}\n", serde_json::to_string(&event)?);
    let path = events_path(logs_dir);
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    file.write_all(line.as_bytes())?;
    Ok(())
}

/// Appends when a logs dir is configured; a failed write only warns.
pub fn record(paths: &InventoryPaths, command: &str, status: &str, message: &str) {
    let Some(logs_dir) = paths.logs_dir.as_deref() else {
        return;
    };
    if let Err(err) = append_event(logs_dir, command, status, message) {
        warn::emit(WarnEvent {
            code: "EVENT_LOG_WRITE",
            stage: command,
            path: &logs_dir.display().to_string(),
            reason: "event log append failed",
            err: &format!("{err:#}"),
        });
    }
}
