//! Structured per-request log: one JSON line per outbound call to the
//! control plane, independent of whatever `tracing` subscriber is active,
//! so the log survives even when human-readable tracing output doesn't.

use chrono::Utc;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

pub struct RequestLogger {
    file: Mutex<File>,
}

impl RequestLogger {
    pub fn open(logs_dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(logs_dir)?;
        let filename = format!("chaos_orchestrator_{}.json", Utc::now().format("%Y-%m-%d_%H-%M-%S"));
        let file = OpenOptions::new().create(true).append(true).open(logs_dir.join(filename))?;
        Ok(Self { file: Mutex::new(file) })
    }

    pub fn log(&self, producer: &str, endpoint: &str, data: &Value, response_status: Option<u16>, error: Option<&str>) {
        let entry = json!({
            "timestamp": Utc::now().to_rfc3339(),
            "thread": producer,
            "endpoint": endpoint,
            "data": data,
            "response_status": response_status,
            "error": error,
        });
        let line = entry.to_string();
        tracing::info!(target: "request_log", %line);
        let mut file = self.file.lock();
        let _ = writeln!(file, "{line}");
    }
}
