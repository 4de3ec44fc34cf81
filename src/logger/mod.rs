//! Logger module
//!
//! Leveled, structured logging for the HTTP server:
//! - Server lifecycle logging
//! - Per-request informational logging
//! - Warning and error logging with contextual fields
//! - Optional file-based logging via the writer submodule

pub mod writer;

use crate::config::Config;
use crate::error::HandlerError;
use chrono::Local;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Minimum level that gets written; Info by default until `init` runs
static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

/// Log severity, ordered from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
}

impl Level {
    /// Parse a configured level name; unknown names fall back to Info
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "error" => Self::Error,
            "warn" | "warning" => Self::Warn,
            _ => Self::Info,
        }
    }
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    LOG_LEVEL.store(Level::parse(&config.logging.level) as u8, Ordering::Relaxed);
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn enabled(level: Level) -> bool {
    level as u8 <= LOG_LEVEL.load(Ordering::Relaxed)
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%z").to_string()
}

/// Write to info log with level filtering
fn write_info(level_tag: &str, message: &str) {
    let line = format!("{} [{level_tag}] {message}", timestamp());
    if writer::is_initialized() {
        writer::get().write_info(&line);
    } else {
        println!("{line}");
    }
}

/// Write to error log with level filtering
fn write_error(level_tag: &str, message: &str) {
    let line = format!("{} [{level_tag}] {message}", timestamp());
    if writer::is_initialized() {
        writer::get().write_error(&line);
    } else {
        eprintln!("{line}");
    }
}

pub fn log_info(message: &str) {
    if enabled(Level::Info) {
        write_info("INFO", message);
    }
}

pub fn log_warning(message: &str) {
    if enabled(Level::Warn) {
        write_error("WARN", message);
    }
}

pub fn log_error(message: &str) {
    if enabled(Level::Error) {
        write_error("ERROR", message);
    }
}

pub fn log_server_start(addr: &SocketAddr) {
    log_info(&format!("Server listening on port {}", addr.port()));
    log_info(&format!("Bound to http://{addr}"));
}

pub fn log_bind_failed(addr: &SocketAddr, err: &std::io::Error) {
    log_error(&format!("Error starting server addr={addr} cause={err}"));
}

pub fn log_root_request() {
    log_info("Request to root path received");
}

/// Log the resolved query parameters together with the generated greeting
pub fn log_greeting(query: &[(String, String)], message: &str) {
    if !enabled(Level::Info) {
        return;
    }
    let mut map = serde_json::Map::new();
    for (key, value) in query {
        map.insert(key.clone(), serde_json::Value::String(value.clone()));
    }
    let query_json = serde_json::Value::Object(map);
    write_info("INFO", &format!("Greeting generated: {message} query={query_json}"));
}

pub fn log_route_miss(url: &str) {
    log_warning(&format!("Resource not found (404) url={url}"));
}

pub fn log_handler_error(err: &HandlerError, method: &str, path: &str) {
    log_error(&format!(
        "An error occurred request={method} {path} status={} error={err}",
        err.status_code()
    ));
}

pub fn log_accept_error(err: &std::io::Error) {
    log_error(&format!("Failed to accept connection: {err}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    log_error(&format!("Failed to serve connection: {err:?}"));
}
