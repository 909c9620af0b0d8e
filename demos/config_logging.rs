//! Declarative configuration example
//!
//! Demonstrates configuring named loggers from JSON through the global
//! manager, and registering a custom directive.
//!
//! Run with: cargo run --example config_logging

use pattern_logger::core::directive::LiteralStep;
use pattern_logger::prelude::*;
use pattern_logger::{debug, info, warn};

fn main() -> Result<()> {
    println!("=== Pattern Logger - Config Example ===\n");

    let hostname = std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
    register_directive("H", move |_| Box::new(LiteralStep::new(hostname.clone())));

    let log_path = std::env::temp_dir().join("pattern_logger_config_demo.log");
    let config = LogConfig::from_json(&format!(
        r#"{{
            "loggers": [
                {{
                    "name": "http",
                    "level": "info",
                    "formatter": "%d{{%H:%M:%S}} %H [%p] %c %m%n",
                    "appenders": [{{ "type": "stdout" }}]
                }},
                {{
                    "name": "db",
                    "level": "debug",
                    "appenders": [
                        {{ "type": "stdout", "level": "warn", "formatter": "[%p] %c %m%n" }},
                        {{ "type": "file", "path": {:?} }}
                    ]
                }}
            ]
        }}"#,
        log_path.display().to_string()
    ))?;

    LoggerManager::global().configure(&config)?;

    let http = logger("http");
    let db = logger("db");

    debug!(http, "hidden: http logger is at INFO");
    info!(http, "GET /index.html 200");
    debug!(db, "only in the file");
    warn!(db, "slow query: {}ms", 850);
    info!(root_logger(), "root logger uses the default pattern");

    println!("\nKnown loggers: {:?}", LoggerManager::global().logger_names());
    println!("db log file: {}", log_path.display());

    println!("=== Example completed successfully! ===");
    Ok(())
}
