//! Runtime configuration, read from flags with environment fallbacks.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", version, about = "HTTP backend for the todo-list app")]
pub struct Config {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, short, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// SQLite database file; created with the schema if missing.
    #[arg(long, env = "DATABASE_PATH", default_value = "./database.db")]
    pub database: PathBuf,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "todo-server",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--database",
            "/tmp/todo.db",
        ])
        .unwrap();
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.database, PathBuf::from("/tmp/todo.db"));
    }

    #[test]
    fn rejects_non_numeric_port() {
        let result = Config::try_parse_from(["todo-server", "--port", "http"]);
        assert!(result.is_err());
    }
}
