//! Configuration file shape.

use serde::Deserialize;

/// Top-level configuration. Every key is required.
///
/// ```toml
/// env = "dev"
/// storage_path = "storage/students.db"
///
/// [http_server]
/// address = "127.0.0.1:8082"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub env: String,
    pub storage_path: String,
    pub http_server: HttpServer,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct HttpServer {
    pub address: String,
}
