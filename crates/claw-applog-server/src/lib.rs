//! # claw-applog-server
//!
//! HTTP front end for the [`claw_applog`] partitioned log store, built on
//! axum.
//!
//! ## Example
//!
//! ```rust,no_run
//! use claw_applog_server::{LogServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default().with_store_root("/var/lib/applog");
//!     let server = LogServer::new(config);
//!     // server.run().await.unwrap();
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/upload` | POST | Append one record to today's partition |
//! | `/query` | GET | Records of an application filtered by level |
//! | `/health` | GET | Liveness and uptime |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod types;

// Re-export main types
pub use config::ServerConfig;
pub use error::{ApiError, ServerResult};
pub use server::{shutdown_signal, LogServer};
pub use state::AppState;
pub use types::{HealthResponse, QueryParams, QueryResponse, UploadRequest, UploadResponse};
