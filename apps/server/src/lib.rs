//! # SALMA Server
//!
//! HTTP JSON API for the pharmacy counter.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Server                                        │
//! │                                                                         │
//! │  Pharmacist screen                       Cashier screen                 │
//! │   │ GET  /api/drugs-list                  │ GET /api/cashier/search-bill│
//! │   │ GET  /api/patients-list               │ GET /api/cashier/           │
//! │   │ GET  /api/doctors-list                │       bill-details/{id}     │
//! │   │ POST /api/submit-prescription         │                             │
//! │   ▼                                       ▼                             │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Router  (CorsLayer::permissive, TraceLayer)                     │  │
//! │  │     │                                                             │  │
//! │  │     ▼  State<AppState>                                           │  │
//! │  │  handlers ──► salma_db::Database ──► SQLite                      │  │
//! │  │     │                                                             │  │
//! │  │     └── errors: ApiError (kind → status, {status:"error"})       │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config`] for the environment variables.

pub mod config;
pub mod error;
pub mod routes;

// Re-exports
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, ErrorKind};
pub use routes::build_app;

use salma_db::Database;

/// Shared application state.
///
/// Cloned into every handler; the database handle is a pooled, reference
/// counted handle so cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}
