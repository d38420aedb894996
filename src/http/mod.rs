//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, `q` parameter)
//!     → Site::handle on a blocking thread
//!     → response.rs (page or error → status + HTML)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{PageQuery, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
