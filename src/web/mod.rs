//! Optional websocket session bridge.
//!
//! Serves the board to browsers. Every connection gets its own
//! independent game session, rendered through the same draw code as
//! the local terminal; no state is shared between sessions.
//!
//! Build with the feature enabled:
//! ```sh
//! cargo build --features web
//! ```
//!
//! Then run with the server:
//! ```sh
//! goban --serve        # Default port 8080
//! goban --serve=3000   # Custom port
//! ```
//!
//! and open http://localhost:8080 in a browser.

#[cfg(feature = "web")]
mod backend;

#[cfg(feature = "web")]
mod server;

#[cfg(feature = "web")]
pub use server::serve;
