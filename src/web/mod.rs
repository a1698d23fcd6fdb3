//! Browser host for urlsnake.
//!
//! Serves a one-page client over HTTP and streams every frame to it over a
//! WebSocket. The page writes each frame into its own address bar
//! (`location.hash`) and sends arrow keys and focus changes back.
//!
//! ## Usage
//!
//! Build with web feature:
//! ```sh
//! cargo build --features web
//! ```
//!
//! Run with web server:
//! ```sh
//! ./target/debug/urlsnake --serve        # Default port 3000
//! ./target/debug/urlsnake --serve=8080   # Custom port
//! ```
//!
//! Then open http://localhost:3000 in your browser.

#[cfg(feature = "web")]
mod server;

#[cfg(feature = "web")]
mod sink;

#[cfg(feature = "web")]
pub use server::{parse_client_message, spawn_web_server, WebServer};

#[cfg(feature = "web")]
pub use sink::BroadcastSink;
