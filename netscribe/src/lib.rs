//! # Netscribe
//!
//! Async SSH scraper for Cisco device diagnostics with CSV reporting.
//!
//! Netscribe opens an interactive terminal session on a Cisco device
//! (IOS, IOS-XE, NX-OS, ASA), scrapes `show` command output, parses
//! the semi-structured text into tabular records and writes CSV
//! reports: CDP neighbors, MAC and ARP tables, interface statistics,
//! switchport-to-host mapping, next-hop summaries, VLAN usage and raw
//! device documentation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use netscribe::{Session, SessionBuilder, Settings, report};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), netscribe::Error> {
//!     let settings = Settings::default();
//!
//!     let mut session = SessionBuilder::new("10.0.0.1")
//!         .username("admin")
//!         .password("secret")
//!         .connect()
//!         .await?;
//!
//!     let path = report::cdp::run(&mut session, &settings).await?;
//!     println!("wrote {}", path.display());
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod error;
pub mod output;
pub mod parse;
pub mod platform;
pub mod report;
pub mod session;
pub mod settings;
pub mod transport;

// Re-export main types for convenience
pub use error::Error;
pub use platform::{NetworkOs, PlatformDefinition, PlatformRegistry};
pub use session::{DeviceSession, Response, Session, SessionBuilder};
pub use settings::Settings;
pub use transport::{AuthMethod, HostKeyVerification, SshConfig};
