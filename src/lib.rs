//! # Datadog Events
//!
//! A Rust client library for posting events to the
//! [Datadog Events API](https://docs.datadoghq.com/api/latest/events/)
//! **without** DogStatsD.
//!
//! ## Features
//!
//! - Send `error`/`warning`/`info`/`success` events over the HTTP API
//! - Instance-wide defaults (priority, host, tags, prefixes) merged with
//!   per-event options
//! - Event bodies from plain text, captured errors, or JSON objects
//! - Markdown formatting of event bodies
//! - API key and domain resolvable from `DATADOG_API_KEY` / `DATADOG_DOMAIN`
//!
//! ## Example
//!
//! ```rust,no_run
//! use datadog_events::{DatadogEvents, EventOptions, EventsConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DatadogEvents::new(
//!         EventsConfig::new("my-api-key")
//!             .with_host("worker-3")
//!             .with_tag("service:billing"),
//!     )?;
//!
//!     client
//!         .info(
//!             "Nightly import finished",
//!             "All 12 partitions imported",
//!             EventOptions::new().with_tag("job:import"),
//!         )
//!         .await?;
//!
//!     // Non-text bodies are rendered into a fenced block
//!     let err = std::io::Error::other("disk full");
//!     client
//!         .error(
//!             "Nightly import failed",
//!             datadog_events::EventBody::from_error(&err),
//!             EventOptions::new(),
//!         )
//!         .await?;
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod errors;
mod types;

pub use client::DatadogEvents;
pub use config::{EventsConfig, API_KEY_ENV, DOMAIN_ENV};
pub use errors::{DatadogEventsError, Result};
pub use types::{AlertType, EventBody, EventOptions, EventPayload, Priority};
