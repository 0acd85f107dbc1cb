//! # marathonkit
//!
//! Reconcile declared Marathon group definitions against a live Marathon.
//!
//! A run makes Marathon match a set of group definition documents:
//! - Apps Marathon runs that no loaded group declares are deleted
//! - Every group definition is then pushed, and Marathon converges each group
//!
//! ## Example
//!
//! ```no_run
//! use marathonkit::transport::http::HttpTransport;
//! use marathonkit::transport::TransportConfig;
//! use marathonkit::{GroupDefinition, MarathonSync, SyncOptions};
//!
//! let groups = vec![
//!     GroupDefinition::from_json(r#"{"id": "web", "apps": [{"id": "nginx"}]}"#)?,
//!     GroupDefinition::from_json(r#"{"id": "/jobs/", "apps": [{"id": "cron/"}]}"#)?,
//! ];
//!
//! let transport = HttpTransport::new("http://localhost:8080", TransportConfig::default());
//! let engine = MarathonSync::new(transport, groups).with_options(SyncOptions::default());
//!
//! // Inspect what would change
//! let plan = engine.plan()?;
//! for app in &plan.unknown_apps {
//!     println!("would delete {app}");
//! }
//!
//! // Delete unknown apps, then push every group
//! let summary = engine.run()?;
//! println!("deleted {}, synced {}", summary.deleted, summary.synced);
//! # Ok::<(), marathonkit::Error>(())
//! ```
//!
//! ## Identifiers
//!
//! Comparisons always use Marathon's canonical absolute form. See
//! [`normalize`] for the rules:
//!
//! ```
//! use marathonkit::normalize::{normalize_app_id, normalize_group_id};
//!
//! let group = normalize_group_id("test/abc/");
//! assert_eq!(group, "/test/abc");
//! assert_eq!(normalize_app_id("app/", &group), "/test/abc/app");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod executor;
pub mod normalize;
pub mod sync;
pub mod transport;
pub mod types;

pub use error::{Error, ErrorCategory, Result};
pub use sync::MarathonSync;
pub use transport::{Transport, TransportConfig};
pub use types::{
    AppDefinition, GroupDefinition, Method, SyncOptions, SyncPlan, SyncSummary,
};
