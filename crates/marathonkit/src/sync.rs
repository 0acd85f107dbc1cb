//! Reconciliation engine.
//!
//! A run has two strictly sequential phases:
//! 1. Delete - remove every app Marathon runs that no loaded group declares
//! 2. Sync - push every group definition and let Marathon converge each one
//!
//! Requests within a phase go out concurrently and the phase only ends once
//! all of them have completed. The first error fails the run; requests that
//! already went out are not undone.

use crate::error::{Error, Result};
use crate::executor::execute_batch;
use crate::transport::Transport;
use crate::types::{GroupDefinition, Method, SyncOptions, SyncPlan, SyncSummary};
use serde::Deserialize;
use std::collections::BTreeSet;

/// App listing endpoint. Single apps live below it.
pub const APPS_PATH: &str = "/v2/apps";

/// Group upsert endpoint.
pub const GROUPS_PATH: &str = "/v2/groups";

/// Reconciles a set of group definitions against Marathon.
///
/// # Example
///
/// ```no_run
/// use marathonkit::transport::http::HttpTransport;
/// use marathonkit::transport::TransportConfig;
/// use marathonkit::{GroupDefinition, MarathonSync};
///
/// let group = GroupDefinition::from_json(r#"{"id": "web", "apps": [{"id": "nginx"}]}"#)?;
/// let transport = HttpTransport::new("http://localhost:8080", TransportConfig::default());
///
/// let summary = MarathonSync::new(transport, vec![group]).run()?;
/// println!("deleted {}, synced {}", summary.deleted, summary.synced);
/// # Ok::<(), marathonkit::Error>(())
/// ```
pub struct MarathonSync<T> {
    transport: T,
    groups: Vec<GroupDefinition>,
    options: SyncOptions,
}

impl<T: Transport> MarathonSync<T> {
    /// Create an engine for `groups` talking to Marathon through `transport`.
    pub fn new(transport: T, groups: Vec<GroupDefinition>) -> Self {
        Self {
            transport,
            groups,
            options: SyncOptions::default(),
        }
    }

    /// Replace the run options.
    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    /// The transport requests go through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The loaded group definitions.
    pub fn groups(&self) -> &[GroupDefinition] {
        &self.groups
    }

    /// Delete unknown apps, then push every group.
    ///
    /// The sync phase never starts unless the delete phase succeeded.
    pub fn run(&self) -> Result<SyncSummary> {
        let deleted = self.delete_unknown_apps()?;
        let synced = self.sync_apps()?;
        Ok(SyncSummary {
            deleted,
            synced,
            dry_run: self.options.dry_run,
        })
    }

    /// Compare the declared apps with the ones Marathon is running.
    pub fn plan(&self) -> Result<SyncPlan> {
        let known_apps = self.collect_known_apps();
        let present_apps = self.collect_present_apps()?;
        log::info!(
            "Found {} apps in the config, {} apps in Marathon",
            known_apps.len(),
            present_apps.len()
        );
        Ok(SyncPlan::new(known_apps, present_apps))
    }

    /// Fully-qualified IDs of every app declared by the loaded groups.
    pub fn collect_known_apps(&self) -> BTreeSet<String> {
        self.groups.iter().flat_map(GroupDefinition::app_ids).collect()
    }

    /// IDs of every app Marathon currently runs.
    pub fn collect_present_apps(&self) -> Result<BTreeSet<String>> {
        let value = self.transport.request(Method::Get, APPS_PATH, None)?;
        let listing: AppsResponse = serde_json::from_value(value)
            .map_err(|e| Error::unexpected_response(Method::Get, APPS_PATH, e.to_string()))?;
        Ok(listing.apps.into_iter().map(|app| app.id).collect())
    }

    /// Delete every app in Marathon that no loaded group declares.
    ///
    /// Returns the number of apps deleted (or that would be, on a dry run).
    pub fn delete_unknown_apps(&self) -> Result<usize> {
        let plan = self.plan()?;

        if self.options.dry_run {
            for app_id in &plan.unknown_apps {
                log::info!("Would delete {}", app_id);
            }
            return Ok(plan.unknown_apps.len());
        }

        log::info!("Deleting {} unknown apps...", plan.unknown_apps.len());
        execute_batch(&plan.unknown_apps, self.options.jobs, |app_id| {
            self.delete_app(app_id)
        })
    }

    /// Push every loaded group definition to Marathon.
    ///
    /// Returns the number of groups pushed (or that would be, on a dry run).
    pub fn sync_apps(&self) -> Result<usize> {
        if self.options.dry_run {
            for group in &self.groups {
                log::info!("Would sync group {}", group.canonical_id());
            }
            return Ok(self.groups.len());
        }

        log::info!("Syncing {} groups...", self.groups.len());
        execute_batch(&self.groups, self.options.jobs, |group| self.put_group(group))
    }

    fn delete_app(&self, app_id: &str) -> Result<()> {
        let path = format!("{}{}", APPS_PATH, app_id);
        self.transport.request(Method::Delete, &path, None)?;
        log::debug!("Deleted {}", app_id);
        Ok(())
    }

    fn put_group(&self, group: &GroupDefinition) -> Result<()> {
        self.transport
            .request(Method::Put, GROUPS_PATH, Some(group.as_json()))?;
        log::debug!("Synced group {}", group.canonical_id());
        Ok(())
    }
}

// =============================================================================
// Marathon API response types
// =============================================================================

#[derive(Debug, Deserialize)]
struct AppsResponse {
    apps: Vec<AppSummary>,
}

#[derive(Debug, Deserialize)]
struct AppSummary {
    id: String,
}
