//! Core types for marathonkit.

use crate::error::{Error, Result};
use crate::normalize::{is_in_group, normalize_app_id, normalize_group_id};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// HTTP methods
// =============================================================================

/// HTTP methods used against the Marathon API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// Read.
    Get,
    /// Create or update.
    Put,
    /// Remove.
    Delete,
}

impl Method {
    /// Uppercase wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Definitions
// =============================================================================

/// An app declared inside a group definition.
///
/// Only the ID matters for reconciliation; the rest of the payload stays in
/// the owning group's JSON and is handed to Marathon untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDefinition {
    /// ID as written in the definition (possibly relative).
    pub id: String,
}

/// A Marathon group definition loaded from a JSON document.
///
/// The exact source text is kept so the document pushed to Marathon is
/// byte-for-byte what was loaded.
#[derive(Debug, Clone)]
pub struct GroupDefinition {
    id: String,
    apps: Vec<AppDefinition>,
    groups: Vec<GroupDefinition>,
    raw: Box<RawValue>,
}

impl GroupDefinition {
    /// Parse a group definition from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: Box<RawValue> = serde_json::from_str(text)?;
        let value: Value = serde_json::from_str(raw.get())?;
        Self::from_parts(raw, &value, None)
    }

    /// Build a group definition from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let raw = serde_json::value::to_raw_value(&value)?;
        Self::from_parts(raw, &value, None)
    }

    fn from_parts(raw: Box<RawValue>, value: &Value, parent: Option<&str>) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            Error::malformed(format!("{} is not a JSON object", describe_group(None, parent)))
        })?;

        let id = string_id(object)
            .ok_or_else(|| {
                Error::malformed(format!(
                    "{} is missing a string \"id\"",
                    describe_group(None, parent)
                ))
            })?
            .to_string();

        let apps = match object.get("apps") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(apps)) => apps
                .iter()
                .enumerate()
                .map(|(index, app)| {
                    app.as_object()
                        .and_then(string_id)
                        .map(|app_id| AppDefinition {
                            id: app_id.to_string(),
                        })
                        .ok_or_else(|| {
                            Error::malformed(format!(
                                "app #{} in {} is missing a string \"id\"",
                                index + 1,
                                describe_group(Some(id.as_str()), parent)
                            ))
                        })
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => {
                return Err(Error::malformed(format!(
                    "\"apps\" in {} is not an array",
                    describe_group(Some(id.as_str()), parent)
                )));
            }
        };

        let groups = match object.get("groups") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(groups)) => {
                let parent_id = qualify_group_id(&id, parent);
                groups
                    .iter()
                    .map(|group| {
                        let raw = serde_json::value::to_raw_value(group)?;
                        Self::from_parts(raw, group, Some(&parent_id))
                    })
                    .collect::<Result<Vec<_>>>()?
            }
            Some(_) => {
                return Err(Error::malformed(format!(
                    "\"groups\" in {} is not an array",
                    describe_group(Some(id.as_str()), parent)
                )));
            }
        };

        Ok(Self {
            id,
            apps,
            groups,
            raw,
        })
    }

    /// ID as written in the definition.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Canonical absolute group ID.
    pub fn canonical_id(&self) -> String {
        normalize_group_id(&self.id)
    }

    /// Apps declared directly in this group.
    pub fn apps(&self) -> &[AppDefinition] {
        &self.apps
    }

    /// Nested group definitions.
    pub fn groups(&self) -> &[GroupDefinition] {
        &self.groups
    }

    /// The definition's JSON text exactly as loaded.
    pub fn as_json(&self) -> &str {
        self.raw.get()
    }

    /// Fully-qualified IDs of every app in this group and its nested groups.
    pub fn app_ids(&self) -> BTreeSet<String> {
        let mut ids = BTreeSet::new();
        self.collect_app_ids(&self.canonical_id(), &mut ids);
        ids
    }

    fn collect_app_ids(&self, group_id: &str, ids: &mut BTreeSet<String>) {
        for app in &self.apps {
            let app_id = normalize_app_id(&app.id, group_id);
            if !is_in_group(&app_id, group_id) {
                log::warn!("App {} is declared in group {} but lives outside it", app_id, group_id);
            }
            ids.insert(app_id);
        }
        for group in &self.groups {
            let nested_id = normalize_app_id(group.id(), group_id);
            group.collect_app_ids(&nested_id, ids);
        }
    }
}

/// Canonical ID of a group, resolved against its parent when nested.
fn qualify_group_id(id: &str, parent: Option<&str>) -> String {
    match parent {
        Some(parent) => normalize_app_id(id, parent),
        None => normalize_group_id(id),
    }
}

fn string_id(object: &Map<String, Value>) -> Option<&str> {
    object.get("id").and_then(Value::as_str)
}

fn describe_group(id: Option<&str>, parent: Option<&str>) -> String {
    match (id, parent) {
        (Some(id), _) => format!("group {:?}", id),
        (None, Some(parent)) => format!("a nested group of {:?}", parent),
        (None, None) => "group".to_string(),
    }
}

// =============================================================================
// Options and results
// =============================================================================

/// Options for a reconciliation run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Maximum number of concurrent requests per phase
    pub jobs: usize,
    /// Compute the plan without deleting or pushing anything
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            jobs: 8,
            dry_run: false,
        }
    }
}

/// What a run will change, computed from the declared and present apps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncPlan {
    /// Apps declared by the loaded groups.
    pub known_apps: BTreeSet<String>,
    /// Apps currently running in Marathon.
    pub present_apps: BTreeSet<String>,
    /// Present apps that no loaded group declares.
    pub unknown_apps: Vec<String>,
}

impl SyncPlan {
    /// Diff the declared apps against the present ones.
    pub fn new(known_apps: BTreeSet<String>, present_apps: BTreeSet<String>) -> Self {
        let unknown_apps = present_apps.difference(&known_apps).cloned().collect();
        Self {
            known_apps,
            present_apps,
            unknown_apps,
        }
    }

    /// Check if any app needs deleting.
    pub fn has_deletions(&self) -> bool {
        !self.unknown_apps.is_empty()
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    /// Apps deleted from Marathon.
    pub deleted: usize,
    /// Group definitions pushed to Marathon.
    pub synced: usize,
    /// Whether this was a dry run (nothing was changed).
    pub dry_run: bool,
}

impl SyncSummary {
    /// Total number of requests that changed Marathon.
    pub fn total_changes(&self) -> usize {
        self.deleted + self.synced
    }
}
