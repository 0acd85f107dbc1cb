use anyhow::{Context, Result};
use marathonkit::GroupDefinition;
use std::fs;
use std::path::{Path, PathBuf};

/// Load every group definition listed in the config file at `config_path`
pub fn load_config_groups(config_path: &Path) -> Result<Vec<GroupDefinition>> {
    read_config(config_path)?
        .iter()
        .map(|group_path| read_group(group_path))
        .collect()
}

/// Read the list of group definition paths, one per line
///
/// Surrounding whitespace is trimmed and blank lines are skipped.
pub fn read_config(config_path: &Path) -> Result<Vec<PathBuf>> {
    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Could not read {}", config_path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}

/// Read a single group definition JSON file
pub fn read_group(group_path: &Path) -> Result<GroupDefinition> {
    let content = fs::read_to_string(group_path)
        .with_context(|| format!("Could not read {}", group_path.display()))?;
    GroupDefinition::from_json(&content)
        .with_context(|| format!("Invalid group definition in {}", group_path.display()))
}
