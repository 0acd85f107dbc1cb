//! Identifier normalization.
//!
//! Group and app IDs in definition files can be written loosely: with or
//! without a leading `/`, with a trailing `/`, and relative to the group they
//! are declared in. Marathon always reports fully-qualified absolute paths, so
//! every ID is converted to that form before two sets of apps are compared.

/// Normalize a group ID to its canonical absolute form.
///
/// Adds a leading `/` and strips trailing ones. The empty string is the root
/// group `/`.
///
/// ```
/// use marathonkit::normalize::normalize_group_id;
///
/// assert_eq!(normalize_group_id("test/abc/"), "/test/abc");
/// assert_eq!(normalize_group_id(""), "/");
/// ```
pub fn normalize_group_id(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Normalize an app ID declared inside a group to its fully-qualified form.
///
/// `group_id` must already be canonical (see [`normalize_group_id`]).
/// Trailing `/`s are stripped. Absolute IDs are kept as they are, relative IDs
/// are resolved against the group.
///
/// ```
/// use marathonkit::normalize::normalize_app_id;
///
/// assert_eq!(normalize_app_id("app", "/test/abc"), "/test/abc/app");
/// assert_eq!(normalize_app_id("app", "/"), "/app");
/// assert_eq!(normalize_app_id("/test/abc/app", "/test/abc"), "/test/abc/app");
/// ```
pub fn normalize_app_id(raw: &str, group_id: &str) -> String {
    let app_id = raw.trim_end_matches('/');

    if app_id.is_empty() {
        group_id.to_string()
    } else if is_absolute(app_id) {
        app_id.to_string()
    } else if group_id == "/" {
        format!("/{app_id}")
    } else {
        format!("{group_id}/{app_id}")
    }
}

/// Whether `id` is rooted at `/`.
fn is_absolute(id: &str) -> bool {
    id.starts_with('/')
}

/// Check whether `app_id` lives inside `group_id`, comparing whole path
/// segments.
pub fn is_in_group(app_id: &str, group_id: &str) -> bool {
    if group_id == "/" {
        return app_id.starts_with('/');
    }
    app_id
        .strip_prefix(group_id)
        .is_some_and(|rest| rest.starts_with('/'))
}
