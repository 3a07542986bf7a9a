//! Canonical path codec for the Jenkins job namespace.
//!
//! Jenkins addresses nested folders two incompatible ways: as a single
//! `/job/`-interleaved string for configuration endpoints, and as discrete
//! folder segments for folder-aware object lookups. Every conversion between
//! the two lives here so the reconcilers never re-derive the encoding.

/// Formats a folder path the way Jenkins expects, with `name/job/name`
/// separators. Separators are deduplicated, so it is safe to pass an
/// already-formatted path back into this function.
pub fn format_folder_name(name: &str) -> String {
    name.split('/')
        .filter(|segment| !segment.is_empty() && *segment != "job")
        .collect::<Vec<_>>()
        .join("/job/")
}

/// Formats a folder chain the way Jenkins expects for the `folder` property,
/// with `/job/name/job/name` separators. An empty chain yields an empty
/// string (the global namespace).
pub fn format_folder_id(folders: &[String]) -> String {
    if folders.is_empty() {
        return String::new();
    }
    format!("/job/{}", format_folder_name(&folders.join("/")))
}

/// Strips the `/job/` separators from a folder path and returns the bare
/// segments, for client calls that take folders as discrete parameters.
pub fn extract_folders(folder: &str) -> Vec<String> {
    folder
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != "job")
        .map(str::to_owned)
        .collect()
}

/// Splits a canonical Jenkins ID into the base name of the object and the
/// folder segments leading up to it. An input with no remaining segments
/// yields an empty name and an empty chain.
pub fn parse_canonical_job_id(id: &str) -> (String, Vec<String>) {
    let mut folders = extract_folders(id);
    match folders.pop() {
        Some(name) => (name, folders),
        None => (String::new(), Vec::new()),
    }
}

/// Credentials live in a domain+folder namespace rather than the job
/// hierarchy, so their external ID is a plain `folder/name` join.
pub fn credential_id(folder: &str, name: &str) -> String {
    format!("{folder}/{name}")
}
