//! Resource reconcilers: create/read/update/delete for each Jenkins object
//! kind, composed from the path codec, the document model, the diff engine
//! and the credential lifecycle manager against the remote collaborator.
//!
//! Read operations translate a remote not-found signal into `Ok(None)` so the
//! caller can drop the resource from declared state; every mutation failure
//! is surfaced immediately with operation context.

pub mod credential;
pub mod folder;
pub mod job;
pub mod view;

use crate::contract::JenkinsClient;
use crate::error::Error;
use crate::paths::{extract_folders, parse_canonical_job_id};

/// Validates that the given folder namespace exists before a write targets
/// it. The empty path is the global namespace and always present.
pub async fn folder_exists<C: JenkinsClient + ?Sized>(client: &C, name: &str) -> Result<(), Error> {
    let folders = extract_folders(name);
    if folders.is_empty() {
        return Ok(());
    }

    let (folder_name, parents) = parse_canonical_job_id(name);
    client
        .get_folder(&folder_name, &parents)
        .await
        .map_err(|err| Error::Validation {
            field: "folder",
            reason: format!("could not find folder {name:?}: {err}"),
        })?;
    Ok(())
}

/// Rejects names that embed path segments; nesting is declared through the
/// folder attribute instead.
pub fn validate_job_name(name: &str) -> Result<(), Error> {
    if name.contains('/') {
        return Err(Error::validation(
            "name",
            "name includes path characters; use the folder attribute to place the resource in a subfolder",
        ));
    }
    Ok(())
}
