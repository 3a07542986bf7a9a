use tracing::debug;

use crate::contract::{is_not_found, JenkinsClient};
use crate::document::{parse_folder, Folder, FolderProperties, FolderSecurity};
use crate::error::Error;
use crate::paths::{extract_folders, format_folder_id, format_folder_name, parse_canonical_job_id};

use super::{folder_exists, validate_job_name};

/// Declared attributes for a folder resource.
#[derive(Debug, Clone, Default)]
pub struct FolderConfig {
    pub name: String,
    /// Parent folder namespace; empty for the global namespace.
    pub folder: String,
    pub display_name: String,
    pub description: String,
    pub security: Option<FolderSecurity>,
}

/// Folder state refreshed from the remote. `id` is the canonical base path
/// reported by the server.
#[derive(Debug, Clone)]
pub struct FolderState {
    pub id: String,
    pub name: String,
    pub folder: String,
    pub display_name: String,
    pub description: String,
    pub security: Option<FolderSecurity>,
    /// Raw configuration document as served by the remote.
    pub template: String,
}

pub async fn create<C: JenkinsClient + ?Sized>(
    client: &C,
    config: &FolderConfig,
) -> Result<FolderState, Error> {
    validate_job_name(&config.name)?;
    folder_exists(client, &config.folder).await?;

    let document = Folder {
        description: config.description.clone(),
        display_name: config.display_name.clone(),
        properties: FolderProperties {
            security: config.security.clone(),
            other: Vec::new(),
        },
        ..Folder::default()
    };
    let xml = document.render()?;

    let parents = extract_folders(&config.folder);
    client
        .create_job_in_folder(&xml, &config.name, &parents)
        .await
        .map_err(Error::remote(format!(
            "could not create folder {:?} in {:?}",
            config.name, config.folder
        )))?;
    debug!(name = %config.name, folder = %config.folder, "created folder");

    let id = format_folder_name(&format!("{}/{}", config.folder, config.name));
    read(client, &id).await?.ok_or(Error::NotFound {
        kind: "folder",
        name: id,
    })
}

pub async fn read<C: JenkinsClient + ?Sized>(
    client: &C,
    id: &str,
) -> Result<Option<FolderState>, Error> {
    let (name, parents) = parse_canonical_job_id(id);
    debug!(name = %name, "looking up folder");

    let job = match client.get_job(&name, &parents).await {
        Ok(job) => job,
        Err(err) if is_not_found(&err) => return Ok(None),
        Err(err) => {
            return Err(Error::Remote {
                context: format!("could not read folder {name:?}"),
                source: err,
            })
        }
    };

    let config = client
        .get_job_config(&job.base)
        .await
        .map_err(Error::remote(format!(
            "could not extract configuration for {:?}",
            job.base
        )))?;
    let document = parse_folder(&config)?;
    debug!(base = %job.base, "folder exists");

    Ok(Some(FolderState {
        id: job.base,
        name,
        folder: format_folder_id(&parents),
        display_name: document.display_name,
        description: document.description,
        security: document.properties.security,
        template: config,
    }))
}

/// Applies declared fields onto the current remote document, leaving opaque
/// plugin configuration untouched, then writes it back.
pub async fn update<C: JenkinsClient + ?Sized>(
    client: &C,
    id: &str,
    config: &FolderConfig,
) -> Result<FolderState, Error> {
    let (name, parents) = parse_canonical_job_id(id);

    let job = client
        .get_job(&name, &parents)
        .await
        .map_err(Error::remote(format!("could not find folder {name:?}")))?;
    let current = client
        .get_job_config(&job.base)
        .await
        .map_err(Error::remote(format!(
            "could not extract configuration for {:?}",
            job.base
        )))?;

    let mut document = parse_folder(&current)?;
    document.description = config.description.clone();
    document.display_name = config.display_name.clone();
    document.properties.security = config.security.clone();

    let xml = document.render()?;
    client
        .update_job_config(&job.base, &xml)
        .await
        .map_err(Error::remote(format!(
            "could not update folder {name:?} configuration"
        )))?;

    read(client, id).await?.ok_or(Error::NotFound {
        kind: "folder",
        name: id.to_owned(),
    })
}

/// Folders are jobs to Jenkins; deletion is shared with the job reconciler.
pub async fn delete<C: JenkinsClient + ?Sized>(client: &C, id: &str) -> Result<(), Error> {
    super::job::delete(client, id).await
}
