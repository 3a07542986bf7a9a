use tracing::debug;

use crate::contract::{is_not_found, JenkinsClient};
use crate::error::Error;
use crate::paths::parse_canonical_job_id;

/// Declared attributes for a list view.
#[derive(Debug, Clone, Default)]
pub struct ViewConfig {
    pub name: String,
    /// Jobs assigned to the view at creation.
    pub assigned_projects: Vec<String>,
}

/// View state refreshed from the remote.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub id: String,
    pub name: String,
    pub url: String,
    pub description: String,
}

pub async fn create<C: JenkinsClient + ?Sized>(
    client: &C,
    config: &ViewConfig,
) -> Result<ViewState, Error> {
    let view = client
        .create_view(&config.name)
        .await
        .map_err(Error::remote(format!(
            "could not create view {:?}",
            config.name
        )))?;

    for project in &config.assigned_projects {
        client
            .add_job_to_view(&view.name, project)
            .await
            .map_err(Error::remote(format!(
                "could not assign job {project:?} to view {:?}",
                view.name
            )))?;
    }
    debug!(name = %view.name, projects = config.assigned_projects.len(), "created view");

    read(client, &view.name).await?.ok_or(Error::NotFound {
        kind: "view",
        name: config.name.clone(),
    })
}

pub async fn read<C: JenkinsClient + ?Sized>(
    client: &C,
    id: &str,
) -> Result<Option<ViewState>, Error> {
    let (name, _) = parse_canonical_job_id(id);
    debug!(name = %name, "looking up view");

    match client.get_view(&name).await {
        Ok(view) => Ok(Some(ViewState {
            id: view.name.clone(),
            name: view.name,
            url: view.url,
            description: view.description,
        })),
        Err(err) if is_not_found(&err) => Ok(None),
        Err(err) => Err(Error::Remote {
            context: format!("could not read view {name:?}"),
            source: err,
        }),
    }
}

/// The remote client offers no view update call; declared changes require
/// replacing the view. This refreshes state and nothing else.
pub async fn update<C: JenkinsClient + ?Sized>(
    client: &C,
    id: &str,
    _config: &ViewConfig,
) -> Result<Option<ViewState>, Error> {
    read(client, id).await
}

/// Removes the view, treating an already-absent target as success.
pub async fn delete<C: JenkinsClient + ?Sized>(client: &C, id: &str) -> Result<(), Error> {
    let (name, _) = parse_canonical_job_id(id);
    debug!(name = %name, "removing view");

    match client.delete_view(&name).await {
        Ok(()) => Ok(()),
        Err(err) if is_not_found(&err) => {
            debug!(name = %name, "view already absent");
            Ok(())
        }
        Err(err) => Err(Error::Remote {
            context: format!("could not delete view {name:?}"),
            source: err,
        }),
    }
}
