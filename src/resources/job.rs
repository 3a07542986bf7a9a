use std::collections::HashMap;

use tracing::debug;

use crate::contract::{is_not_found, JenkinsClient};
use crate::diff::in_sync;
use crate::error::Error;
use crate::paths::{extract_folders, format_folder_id, format_folder_name, parse_canonical_job_id};
use crate::template::{render_template, TemplateContext};

use super::{folder_exists, validate_job_name};

/// Declared attributes for a job resource.
#[derive(Debug, Clone, Default)]
pub struct JobConfig {
    pub name: String,
    /// Parent folder namespace; empty for the global namespace.
    pub folder: String,
    /// The config.xml document, optionally a template over `parameters`.
    pub template: String,
    pub parameters: HashMap<String, String>,
}

/// Job state refreshed from the remote. `id` is the canonical base path
/// reported by the server.
#[derive(Debug, Clone)]
pub struct JobState {
    pub id: String,
    pub name: String,
    pub folder: String,
    pub template: String,
}

fn render_context(config: &JobConfig) -> TemplateContext {
    TemplateContext {
        name: config.name.clone(),
        parameters: config.parameters.clone(),
    }
}

pub async fn create<C: JenkinsClient + ?Sized>(
    client: &C,
    config: &JobConfig,
) -> Result<JobState, Error> {
    validate_job_name(&config.name)?;
    folder_exists(client, &config.folder).await?;

    let xml = render_template(&config.template, &render_context(config))?;
    let parents = extract_folders(&config.folder);
    client
        .create_job_in_folder(&xml, &config.name, &parents)
        .await
        .map_err(Error::remote(format!(
            "could not create job {:?} in {:?}",
            config.name, config.folder
        )))?;
    debug!(name = %config.name, folder = %config.folder, "created job");

    let id = format_folder_name(&format!("{}/{}", config.folder, config.name));
    read(client, &id).await?.ok_or(Error::NotFound {
        kind: "job",
        name: id,
    })
}

pub async fn read<C: JenkinsClient + ?Sized>(
    client: &C,
    id: &str,
) -> Result<Option<JobState>, Error> {
    let (name, parents) = parse_canonical_job_id(id);
    debug!(name = %name, "looking up job");

    let job = match client.get_job(&name, &parents).await {
        Ok(job) => job,
        Err(err) if is_not_found(&err) => return Ok(None),
        Err(err) => {
            return Err(Error::Remote {
                context: format!("could not read job {name:?}"),
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
    debug!(base = %job.base, "job exists");

    Ok(Some(JobState {
        id: job.base,
        name,
        folder: format_folder_id(&parents),
        template: config,
    }))
}

/// Writes the declared configuration, first checking the current remote
/// document through the diff engine so a document that already matches is
/// not rewritten.
pub async fn update<C: JenkinsClient + ?Sized>(
    client: &C,
    id: &str,
    config: &JobConfig,
) -> Result<JobState, Error> {
    let (name, parents) = parse_canonical_job_id(id);

    let job = client
        .get_job(&name, &parents)
        .await
        .map_err(Error::remote(format!("could not find job {name:?}")))?;
    let current = client
        .get_job_config(&job.base)
        .await
        .map_err(Error::remote(format!(
            "could not extract configuration for {:?}",
            job.base
        )))?;

    let ctx = render_context(config);
    if in_sync(&current, &config.template, &ctx)? {
        debug!(name = %name, "remote configuration already matches, skipping update");
    } else {
        let xml = render_template(&config.template, &ctx)?;
        client
            .update_job_config(&job.base, &xml)
            .await
            .map_err(Error::remote(format!(
                "could not update job {name:?} configuration"
            )))?;
        debug!(name = %name, "updated job configuration");
    }

    read(client, id).await?.ok_or(Error::NotFound {
        kind: "job",
        name: id.to_owned(),
    })
}

/// Removes the job, treating an already-absent target as success.
pub async fn delete<C: JenkinsClient + ?Sized>(client: &C, id: &str) -> Result<(), Error> {
    let (name, parents) = parse_canonical_job_id(id);
    debug!(name = %name, "removing job");

    match client.delete_job_in_folder(&name, &parents).await {
        Ok(removed) => {
            debug!(name = %name, removed, "job removed");
            Ok(())
        }
        Err(err) if is_not_found(&err) => {
            debug!(name = %name, "job already absent");
            Ok(())
        }
        Err(err) => Err(Error::Remote {
            context: format!("could not delete job {name:?}"),
            source: err,
        }),
    }
}
