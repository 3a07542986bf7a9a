//! # contract: the remote Jenkins collaborator interface
//!
//! This module defines the single trait ([`JenkinsClient`]) through which the
//! reconcilers talk to a live Jenkins server, plus the data types crossing
//! that boundary.
//!
//! ## Interface & Extensibility
//! - Implement [`JenkinsClient`] over your HTTP transport of choice; the core
//!   never issues requests itself and never retries a failed call.
//! - All methods are async, returning results and using boxed error types.
//! - Meant for both production code and robust mocking in tests.
//!
//! ## Not-found signaling
//! Absence is reported through the error text: job, folder and view lookups
//! return errors prefixed with the HTTP status (`"404 ..."`), while the
//! credential endpoints return errors carrying a trailing `404`. The
//! [`is_not_found`] predicate unifies both formats at this boundary so no
//! caller string-matches on its own.
//!
//! ## Mocking & Testing
//! The trait is annotated for `mockall` so consumers can generate
//! deterministic mocks for unit/integration tests.

use async_trait::async_trait;
use mockall::automock;

/// Errors surfaced by the remote collaborator. Implementors convert all
/// meaningful upstream failures into a boxed error whose text carries the
/// HTTP status where one applies.
pub type ClientError = Box<dyn std::error::Error + Send + Sync>;

/// A job or folder as addressed by the remote system after creation.
#[derive(Debug, Clone)]
pub struct JobRef {
    /// The canonical base path (e.g. `/job/parent/job/child`). Authoritative:
    /// the server may normalize names, so this value is the resource identity
    /// after creation, never a locally computed one.
    pub base: String,
}

/// A view as addressed by the remote system.
#[derive(Debug, Clone)]
pub struct ViewRef {
    pub name: String,
    pub url: String,
    pub description: String,
}

/// Returns true when a collaborator error signals an absent object,
/// accepting both the prefix form (job lookups) and the suffix form
/// (credential endpoints).
pub fn is_not_found(err: &ClientError) -> bool {
    let text = err.to_string();
    text.starts_with("404") || text.trim_end().ends_with("404")
}

/// Remote operations the reconcilers depend on. Folder-aware calls take the
/// parent folders as discrete segments (see [`crate::paths::extract_folders`]);
/// credential calls take the segment-encoded folder path instead, since
/// credentials live in a different remote namespace.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait JenkinsClient: Send + Sync {
    /// Folder-aware job lookup.
    async fn get_job(&self, name: &str, parents: &[String]) -> Result<JobRef, ClientError>;

    /// Creates a job (or folder, which Jenkins models as a job) from its
    /// configuration document.
    async fn create_job_in_folder(
        &self,
        config_xml: &str,
        name: &str,
        parents: &[String],
    ) -> Result<JobRef, ClientError>;

    async fn delete_job_in_folder(&self, name: &str, parents: &[String])
        -> Result<bool, ClientError>;

    /// Used purely for existence validation of parent folders.
    async fn get_folder(&self, name: &str, parents: &[String]) -> Result<JobRef, ClientError>;

    /// Fetches the raw configuration document for a canonical base path.
    async fn get_job_config(&self, base: &str) -> Result<String, ClientError>;

    async fn update_job_config(&self, base: &str, config_xml: &str) -> Result<(), ClientError>;

    async fn create_view(&self, name: &str) -> Result<ViewRef, ClientError>;

    async fn get_view(&self, name: &str) -> Result<ViewRef, ClientError>;

    async fn add_job_to_view(&self, view: &str, job: &str) -> Result<bool, ClientError>;

    async fn delete_view(&self, name: &str) -> Result<(), ClientError>;

    async fn create_credential(
        &self,
        folder: &str,
        domain: &str,
        config_xml: &str,
    ) -> Result<(), ClientError>;

    async fn get_credential(
        &self,
        folder: &str,
        domain: &str,
        name: &str,
    ) -> Result<String, ClientError>;

    async fn update_credential(
        &self,
        folder: &str,
        domain: &str,
        name: &str,
        config_xml: &str,
    ) -> Result<(), ClientError>;

    async fn delete_credential(
        &self,
        folder: &str,
        domain: &str,
        name: &str,
    ) -> Result<(), ClientError>;
}
