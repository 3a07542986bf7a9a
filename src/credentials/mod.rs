//! # credentials: uniform lifecycle for Jenkins credential payloads
//!
//! A [`CredentialsManager`] is a folder-scoped facade applying the same
//! create/read/update/delete semantics across every credential payload type:
//! the domain defaults to the global store, secrets are write-only, and reads
//! never surface secret material.
//!
//! The manager carries the folder it targets as a settable field and is not
//! reentrant-safe; construct one per operation with
//! [`CredentialsManager::scoped`] rather than sharing an instance.

pub mod payloads;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::contract::{is_not_found, JenkinsClient};
use crate::document::normalize_declaration;
use crate::error::Error;
use crate::paths::format_folder_name;
use crate::resources::folder_exists;

/// The sentinel domain addressing the global credential store.
pub const DEFAULT_DOMAIN: &str = "_";

/// Credential visibility towards Jenkins agents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    #[default]
    #[serde(rename = "GLOBAL")]
    Global,
    #[serde(rename = "SYSTEM")]
    System,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => f.write_str("GLOBAL"),
            Scope::System => f.write_str("SYSTEM"),
        }
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Error> {
        match value {
            "GLOBAL" => Ok(Scope::Global),
            "SYSTEM" => Ok(Scope::System),
            other => Err(Error::validation(
                "scope",
                format!("{other:?} is not supported, supported scopes are: SYSTEM, GLOBAL"),
            )),
        }
    }
}

/// One member of the closed set of credential payload types. Every payload
/// shares the (id, scope, description) header and serializes to the XML
/// document its Jenkins plugin expects.
pub trait CredentialPayload: Serialize + DeserializeOwned + Send + Sync {
    /// Human label used in logs and error context.
    const KIND: &'static str;

    /// The credential ID within its domain (the declared resource name).
    fn id(&self) -> &str;

    /// Blanks out every write-only field. Called after each remote read: the
    /// remote returns masked garbage for secret fields, so they must never
    /// reach the caller.
    fn clear_secrets(&mut self);
}

/// Folder-scoped credential store facade over the remote collaborator.
pub struct CredentialsManager<'a, C: ?Sized> {
    client: &'a C,
    /// Segment-encoded folder (`parent/job/child`) the next operation
    /// targets. Set immediately before each operation.
    pub folder: String,
}

impl<'a, C: JenkinsClient + ?Sized> CredentialsManager<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            folder: String::new(),
        }
    }

    /// A manager bound to the given folder path (accepts raw or
    /// already-encoded paths).
    pub fn scoped(client: &'a C, folder: &str) -> Self {
        Self {
            client,
            folder: format_folder_name(folder),
        }
    }

    fn domain<'d>(&self, domain: &'d str) -> &'d str {
        if domain.is_empty() {
            DEFAULT_DOMAIN
        } else {
            domain
        }
    }

    /// Stores a new credential. Fails if the target folder does not exist:
    /// the remote would otherwise accept the write and leave the credential
    /// orphaned in a nonexistent namespace.
    pub async fn add<P: CredentialPayload>(&self, domain: &str, cred: &P) -> Result<(), Error> {
        folder_exists(self.client, &self.folder).await?;

        let domain = self.domain(domain);
        let xml = quick_xml::se::to_string(cred).map_err(Error::xml)?;
        debug!(folder = %self.folder, domain, id = cred.id(), "adding credentials");
        self.client
            .create_credential(&self.folder, domain, &xml)
            .await
            .map_err(Error::remote(format!(
                "could not create {} {:?}",
                P::KIND,
                cred.id()
            )))?;
        Ok(())
    }

    /// Refreshes `cred` from the remote store. Only non-secret fields are
    /// populated; absence surfaces as [`Error::NotFound`].
    pub async fn get_single<P: CredentialPayload>(
        &self,
        domain: &str,
        name: &str,
        cred: &mut P,
    ) -> Result<(), Error> {
        let domain = self.domain(domain);
        let xml = self
            .client
            .get_credential(&self.folder, domain, name)
            .await
            .map_err(|err| {
                if is_not_found(&err) {
                    Error::NotFound {
                        kind: P::KIND,
                        name: name.to_owned(),
                    }
                } else {
                    Error::Remote {
                        context: format!("could not read {} {:?}", P::KIND, name),
                        source: err,
                    }
                }
            })?;

        let mut parsed: P =
            quick_xml::de::from_str(&normalize_declaration(&xml)).map_err(Error::xml)?;
        parsed.clear_secrets();
        *cred = parsed;
        Ok(())
    }

    /// Writes updated fields for an existing credential. Secret fields are
    /// serialized only when non-empty: an empty secret leaves the remote
    /// value untouched rather than clearing it.
    pub async fn update<P: CredentialPayload>(
        &self,
        domain: &str,
        name: &str,
        cred: &P,
    ) -> Result<(), Error> {
        let domain = self.domain(domain);
        let xml = quick_xml::se::to_string(cred).map_err(Error::xml)?;
        debug!(folder = %self.folder, domain, name, "updating credentials");
        self.client
            .update_credential(&self.folder, domain, name, &xml)
            .await
            .map_err(Error::remote(format!(
                "could not update {} {name:?}",
                P::KIND
            )))?;
        Ok(())
    }

    /// Removes a credential, treating an already-absent target as success.
    pub async fn delete(&self, domain: &str, name: &str) -> Result<(), Error> {
        let domain = self.domain(domain);
        match self
            .client
            .delete_credential(&self.folder, domain, name)
            .await
        {
            Ok(()) => {
                debug!(folder = %self.folder, domain, name, "credentials removed");
                Ok(())
            }
            Err(err) if is_not_found(&err) => {
                debug!(folder = %self.folder, domain, name, "credentials already absent");
                Ok(())
            }
            Err(err) => Err(Error::Remote {
                context: format!("could not delete credentials {name:?}"),
                source: err,
            }),
        }
    }
}
