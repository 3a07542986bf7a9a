//! Generic reconciler shared by every credential payload type. The payload
//! carries the type-specific fields; folder scoping, domain defaulting and
//! the write-only secret contract are uniform through
//! [`CredentialsManager`].

use tracing::debug;

use crate::contract::JenkinsClient;
use crate::credentials::{CredentialPayload, CredentialsManager};
use crate::error::Error;
use crate::paths::credential_id;

/// Stores a new credential and returns its externally visible ID
/// (`folder/name`).
pub async fn create<C, P>(client: &C, folder: &str, domain: &str, cred: &P) -> Result<String, Error>
where
    C: JenkinsClient + ?Sized,
    P: CredentialPayload,
{
    let manager = CredentialsManager::scoped(client, folder);
    manager.add(domain, cred).await?;
    debug!(id = cred.id(), folder, "created credentials");
    Ok(credential_id(folder, cred.id()))
}

/// Fetches the credential named `name`, or `None` when it no longer exists.
/// Secret fields in the returned payload are always blank.
pub async fn read<C, P>(
    client: &C,
    folder: &str,
    domain: &str,
    name: &str,
) -> Result<Option<P>, Error>
where
    C: JenkinsClient + ?Sized,
    P: CredentialPayload + Default,
{
    let manager = CredentialsManager::scoped(client, folder);
    let mut cred = P::default();
    match manager.get_single(domain, name, &mut cred).await {
        Ok(()) => Ok(Some(cred)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Writes updated fields; empty secret fields leave the remote values
/// untouched.
pub async fn update<C, P>(
    client: &C,
    folder: &str,
    domain: &str,
    name: &str,
    cred: &P,
) -> Result<(), Error>
where
    C: JenkinsClient + ?Sized,
    P: CredentialPayload,
{
    let manager = CredentialsManager::scoped(client, folder);
    manager.update(domain, name, cred).await
}

/// Removes the credential, treating an already-absent target as success.
pub async fn delete<C>(client: &C, folder: &str, domain: &str, name: &str) -> Result<(), Error>
where
    C: JenkinsClient + ?Sized,
{
    let manager = CredentialsManager::scoped(client, folder);
    manager.delete(domain, name).await
}

/// Parses an import identifier of the form `[<folder>/]<domain>/<name>` into
/// its (folder, domain, name) parts.
pub fn parse_import_id(id: &str) -> Result<(String, String, String), Error> {
    let split: Vec<&str> = id.split('/').collect();
    if split.len() < 2 {
        return Err(Error::validation(
            "id",
            format!(
                "import identifiers must take the form \"[<folder>/]<domain>/<name>\", got {id:?}"
            ),
        ));
    }

    let name = split[split.len() - 1].to_owned();
    let domain = split[split.len() - 2].to_owned();
    let folder = split[..split.len() - 2]
        .join("/")
        .trim_matches('/')
        .to_owned();
    Ok((folder, domain, name))
}
