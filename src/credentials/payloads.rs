//! The closed set of credential payload types and their Jenkins XML shapes.
//!
//! Each struct serializes to the document the corresponding Jenkins plugin
//! expects, with the plugin's fully-qualified class as the root element.
//! Write-only fields carry `skip_serializing_if` so an empty value is omitted
//! from the outgoing document and the remote secret stays untouched.

use serde::{Deserialize, Serialize};

use super::{CredentialPayload, Scope};

/// Private key source class for directly-entered SSH keys.
pub const KEY_SOURCE_DIRECT_ENTRY: &str =
    "com.cloudbees.jenkins.plugins.sshcredentials.impl.BasicSSHUserPrivateKey$DirectEntryPrivateKeySource";

/// Username/password credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    rename = "com.cloudbees.plugins.credentials.impl.UsernamePasswordCredentialsImpl",
    rename_all = "camelCase"
)]
pub struct UsernameCredentials {
    pub id: String,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

impl CredentialPayload for UsernameCredentials {
    const KIND: &'static str = "username credentials";

    fn id(&self) -> &str {
        &self.id
    }

    fn clear_secrets(&mut self) {
        self.password.clear();
    }
}

/// SSH private key credentials with a directly-entered key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    rename = "com.cloudbees.jenkins.plugins.sshcredentials.impl.BasicSSHUserPrivateKey",
    rename_all = "camelCase"
)]
pub struct SshCredentials {
    pub id: String,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub passphrase: String,
    #[serde(default)]
    pub private_key_source: PrivateKeySource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateKeySource {
    #[serde(rename = "@class")]
    pub class: String,
    #[serde(rename = "privateKey", default)]
    pub private_key: String,
}

impl Default for PrivateKeySource {
    fn default() -> Self {
        Self {
            class: KEY_SOURCE_DIRECT_ENTRY.to_owned(),
            private_key: String::new(),
        }
    }
}

impl CredentialPayload for SshCredentials {
    const KIND: &'static str = "SSH credentials";

    fn id(&self) -> &str {
        &self.id
    }

    fn clear_secrets(&mut self) {
        self.passphrase.clear();
        self.private_key_source.private_key.clear();
    }
}

/// A single secret string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    rename = "org.jenkinsci.plugins.plaincredentials.impl.StringCredentialsImpl",
    rename_all = "camelCase"
)]
pub struct SecretTextCredentials {
    pub id: String,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secret: String,
}

impl CredentialPayload for SecretTextCredentials {
    const KIND: &'static str = "secret text credentials";

    fn id(&self) -> &str {
        &self.id
    }

    fn clear_secrets(&mut self) {
        self.secret.clear();
    }
}

/// A secret file, content base64-encoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    rename = "org.jenkinsci.plugins.plaincredentials.impl.FileCredentialsImpl",
    rename_all = "camelCase"
)]
pub struct SecretFileCredentials {
    pub id: String,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secret_bytes: String,
}

impl CredentialPayload for SecretFileCredentials {
    const KIND: &'static str = "secret file credentials";

    fn id(&self) -> &str {
        &self.id
    }

    fn clear_secrets(&mut self) {
        self.secret_bytes.clear();
    }
}

/// AWS access key credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    rename = "com.cloudbees.jenkins.plugins.awscredentials.AWSCredentialsImpl",
    rename_all = "camelCase"
)]
pub struct AwsCredentials {
    pub id: String,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub access_key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secret_key: String,
    #[serde(default)]
    pub iam_role_arn: String,
    #[serde(default)]
    pub iam_mfa_serial_number: String,
}

impl CredentialPayload for AwsCredentials {
    const KIND: &'static str = "AWS credentials";

    fn id(&self) -> &str {
        &self.id
    }

    fn clear_secrets(&mut self) {
        self.secret_key.clear();
    }
}

/// Vault AppRole credentials (role id plus write-only secret id).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    rename = "com.datapipe.jenkins.vault.credentials.VaultAppRoleCredential",
    rename_all = "camelCase"
)]
pub struct VaultAppRoleCredentials {
    pub id: String,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub role_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secret_id: String,
}

impl CredentialPayload for VaultAppRoleCredentials {
    const KIND: &'static str = "Vault AppRole credentials";

    fn id(&self) -> &str {
        &self.id
    }

    fn clear_secrets(&mut self) {
        self.secret_id.clear();
    }
}

/// Azure service principal credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename = "com.microsoft.azure.util.AzureCredentials", rename_all = "camelCase")]
pub struct AzureServicePrincipalCredentials {
    pub id: String,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub data: AzureServicePrincipalData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureServicePrincipalData {
    #[serde(default)]
    pub subscription_id: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_secret: String,
    #[serde(default)]
    pub certificate_id: String,
    #[serde(default)]
    pub tenant: String,
    #[serde(default)]
    pub azure_environment_name: String,
    #[serde(rename = "serviceManagementURL", default)]
    pub service_management_url: String,
    #[serde(default)]
    pub authentication_endpoint: String,
    #[serde(default)]
    pub resource_manager_endpoint: String,
    #[serde(default)]
    pub graph_endpoint: String,
}

impl CredentialPayload for AzureServicePrincipalCredentials {
    const KIND: &'static str = "Azure service principal credentials";

    fn id(&self) -> &str {
        &self.id
    }

    fn clear_secrets(&mut self) {
        self.data.client_secret.clear();
    }
}
