//! Region and credential resolution for the S3 client

use crate::errors::{Result, S3Error};

pub const DEFAULT_REGION: &str = "us-east-1";

/// Environment variable holding the access key id
pub const ACCESS_KEY_ENV: &str = "s3_public_key";
/// Environment variable holding the secret access key
pub const SECRET_KEY_ENV: &str = "s3_private_key";

/// Static access key pair
#[derive(Clone, PartialEq, Eq)]
pub struct S3Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for S3Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Credentials")
            .field("access_key_id", &mask_key(&self.access_key_id))
            .field("secret_access_key", &"****")
            .finish()
    }
}

/// Everything needed to build a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Settings {
    pub region: String,
    /// `None` falls back to the SDK default provider chain
    pub credentials: Option<S3Credentials>,
    pub endpoint_url: Option<String>,
}

impl Default for S3Settings {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            credentials: None,
            endpoint_url: None,
        }
    }
}

impl S3Settings {
    /// Build settings, filling missing credentials from the process environment
    ///
    /// # Errors
    /// Returns an error if only one half of the key pair can be resolved.
    pub fn from_env(
        region: Option<&str>,
        access_key_id: Option<&str>,
        secret_access_key: Option<&str>,
    ) -> Result<Self> {
        Self::resolve(region, access_key_id, secret_access_key, |name| {
            std::env::var(name).ok()
        })
    }

    /// Same as [`S3Settings::from_env`] with an injectable environment lookup
    ///
    /// # Errors
    /// Returns an error if only one half of the key pair can be resolved.
    pub fn resolve<F>(
        region: Option<&str>,
        access_key_id: Option<&str>,
        secret_access_key: Option<&str>,
        env_lookup: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let region = match region {
            Some(r) if !r.trim().is_empty() => r.trim().to_string(),
            _ => DEFAULT_REGION.to_string(),
        };
        let credentials = resolve_credentials(access_key_id, secret_access_key, env_lookup)?;
        Ok(Self {
            region,
            credentials,
            endpoint_url: None,
        })
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint_url: Option<String>) -> Self {
        self.endpoint_url = endpoint_url.filter(|e| !e.trim().is_empty());
        self
    }
}

/// Resolve each half of the key pair: explicit value first, then the environment.
///
/// # Errors
/// Returns `IncompleteCredentials` when exactly one half resolves.
pub fn resolve_credentials<F>(
    access_key_id: Option<&str>,
    secret_access_key: Option<&str>,
    env_lookup: F,
) -> Result<Option<S3Credentials>>
where
    F: Fn(&str) -> Option<String>,
{
    let pick = |explicit: Option<&str>, env_name: &str| -> Option<String> {
        explicit
            .map(str::to_string)
            .filter(|v| !v.is_empty())
            .or_else(|| env_lookup(env_name).filter(|v| !v.is_empty()))
    };

    match (
        pick(access_key_id, ACCESS_KEY_ENV),
        pick(secret_access_key, SECRET_KEY_ENV),
    ) {
        (Some(access_key_id), Some(secret_access_key)) => Ok(Some(S3Credentials {
            access_key_id,
            secret_access_key,
        })),
        (None, None) => Ok(None),
        (None, Some(_)) => Err(S3Error::IncompleteCredentials("access key id")),
        (Some(_), None) => Err(S3Error::IncompleteCredentials("secret access key")),
    }
}

/// Show only the first four characters of a key
#[must_use]
pub fn mask_key(key: &str) -> String {
    let shown: String = key.chars().take(4).collect();
    format!("{shown}****")
}
