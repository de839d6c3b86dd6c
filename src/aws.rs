//! One-call helpers for scripts that don't want to manage a client
//!
//! Each helper builds a fresh client. `region` defaults to `us-east-1` and any
//! credential left as `None` is read from the `s3_public_key` /
//! `s3_private_key` environment variables.

use crate::config::S3Settings;
use crate::errors::Result;
use crate::s3::S3StorageClient;

pub use crate::config::DEFAULT_REGION;

/// Create an S3 client for the given region and credentials
///
/// # Errors
/// Returns an error if only one half of the key pair resolves or the client
/// cannot be built.
pub fn get_s3_client(
    region: Option<&str>,
    access_key_id: Option<&str>,
    secret_access_key: Option<&str>,
) -> Result<S3StorageClient> {
    let settings = S3Settings::from_env(region, access_key_id, secret_access_key)?;
    S3StorageClient::new(settings, 0)
}

/// Names of every bucket the credentials can see
///
/// # Errors
/// Returns the client construction error or the SDK error unchanged.
pub fn get_s3_buckets(
    region: Option<&str>,
    access_key_id: Option<&str>,
    secret_access_key: Option<&str>,
) -> Result<Vec<String>> {
    get_s3_client(region, access_key_id, secret_access_key)?.list_buckets()
}

/// Every object key in `bucket`
///
/// # Errors
/// Returns the client construction error or the SDK error unchanged.
pub fn get_s3_bucket_files(
    bucket: &str,
    region: Option<&str>,
    access_key_id: Option<&str>,
    secret_access_key: Option<&str>,
) -> Result<Vec<String>> {
    get_s3_client(region, access_key_id, secret_access_key)?.list_bucket_files(bucket)
}

/// Body of `bucket/filename`
///
/// # Errors
/// Returns the client construction error or the SDK error unchanged.
pub fn read_s3_bucket_file(
    filename: &str,
    bucket: &str,
    region: Option<&str>,
    access_key_id: Option<&str>,
    secret_access_key: Option<&str>,
) -> Result<Vec<u8>> {
    get_s3_client(region, access_key_id, secret_access_key)?.read_bucket_file(bucket, filename)
}

/// Keys directly under `path` in `bucket`, without folder placeholders
///
/// # Errors
/// Returns the client construction error or the SDK error unchanged.
pub fn get_files_in_s3_path(
    path: &str,
    bucket: &str,
    region: Option<&str>,
    access_key_id: Option<&str>,
    secret_access_key: Option<&str>,
) -> Result<Vec<String>> {
    get_s3_client(region, access_key_id, secret_access_key)?.list_files_in_path(bucket, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ACCESS_KEY_ENV, SECRET_KEY_ENV};
    use crate::errors::S3Error;

    #[test]
    fn region_defaults_to_us_east_1() {
        let client = get_s3_client(None, Some("AKIATESTKEY"), Some("test-secret")).unwrap();
        assert_eq!(client.region(), DEFAULT_REGION);

        let client =
            get_s3_client(Some("ap-southeast-2"), Some("AKIATESTKEY"), Some("test-secret"))
                .unwrap();
        assert_eq!(client.region(), "ap-southeast-2");
    }

    #[test]
    fn half_a_key_pair_fails_before_any_request() {
        // The environment could complete the pair; nothing to assert then
        if std::env::var(SECRET_KEY_ENV).is_ok_and(|v| !v.is_empty()) {
            return;
        }
        let err = get_s3_buckets(None, Some("AKIATESTKEY"), None).unwrap_err();
        assert!(matches!(
            err,
            S3Error::IncompleteCredentials("secret access key")
        ));

        if std::env::var(ACCESS_KEY_ENV).is_ok_and(|v| !v.is_empty()) {
            return;
        }
        let err = get_files_in_s3_path("glbx/", "market-data", None, None, Some("test-secret"))
            .unwrap_err();
        assert!(matches!(err, S3Error::IncompleteCredentials("access key id")));
    }
}
