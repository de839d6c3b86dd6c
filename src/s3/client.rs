use crate::config::{S3Credentials, S3Settings, mask_key};
use crate::errors::{Result, S3Error};
use crate::s3::models::S3StorageClient;
use crate::utils::log_utils;
use aws_credential_types::Credentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Builder, Region};

impl S3StorageClient {
    /// Create a client for the given region and credentials
    ///
    /// Static credentials are used as-is; without them the SDK's default
    /// provider chain (profile, instance role, `AWS_*` variables) applies.
    ///
    /// # Errors
    /// Returns an error if the runtime cannot be created.
    pub fn new(settings: S3Settings, verbose: u8) -> Result<Self> {
        let runtime = build_runtime()?;

        log_utils::debug("Creating S3 client with these parameters:", verbose);
        log_utils::debug(&format!("Region: {}", settings.region), verbose);
        if let Some(endpoint) = &settings.endpoint_url {
            log_utils::debug(&format!("Endpoint: {endpoint}"), verbose);
        }

        let builder = match &settings.credentials {
            Some(creds) => {
                log_utils::debug(
                    &format!("Key ID: {}", mask_key(&creds.access_key_id)),
                    verbose,
                );
                static_conf_builder(&settings.region, creds)
            }
            None => {
                log_utils::debug("No static credentials, using default provider chain", verbose);
                let shared = runtime.block_on(
                    aws_config::defaults(BehaviorVersion::latest())
                        .region(Region::new(settings.region.clone()))
                        .load(),
                );
                Builder::from(&shared)
            }
        };

        let conf = with_endpoint(builder, settings.endpoint_url).build();
        Ok(Self::with_runtime(conf, runtime, verbose))
    }

    /// Wrap an already-built SDK config
    ///
    /// # Errors
    /// Returns an error if the runtime cannot be created.
    pub fn from_conf(conf: aws_sdk_s3::Config, verbose: u8) -> Result<Self> {
        Ok(Self::with_runtime(conf, build_runtime()?, verbose))
    }

    fn with_runtime(
        conf: aws_sdk_s3::Config,
        runtime: tokio::runtime::Runtime,
        verbose: u8,
    ) -> Self {
        let region = conf
            .region()
            .map(|r| r.as_ref().to_string())
            .unwrap_or_default();
        Self {
            client: Client::from_conf(conf),
            runtime,
            region,
            verbose,
        }
    }

    /// Region the client was configured for
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }
}

/// SDK config builder for a static key pair
pub(crate) fn static_conf_builder(region: &str, creds: &S3Credentials) -> Builder {
    let credentials = Credentials::new(
        creds.access_key_id.clone(),
        creds.secret_access_key.clone(),
        None, // No session token
        None, // No expiry
        "S3ListerStaticCredentials",
    );
    aws_sdk_s3::Config::builder()
        .region(Region::new(region.to_string()))
        .credentials_provider(credentials)
        .behavior_version(BehaviorVersion::latest())
}

/// Point the builder at a custom endpoint; S3-compatible stores need path-style addressing
pub(crate) fn with_endpoint(builder: Builder, endpoint_url: Option<String>) -> Builder {
    match endpoint_url {
        Some(endpoint) => builder.endpoint_url(endpoint).force_path_style(true),
        None => builder,
    }
}

fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| S3Error::Runtime(format!("Failed to create runtime: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_smithy_runtime::client::http::test_util::{ReplayEvent, StaticReplayClient};
    use aws_smithy_types::body::SdkBody;

    fn creds() -> S3Credentials {
        S3Credentials {
            access_key_id: "AKIATESTKEY".to_string(),
            secret_access_key: "test-secret".to_string(),
        }
    }

    fn empty_listing() -> ReplayEvent {
        ReplayEvent::new(
            http::Request::builder()
                .uri("http://localhost:9000/")
                .body(SdkBody::empty())
                .unwrap(),
            http::Response::builder()
                .status(200)
                .body(SdkBody::from(
                    r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
<Name>market-data</Name><KeyCount>0</KeyCount><MaxKeys>1000</MaxKeys><IsTruncated>false</IsTruncated>
</ListBucketResult>"#,
                ))
                .unwrap(),
        )
    }

    #[test]
    fn endpoint_switches_to_path_style_addressing() {
        let http_client = StaticReplayClient::new(vec![empty_listing()]);
        let conf = with_endpoint(
            static_conf_builder("us-east-1", &creds()),
            Some("http://localhost:9000".to_string()),
        )
        .http_client(http_client.clone())
        .build();
        let client = S3StorageClient::from_conf(conf, 0).unwrap();

        assert!(client.list_bucket_files("market-data").unwrap().is_empty());

        let request = http_client.actual_requests().next().unwrap();
        let uri = request.uri().to_string();
        assert!(
            uri.starts_with("http://localhost:9000/market-data"),
            "bucket should be in the path, uri was {uri}"
        );
    }

    #[test]
    fn static_credentials_build_offline() {
        let settings = S3Settings {
            region: "eu-central-1".to_string(),
            credentials: Some(creds()),
            endpoint_url: None,
        };
        let client = S3StorageClient::new(settings, 0).unwrap();
        assert_eq!(client.region(), "eu-central-1");
    }
}
