use aws_sdk_s3::Client;

/// Blocking wrapper around the AWS S3 client
///
/// Owns the runtime its requests are driven on, so it must not be used from
/// inside another tokio runtime.
pub struct S3StorageClient {
    pub(crate) client: Client,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) region: String,
    pub verbose: u8,
}
