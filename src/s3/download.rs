use crate::errors::{Result, S3Error};
use crate::s3::models::S3StorageClient;
use crate::utils::log_utils;

impl S3StorageClient {
    /// Download an object's body
    ///
    /// # Errors
    /// Surfaces the SDK error unchanged inside `S3Error::Sdk`, or `S3Error::Body`
    /// if the stream breaks while reading.
    pub fn read_bucket_file(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        log_utils::debug(
            &format!(
                "read_bucket_file called with bucket={bucket}, region={}, filename={key}",
                self.region
            ),
            self.verbose,
        );

        self.runtime.block_on(async {
            let resp = self
                .client
                .get_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await
                .map_err(|e| S3Error::sdk("GetObject", e))?;

            log_utils::debug(
                &format!(
                    "GetObject response received\nContent length: {:?}\nE-Tag: {:?}",
                    resp.content_length(),
                    resp.e_tag()
                ),
                self.verbose,
            );

            let bytes = resp
                .body
                .collect()
                .await
                .map_err(|e| S3Error::Body(e.to_string()))?
                .to_vec();

            log_utils::debug(
                &format!("Downloaded {} bytes from s3://{bucket}/{key}", bytes.len()),
                self.verbose,
            );
            Ok(bytes)
        })
    }
}
