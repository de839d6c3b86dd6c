use crate::errors::{Result, S3Error};
use crate::s3::models::S3StorageClient;
use crate::utils::log_utils;

impl S3StorageClient {
    /// Names of every bucket visible to the credentials
    ///
    /// # Errors
    /// Surfaces the SDK error unchanged inside `S3Error::Sdk`.
    pub fn list_buckets(&self) -> Result<Vec<String>> {
        log_utils::debug(
            &format!("list_buckets called with region={}", self.region),
            self.verbose,
        );

        let buckets = self.runtime.block_on(async {
            let resp = self
                .client
                .list_buckets()
                .send()
                .await
                .map_err(|e| S3Error::sdk("ListBuckets", e))?;

            Ok::<Vec<String>, S3Error>(
                resp.buckets()
                    .iter()
                    .filter_map(|b| b.name().map(str::to_string))
                    .collect(),
            )
        })?;

        log_utils::debug(
            &format!("Number of buckets retrieved: {}", buckets.len()),
            self.verbose,
        );
        Ok(buckets)
    }

    /// Every object key in `bucket`, following continuation tokens
    ///
    /// # Errors
    /// Surfaces the SDK error unchanged inside `S3Error::Sdk`.
    pub fn list_bucket_files(&self, bucket: &str) -> Result<Vec<String>> {
        log_utils::debug(
            &format!(
                "list_bucket_files called with bucket={bucket}, region={}",
                self.region
            ),
            self.verbose,
        );

        let files = self.collect_keys(bucket, None)?;

        log_utils::debug(
            &format!("Number of files retrieved: {}", files.len()),
            self.verbose,
        );
        Ok(files)
    }

    /// Keys directly under `path`, treating `/` as the folder separator
    ///
    /// Folder placeholder keys (ending in `/`) are dropped.
    ///
    /// # Errors
    /// Surfaces the SDK error unchanged inside `S3Error::Sdk`.
    pub fn list_files_in_path(&self, bucket: &str, path: &str) -> Result<Vec<String>> {
        log_utils::debug(
            &format!(
                "list_files_in_path called with bucket={bucket}, path={path}, region={}",
                self.region
            ),
            self.verbose,
        );

        let files: Vec<String> = self
            .collect_keys(bucket, Some(path))?
            .into_iter()
            .filter(|key| !key.ends_with('/'))
            .collect();

        log_utils::debug(&format!("{} files retrieved", files.len()), self.verbose);
        Ok(files)
    }

    fn collect_keys(&self, bucket: &str, prefix: Option<&str>) -> Result<Vec<String>> {
        self.runtime.block_on(async {
            let mut request = self.client.list_objects_v2().bucket(bucket);
            if let Some(prefix) = prefix {
                request = request.prefix(prefix).delimiter("/");
            }

            let mut pages = request.into_paginator().send();
            let mut keys = Vec::new();
            let mut page_count = 0usize;

            while let Some(page) = pages.next().await {
                let page = page.map_err(|e| S3Error::sdk("ListObjectsV2", e))?;
                page_count += 1;
                keys.extend(
                    page.contents()
                        .iter()
                        .filter_map(|o| o.key().map(str::to_string)),
                );
            }

            log_utils::debug(
                &format!("Read {page_count} page(s) from bucket '{bucket}'"),
                self.verbose,
            );
            Ok(keys)
        })
    }
}
