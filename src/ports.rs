use crate::errors::Result;
use crate::s3::S3StorageClient;
use mockall::automock;

/// Object-store operations the application needs
#[automock]
pub trait S3Port {
    fn list_buckets(&self) -> Result<Vec<String>>;
    fn list_bucket_files(&self, bucket: &str) -> Result<Vec<String>>;
    fn read_bucket_file(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;
    fn list_files_in_path(&self, bucket: &str, path: &str) -> Result<Vec<String>>;
}

impl S3Port for S3StorageClient {
    fn list_buckets(&self) -> Result<Vec<String>> {
        S3StorageClient::list_buckets(self)
    }

    fn list_bucket_files(&self, bucket: &str) -> Result<Vec<String>> {
        S3StorageClient::list_bucket_files(self, bucket)
    }

    fn read_bucket_file(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        S3StorageClient::read_bucket_file(self, bucket, key)
    }

    fn list_files_in_path(&self, bucket: &str, path: &str) -> Result<Vec<String>> {
        S3StorageClient::list_files_in_path(self, bucket, path)
    }
}
