pub mod client;
pub mod download;
pub mod list;
pub mod models;

// Re-export types for convenient access from other modules
pub use models::S3StorageClient;
