pub mod app;
pub mod args;
pub mod aws;
pub mod config;
pub mod dates;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod s3;
pub mod utils;

pub use app::{run_app, run_with_port};
pub use args::Args;
pub use aws::{
    get_files_in_s3_path, get_s3_bucket_files, get_s3_buckets, get_s3_client, read_s3_bucket_file,
};
pub use errors::{Result, S3Error};
