use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use super::validators::{check_parent_dir_is_writeable, validate};
use crate::config::DEFAULT_REGION;
use crate::dates::DateFormat;

#[derive(Parser, Debug, Clone, serde::Serialize)]
#[command(author, version, about = "List S3 buckets and their contents", long_about = None)]
pub struct Args {
    /// buckets = list bucket names, files = list keys in --bucket, path-files = list keys under --path,
    /// read = download --key, inventory = every bucket followed by its keys
    #[arg(short = 'm', long, default_value = "buckets", value_enum)]
    pub mode: Mode,

    /// AWS region to connect to
    #[arg(short = 'r', long, default_value = DEFAULT_REGION)]
    pub region: String,

    /// Access key id; falls back to the s3_public_key environment variable
    #[arg(long, value_name = "KEY_ID")]
    pub access_key_id: Option<String>,

    /// Secret access key; falls back to the s3_private_key environment variable
    #[arg(long, value_name = "SECRET")]
    #[serde(skip_serializing)]
    pub secret_access_key: Option<String>,

    /// Custom endpoint for S3-compatible storage
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Bucket to list or read from
    #[arg(short = 'b', long)]
    pub bucket: Option<String>,

    /// Object key to read
    #[arg(short = 'k', long)]
    pub key: Option<String>,

    /// Folder prefix, e.g. glbx-mdp3/2024/
    #[arg(long, value_name = "PREFIX")]
    pub path: Option<String>,

    /// Write the downloaded object here instead of stdout
    #[arg(short = 'o', long, value_name = "FILE", value_parser = check_parent_dir_is_writeable)]
    pub output: Option<PathBuf>,

    /// Extract a date from each listed key using this layout
    #[arg(long, value_enum)]
    pub date_format: Option<DateFormat>,

    /// Keep only keys dated on or after this day (YYYY-MM-DD), path-files mode
    #[arg(long, value_name = "DATE", requires = "end_date")]
    pub start_date: Option<NaiveDate>,

    /// Keep only keys dated on or before this day (YYYY-MM-DD), path-files mode
    #[arg(long, value_name = "DATE", requires = "start_date")]
    pub end_date: Option<NaiveDate>,

    /// Emit listings as JSON
    #[arg(long)]
    pub json: bool,

    /// Print extra stuff (use -v -v or --verbose --verbose for even more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Enumeration of possible modes
#[derive(Clone, Copy, ValueEnum, Debug, PartialEq, Eq, Default, serde::Serialize)]
pub enum Mode {
    #[default]
    Buckets,
    Files,
    PathFiles,
    Read,
    Inventory,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            mode: Mode::Buckets,
            region: DEFAULT_REGION.to_string(),
            access_key_id: None,
            secret_access_key: None,
            endpoint_url: None,
            bucket: None,
            key: None,
            path: None,
            output: None,
            date_format: None,
            start_date: None,
            end_date: None,
            json: false,
            verbose: 0,
        }
    }
}

impl Args {
    /// Validate the args for the selected mode
    ///
    /// # Errors
    ///
    /// Returns an error if a flag the mode needs is missing.
    pub fn validate(&self) -> Result<(), String> {
        validate(self)
    }
}
