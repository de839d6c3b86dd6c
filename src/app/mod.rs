use chrono::NaiveDate;
use std::io::Write;
use std::sync::Arc;

use crate::args::{Args, Mode};
use crate::config::S3Settings;
use crate::dates::{DateFormat, extract_date_from_string};
use crate::domain::{BucketInventory, FileEntry};
use crate::errors::{Result, S3Error};
use crate::ports::S3Port;
use crate::s3::S3StorageClient;
use crate::utils::log_utils::Logger;

pub struct AppCore {
    s3: Arc<dyn S3Port>,
}

impl AppCore {
    pub fn new(s3: Arc<dyn S3Port>) -> Self {
        Self { s3 }
    }

    /// # Errors
    /// Returns the underlying listing error.
    pub fn bucket_names(&self) -> Result<Vec<String>> {
        self.s3.list_buckets()
    }

    /// Every key in `bucket`, tagged with a date when `date_format` is given
    ///
    /// # Errors
    /// Returns the underlying listing error.
    pub fn bucket_files(
        &self,
        bucket: &str,
        date_format: Option<DateFormat>,
    ) -> Result<Vec<FileEntry>> {
        let keys = self.s3.list_bucket_files(bucket)?;
        Ok(Self::tag_dates(keys, date_format))
    }

    /// Keys directly under `path` in `bucket`
    ///
    /// # Errors
    /// Returns the underlying listing error.
    pub fn path_files(
        &self,
        bucket: &str,
        path: &str,
        date_format: Option<DateFormat>,
    ) -> Result<Vec<FileEntry>> {
        let keys = self.s3.list_files_in_path(bucket, path)?;
        Ok(Self::tag_dates(keys, date_format))
    }

    /// Keys under `path` whose extracted date falls in `start..=end`
    ///
    /// Keys without a date are skipped. `date_format` defaults to `YYYYMMDD`.
    ///
    /// # Errors
    /// Returns the underlying listing error, or `NoFilesInRange` if nothing matched.
    pub fn path_files_between(
        &self,
        bucket: &str,
        path: &str,
        date_format: Option<DateFormat>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<FileEntry>> {
        let selected: Vec<FileEntry> = self
            .path_files(bucket, path, Some(date_format.unwrap_or_default()))?
            .into_iter()
            .filter(|entry| entry.date.is_some_and(|d| start <= d && d <= end))
            .collect();

        if selected.is_empty() {
            return Err(S3Error::NoFilesInRange { start, end });
        }
        Ok(selected)
    }

    /// # Errors
    /// Returns the underlying download error.
    pub fn read_file(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        self.s3.read_bucket_file(bucket, key)
    }

    /// All buckets with all of their keys, in listing order
    ///
    /// # Errors
    /// Stops at the first bucket that cannot be listed.
    pub fn inventory(&self) -> Result<Vec<BucketInventory>> {
        self.s3
            .list_buckets()?
            .into_iter()
            .map(|bucket| {
                let files = self.s3.list_bucket_files(&bucket)?;
                Ok(BucketInventory { bucket, files })
            })
            .collect()
    }

    fn tag_dates(keys: Vec<String>, date_format: Option<DateFormat>) -> Vec<FileEntry> {
        keys.into_iter()
            .map(|key| {
                let date = date_format.and_then(|fmt| extract_date_from_string(&key, fmt));
                FileEntry { key, date }
            })
            .collect()
    }
}

/// Build the real S3 client from `args` and the environment, then run the selected mode
///
/// # Errors
/// Returns an error if credentials are incomplete, the client cannot be built,
/// or the S3 call fails.
pub fn run_app(args: &Args) -> Result<()> {
    let logger = Logger::new(args.verbose);
    let settings = S3Settings::from_env(
        Some(&args.region),
        args.access_key_id.as_deref(),
        args.secret_access_key.as_deref(),
    )?
    .with_endpoint(args.endpoint_url.clone());

    logger.info(&format!(
        "Mode {:?}, region {}, {} credentials",
        args.mode,
        settings.region,
        if settings.credentials.is_some() {
            "static"
        } else {
            "default-chain"
        }
    ));

    let client = S3StorageClient::new(settings, args.verbose)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_port(args, Arc::new(client), &mut out)
}

/// Run the selected mode against any `S3Port`, writing results to `out`
///
/// # Errors
/// Returns an error if a required argument is missing, the S3 call fails,
/// or writing the output fails.
pub fn run_with_port(args: &Args, s3: Arc<dyn S3Port>, out: &mut dyn Write) -> Result<()> {
    let core = AppCore::new(s3);
    let logger = Logger::new(args.verbose);

    match args.mode {
        Mode::Buckets => {
            let names = core.bucket_names()?;
            logger.info(&format!("{} bucket(s)", names.len()));
            if args.json {
                serde_json::to_writer_pretty(&mut *out, &names)?;
                writeln!(out)?;
            } else {
                for name in names {
                    writeln!(out, "{name}")?;
                }
            }
        }
        Mode::Files => {
            let bucket = require(args.bucket.as_deref(), "--bucket")?;
            let entries = core.bucket_files(bucket, args.date_format)?;
            logger.info(&format!("{} file(s) in {bucket}", entries.len()));
            write_entries(out, &entries, args.json)?;
        }
        Mode::PathFiles => {
            let bucket = require(args.bucket.as_deref(), "--bucket")?;
            let path = require(args.path.as_deref(), "--path")?;
            let entries = match (args.start_date, args.end_date) {
                (Some(start), Some(end)) => {
                    logger.debug(&format!("Selecting keys dated {start} to {end}"));
                    core.path_files_between(bucket, path, args.date_format, start, end)?
                }
                _ => core.path_files(bucket, path, args.date_format)?,
            };
            logger.info(&format!("{} file(s) under {bucket}/{path}", entries.len()));
            write_entries(out, &entries, args.json)?;
        }
        Mode::Read => {
            let bucket = require(args.bucket.as_deref(), "--bucket")?;
            let key = require(args.key.as_deref(), "--key")?;
            let body = core.read_file(bucket, key)?;
            match &args.output {
                Some(path) => {
                    std::fs::write(path, &body)?;
                    logger.info(&format!("Wrote {} bytes to {}", body.len(), path.display()));
                }
                None => out.write_all(&body)?,
            }
        }
        Mode::Inventory => {
            let inventory = core.inventory()?;
            if args.json {
                serde_json::to_writer_pretty(&mut *out, &inventory)?;
                writeln!(out)?;
            } else {
                for entry in inventory {
                    writeln!(out, "Bucket Name: {}", entry.bucket)?;
                    for file in entry.files {
                        writeln!(out, "{file}")?;
                    }
                }
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn require<'a>(value: Option<&'a str>, flag: &str) -> Result<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| S3Error::InvalidArgs(format!("{flag} is required for this mode")))
}

fn write_entries(out: &mut dyn Write, entries: &[FileEntry], json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, entries)?;
        writeln!(out)?;
        return Ok(());
    }
    for entry in entries {
        match entry.date {
            Some(date) => writeln!(out, "{}\t{date}", entry.key)?,
            None => writeln!(out, "{}", entry.key)?,
        }
    }
    Ok(())
}
