use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::types::{Args, Mode};

/// Validate the args for the selected mode
///
/// # Errors
///
/// Returns an error if a flag the mode needs is missing, or if a flag is
/// given to a mode that ignores it.
pub fn validate(args: &Args) -> Result<(), String> {
    let needs = |value: &Option<String>, flag: &str| -> Result<(), String> {
        match value {
            Some(v) if !v.is_empty() => Ok(()),
            _ => Err(format!("{flag} is required when mode is {:?}", args.mode)),
        }
    };

    match args.mode {
        Mode::Buckets | Mode::Inventory => {}
        Mode::Files => needs(&args.bucket, "--bucket")?,
        Mode::PathFiles => {
            needs(&args.bucket, "--bucket")?;
            needs(&args.path, "--path")?;
        }
        Mode::Read => {
            needs(&args.bucket, "--bucket")?;
            needs(&args.key, "--key")?;
        }
    }

    if args.output.is_some() && args.mode != Mode::Read {
        return Err("--output only applies to read mode".to_string());
    }
    if args.date_format.is_some() && !matches!(args.mode, Mode::Files | Mode::PathFiles) {
        return Err("--date-format only applies to files and path-files modes".to_string());
    }
    match (args.start_date, args.end_date) {
        (None, None) => {}
        (Some(start), Some(end)) => {
            if args.mode != Mode::PathFiles {
                return Err("--start-date/--end-date only apply to path-files mode".to_string());
            }
            if start > end {
                return Err(format!("--start-date {start} is after --end-date {end}"));
            }
        }
        _ => return Err("--start-date and --end-date must be given together".to_string()),
    }

    Ok(())
}

/// For a file path, check that its parent dir exists and is writable
///
/// # Errors
///
/// Returns an error if the parent directory is missing or not writable.
pub fn check_parent_dir_is_writeable(file: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(file);
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if dir_is_writable(&parent) {
        Ok(path)
    } else {
        Err(format!("The dir '{}' is not writable.", parent.display()))
    }
}

fn dir_is_writable(dir: &Path) -> bool {
    if !dir.is_dir() || fs::read_dir(dir).is_err() {
        return false;
    }
    let marker = dir.join(".s3-lister-write-check");
    let ok = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&marker)
        .and_then(|mut f| f.write_all(b"test"))
        .is_ok();
    let _ = fs::remove_file(&marker);
    ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(mode: Mode) -> Args {
        Args {
            mode,
            ..Default::default()
        }
    }

    #[test]
    fn buckets_and_inventory_need_nothing() {
        assert!(validate(&args(Mode::Buckets)).is_ok());
        assert!(validate(&args(Mode::Inventory)).is_ok());
    }

    #[test]
    fn files_requires_bucket() {
        let err = validate(&args(Mode::Files)).unwrap_err();
        assert!(err.contains("--bucket"));

        let ok = Args {
            bucket: Some("market-data".to_string()),
            ..args(Mode::Files)
        };
        assert!(validate(&ok).is_ok());
    }

    #[test]
    fn path_files_requires_bucket_and_path() {
        let missing_path = Args {
            bucket: Some("market-data".to_string()),
            ..args(Mode::PathFiles)
        };
        assert!(validate(&missing_path).unwrap_err().contains("--path"));

        let empty_bucket = Args {
            bucket: Some(String::new()),
            path: Some("2024/".to_string()),
            ..args(Mode::PathFiles)
        };
        assert!(validate(&empty_bucket).unwrap_err().contains("--bucket"));
    }

    #[test]
    fn read_requires_key() {
        let a = Args {
            bucket: Some("market-data".to_string()),
            ..args(Mode::Read)
        };
        assert!(validate(&a).unwrap_err().contains("--key"));
    }

    #[test]
    fn output_and_date_format_are_mode_specific() {
        let a = Args {
            output: Some(PathBuf::from("out.bin")),
            ..args(Mode::Buckets)
        };
        assert!(validate(&a).unwrap_err().contains("--output"));

        let a = Args {
            date_format: Some(crate::dates::DateFormat::Hyphen),
            ..args(Mode::Inventory)
        };
        assert!(validate(&a).unwrap_err().contains("--date-format"));
    }

    #[test]
    fn date_range_needs_path_files_and_ordered_bounds() {
        let day = |d| chrono::NaiveDate::from_ymd_opt(2024, 1, d);
        let base = Args {
            bucket: Some("market-data".to_string()),
            path: Some("glbx/".to_string()),
            ..args(Mode::PathFiles)
        };

        let ok = Args {
            start_date: day(2),
            end_date: day(5),
            ..base.clone()
        };
        assert!(validate(&ok).is_ok());

        let single_day = Args {
            start_date: day(3),
            end_date: day(3),
            ..base.clone()
        };
        assert!(validate(&single_day).is_ok());

        let reversed = Args {
            start_date: day(5),
            end_date: day(2),
            ..base.clone()
        };
        assert!(validate(&reversed).unwrap_err().contains("after"));

        let half = Args {
            start_date: day(2),
            ..base
        };
        assert!(validate(&half).unwrap_err().contains("together"));

        let wrong_mode = Args {
            bucket: Some("market-data".to_string()),
            start_date: day(2),
            end_date: day(5),
            ..args(Mode::Files)
        };
        assert!(validate(&wrong_mode).unwrap_err().contains("path-files"));
    }

    #[test]
    fn output_parent_must_be_writable() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("body.bin");
        assert_eq!(
            check_parent_dir_is_writeable(target.to_str().unwrap()).unwrap(),
            target
        );

        let missing = dir.path().join("nope").join("body.bin");
        assert!(check_parent_dir_is_writeable(missing.to_str().unwrap()).is_err());
    }
}
