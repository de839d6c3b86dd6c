use chrono::NaiveDate;
use serde::Serialize;

/// One listed object, optionally tagged with the date found in its key
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// A bucket together with every key it holds
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BucketInventory {
    pub bucket: String,
    pub files: Vec<String>,
}
