//! Pluggable record-source and submit boundaries.
//!
//! The dashboard this replaces had no backend: list pages rendered hardcoded
//! arrays and form submissions were a timer followed by a navigation. These
//! traits are the seam a real backend plugs into; today the implementations
//! are JSON files on disk plus the in-memory fixtures.

pub mod fixtures;

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::errors::{OdkError, Result};
use crate::view::collection::Record;

/// Supplies the records a list page renders.
pub trait RecordSource<R> {
    /// Fetch the full record list.
    fn fetch(&self) -> Result<Vec<R>>;
}

/// Proof a submission was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Id assigned to the new record.
    pub id: u64,
}

/// Accepts new records (leads, campaigns). Failures surface as
/// [`OdkError::OperationFailed`]; validation happens before submission.
pub trait SubmitSink<T> {
    /// Persist one record and return its assigned id.
    fn submit(&mut self, item: T) -> Result<Receipt>;
}

/// Record source backed by a JSON array file.
///
/// A missing file reads as an empty collection, matching a dashboard with no
/// data yet.
#[derive(Debug, Clone)]
pub struct JsonFileSource<R> {
    path: PathBuf,
    _marker: PhantomData<R>,
}

impl<R> JsonFileSource<R> {
    /// Source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<R: DeserializeOwned> RecordSource<R> for JsonFileSource<R> {
    fn fetch(&self) -> Result<Vec<R>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|source| OdkError::io(&self.path, source))?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Submit sink appending to the same JSON array file a [`JsonFileSource`] reads.
///
/// Assigns ids as max existing id + 1 and rewrites the whole array; fine for
/// the single-user, single-process model this replaces.
#[derive(Debug, Clone)]
pub struct JsonFileSink<R> {
    path: PathBuf,
    _marker: PhantomData<R>,
}

impl<R> JsonFileSink<R> {
    /// Sink writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }
}

impl<R> SubmitSink<NewRecord<R>> for JsonFileSink<R>
where
    R: Record + Serialize + DeserializeOwned,
{
    fn submit(&mut self, item: NewRecord<R>) -> Result<Receipt> {
        let source: JsonFileSource<R> = JsonFileSource::new(&self.path);
        let mut records = source.fetch()?;
        let id = records.iter().map(Record::id).max().map_or(1, |m| m + 1);
        let record = (item.build)(id);
        records.push(record);

        let rendered = serde_json::to_string_pretty(&records)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| OdkError::io(parent, source))?;
        }
        fs::write(&self.path, rendered).map_err(|source| OdkError::OperationFailed {
            context: "record submit",
            details: format!("{}: {source}", self.path.display()),
        })?;
        Ok(Receipt { id })
    }
}

/// A record awaiting an id from the sink.
///
/// Forms produce these: the sink owns id assignment, so the form hands over a
/// constructor instead of a finished record.
pub struct NewRecord<R> {
    build: Box<dyn FnOnce(u64) -> R + Send>,
}

impl<R> NewRecord<R> {
    /// Wrap a constructor that receives the assigned id.
    #[must_use]
    pub fn new(build: impl FnOnce(u64) -> R + Send + 'static) -> Self {
        Self {
            build: Box::new(build),
        }
    }
}

impl<R> std::fmt::Debug for NewRecord<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NewRecord(..)")
    }
}

/// In-memory source: the fixtures path, and what tests use.
#[derive(Debug, Clone, Default)]
pub struct MemorySource<R> {
    records: Vec<R>,
}

impl<R> MemorySource<R> {
    /// Source over an owned record list.
    #[must_use]
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }
}

impl<R: Clone> RecordSource<R> for MemorySource<R> {
    fn fetch(&self) -> Result<Vec<R>> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Lead, LeadStatus};
    use chrono::NaiveDate;

    fn new_lead(first: &str) -> NewRecord<Lead> {
        let first = first.to_string();
        NewRecord::new(move |id| Lead {
            id,
            first_name: first,
            last_name: "Tester".to_string(),
            email: "t@example.com".to_string(),
            company: String::new(),
            phone: String::new(),
            status: LeadStatus::New,
            source: "Import".to_string(),
            created_at: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
        })
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source: JsonFileSource<Lead> = JsonFileSource::new(dir.path().join("leads.json"));
        assert!(source.fetch().unwrap().is_empty());
    }

    #[test]
    fn sink_assigns_sequential_ids_and_source_reads_them_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.json");
        let mut sink: JsonFileSink<Lead> = JsonFileSink::new(&path);

        let first = sink.submit(new_lead("Ada")).unwrap();
        let second = sink.submit(new_lead("Grace")).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let source: JsonFileSource<Lead> = JsonFileSource::new(&path);
        let leads = source.fetch().unwrap();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[1].first_name, "Grace");
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.json");
        std::fs::write(&path, "not json").unwrap();
        let source: JsonFileSource<Lead> = JsonFileSource::new(&path);
        let err = source.fetch().expect_err("corrupt file must fail");
        assert_eq!(err.code(), "ODK-2101");
    }
}
