//! In-test object store that records calls.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use crate::storage::{ObjectStore, PutOptions, StorageError};

/// What the next call should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeed,
    Fail,
    NotFound,
}

/// Counts calls and keeps the last put.
pub struct RecordingStore {
    outcome: Outcome,
    puts: AtomicUsize,
    deletes: AtomicUsize,
    last_put: Mutex<Option<(String, usize, PutOptions)>>,
}

impl RecordingStore {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            puts: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            last_put: Mutex::new(None),
        }
    }

    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn last_put(&self) -> Option<(String, usize, PutOptions)> {
        self.last_put.lock().unwrap().clone()
    }

    fn result(&self, key: &str) -> Result<(), StorageError> {
        match self.outcome {
            Outcome::Succeed => Ok(()),
            Outcome::Fail => Err(StorageError::operation("connection refused")),
            Outcome::NotFound => Err(StorageError::not_found(key)),
        }
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn put(&self, key: &str, body: Bytes, options: &PutOptions) -> Result<(), StorageError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        *self.last_put.lock().unwrap() = Some((key.to_string(), body.len(), options.clone()));
        self.result(key)
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.result(key)
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
