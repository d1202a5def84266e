use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Bytes;
use image_upload::{
    storage::{ObjectStore, StoreError, StoreResult},
    upload::Clock,
};

pub const TEST_BUCKET: &str = "test-bucket";

/// Timestamp the test clock starts at
pub const START_MILLIS: u64 = 1_700_000_000_000;

/// A call received by the fake store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Save {
        key: String,
        content_type: String,
        size: usize,
    },
    MakePublic(String),
    Delete(String),
}

/// In-memory object store that records every call
#[derive(Default)]
pub struct FakeStore {
    calls: Mutex<Vec<StoreCall>>,
    pub fail_save: Option<String>,
    pub fail_make_public: Option<String>,
}

impl FakeStore {
    pub fn failing_save(message: &str) -> Self {
        Self {
            fail_save: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn failing_make_public(message: &str) -> Self {
        Self {
            fail_make_public: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn save(&self, key: &str, content: Bytes, content_type: &str) -> StoreResult<()> {
        self.record(StoreCall::Save {
            key: key.to_string(),
            content_type: content_type.to_string(),
            size: content.len(),
        });
        match &self.fail_save {
            Some(message) => Err(StoreError::ServiceError(message.clone())),
            None => Ok(()),
        }
    }

    async fn make_public(&self, key: &str) -> StoreResult<()> {
        self.record(StoreCall::MakePublic(key.to_string()));
        match &self.fail_make_public {
            Some(message) => Err(StoreError::ServiceError(message.clone())),
            None => Ok(()),
        }
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.record(StoreCall::Delete(key.to_string()));
        Ok(())
    }

    fn bucket_name(&self) -> &str {
        TEST_BUCKET
    }
}

/// Clock the test controls
#[derive(Clone)]
pub struct TestClock(Arc<AtomicU64>);

impl TestClock {
    pub fn new(millis: u64) -> Self {
        Self(Arc::new(AtomicU64::new(millis)))
    }

    pub fn set(&self, millis: u64) {
        self.0.store(millis, Ordering::SeqCst);
    }
}

impl Clock for TestClock {
    fn now_millis(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}
