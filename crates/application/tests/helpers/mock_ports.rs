use async_trait::async_trait;
use dnsd_application::ports::{UpstreamForwarder, ZoneSource};
use dnsd_domain::DomainError;
use hickory_proto::op::Query;
use hickory_proto::rr::{LowerName, Record, RecordType};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Upstream stand-in: answers from a fixed table, empty otherwise, and
/// records every question it was asked.
#[derive(Clone, Default)]
pub struct MockForwarder {
    answers: Arc<Mutex<HashMap<(LowerName, RecordType), Vec<Record>>>>,
    calls: Arc<Mutex<Vec<Query>>>,
}

impl MockForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_answers(&self, question: &Query, answers: Vec<Record>) {
        self.answers.lock().unwrap().insert(
            (LowerName::new(question.name()), question.query_type()),
            answers,
        );
    }

    pub fn calls(&self) -> Vec<Query> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl UpstreamForwarder for MockForwarder {
    async fn forward(&self, question: &Query) -> Vec<Record> {
        self.calls.lock().unwrap().push(question.clone());
        self.answers
            .lock()
            .unwrap()
            .get(&(LowerName::new(question.name()), question.query_type()))
            .cloned()
            .unwrap_or_default()
    }

    fn upstream(&self) -> String {
        "mock-upstream".to_string()
    }
}

#[derive(Clone, Default)]
pub struct MockZoneSource {
    zones: Arc<Mutex<HashMap<String, Result<Vec<Record>, DomainError>>>>,
    loaded: Arc<Mutex<Vec<String>>>,
}

impl MockZoneSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(self, source: &str, records: Vec<Record>) -> Self {
        self.zones
            .lock()
            .unwrap()
            .insert(source.to_string(), Ok(records));
        self
    }

    pub fn with_failure(self, source: &str, error: DomainError) -> Self {
        self.zones
            .lock()
            .unwrap()
            .insert(source.to_string(), Err(error));
        self
    }

    pub fn loaded(&self) -> Vec<String> {
        self.loaded.lock().unwrap().clone()
    }
}

#[async_trait]
impl ZoneSource for MockZoneSource {
    async fn load(&self, source: &str) -> Result<Vec<Record>, DomainError> {
        self.loaded.lock().unwrap().push(source.to_string());
        self.zones
            .lock()
            .unwrap()
            .get(source)
            .cloned()
            .unwrap_or_else(|| {
                Err(DomainError::ZoneFetch {
                    source_id: source.to_string(),
                    reason: "unknown source".to_string(),
                })
            })
    }
}
