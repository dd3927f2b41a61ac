//! In-memory graph store stubs for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use graphcat_core::CatalogResult;

use crate::store::{GraphQuery, GraphStore, Record};

/// Replays canned responses in order and records every query it was given.
/// Queries beyond the canned responses get an empty result.
#[derive(Default)]
pub(crate) struct StubStore {
    responses: Mutex<VecDeque<CatalogResult<Vec<Record>>>>,
    queries: Mutex<Vec<GraphQuery>>,
}

impl StubStore {
    pub fn returning(rows: Vec<Record>) -> Self {
        let stub = Self::default();
        stub.push(Ok(rows));
        stub
    }

    pub fn push(&self, response: CatalogResult<Vec<Record>>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn queries(&self) -> Vec<GraphQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphStore for StubStore {
    async fn run(&self, query: GraphQuery) -> CatalogResult<Vec<Record>> {
        self.queries.lock().unwrap().push(query);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Build a [`Record`] from a JSON object literal.
pub(crate) fn record(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected JSON object, got {other}"),
    }
}
