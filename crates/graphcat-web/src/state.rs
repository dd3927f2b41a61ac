//! Application state.

use std::sync::Arc;

use graphcat_graph::GraphStore;
use graphcat_warehouse::SqlRunner;

/// Shared state for all handlers: the graph store and the warehouse
/// client, behind their operation seams.
#[derive(Clone)]
pub struct AppState {
    pub graph: Arc<dyn GraphStore>,
    pub warehouse: Arc<dyn SqlRunner>,
}

impl AppState {
    pub fn new(graph: Arc<dyn GraphStore>, warehouse: Arc<dyn SqlRunner>) -> Self {
        Self { graph, warehouse }
    }
}
