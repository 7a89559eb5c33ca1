pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use services::knowledge_client::KnowledgeClient;
use std::sync::Arc;

/// Shared application state containing the backend client
#[derive(Clone)]
pub struct AppState {
    pub knowledge_client: Arc<KnowledgeClient>,
}

impl AppState {
    pub fn new(knowledge_client: Arc<KnowledgeClient>) -> Self {
        Self { knowledge_client }
    }
}
