pub mod knowledge_client;
pub mod metrics;
