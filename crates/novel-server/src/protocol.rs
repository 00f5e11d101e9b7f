//! Wire types owned by the server
//!
//! Completion payloads come from `novel_upstream::types`; only the model
//! listing is produced locally.

use novel_config::ModelConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response body of `GET /v1/models`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelList {
    pub object: String,
    pub data: Vec<ModelDescriptor>,
}

/// One entry of the model listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub owned_by: String,
    pub permission: Vec<Value>,
    pub root: String,
    pub parent: Option<String>,
}

impl ModelDescriptor {
    pub fn from_config(config: &ModelConfig) -> Self {
        Self {
            id: config.id.clone(),
            object: "model".to_owned(),
            created: config.created,
            owned_by: config.owned_by.clone(),
            permission: Vec::new(),
            root: config.id.clone(),
            parent: None,
        }
    }
}

impl ModelList {
    pub fn single(model: ModelDescriptor) -> Self {
        Self {
            object: "list".to_owned(),
            data: vec![model],
        }
    }
}
