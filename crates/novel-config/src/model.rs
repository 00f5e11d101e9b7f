use serde::Deserialize;

/// The single model this proxy advertises
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    #[serde(default = "default_id")]
    pub id: String,
    #[serde(default = "default_owned_by")]
    pub owned_by: String,
    /// Unix timestamp reported as the model's creation time
    #[serde(default = "default_created")]
    pub created: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            id: default_id(),
            owned_by: default_owned_by(),
            created: default_created(),
        }
    }
}

fn default_id() -> String {
    "nalang-xl".to_owned()
}

fn default_owned_by() -> String {
    "novel".to_owned()
}

const fn default_created() -> u64 {
    1_677_610_602
}
