use crate::error::{Error, ErrorKind};
use serde::{Deserialize, Serialize};

/// What happens to a response whose cycle was superseded before it resolved.
#[derive(Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub enum StaleResponsePolicy {
    /// Only the latest issued cycle may touch the state.
    #[default]
    Discard,
    /// Any resolution is applied, including late ones from older cycles.
    Overwrite,
}

#[derive(Deserialize, Serialize, Clone, PartialEq, Debug)]
pub struct ResourceConfig {
    pub api_base_url: String,

    #[serde(default)]
    pub stale_responses: StaleResponsePolicy,
    #[serde(default)]
    pub reject_error_status: bool,
    #[serde(default = "default_lucky_only_food")]
    pub lucky_only_food: bool,
}

fn default_lucky_only_food() -> bool {
    true
}

impl ResourceConfig {
    pub fn new(api_base_url: String) -> Self {
        Self {
            api_base_url,
            stale_responses: StaleResponsePolicy::default(),
            reject_error_status: false,
            lucky_only_food: default_lucky_only_food(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        match serde_json::from_str(json) {
            Ok(config) => Ok(config),
            Err(error) => Err(Error::new(
                ErrorKind::InvalidConfig,
                format!("failed to parse resource config: {}", error),
            )),
        }
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000".to_string())
    }
}
