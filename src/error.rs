//! Unified mapper error type used across all stages.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Parse,
    Map,
    Config,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Parse => write!(f, "Parse"),
            Stage::Map => write!(f, "Map"),
            Stage::Config => write!(f, "Config"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapperError {
    pub code: String,
    pub stage: Stage,
    pub message: String,
    /// The source or target field the finding is about, if any.
    pub field_id: Option<String>,
}

impl std::fmt::Display for MapperError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}] {}", self.stage, self.code, self.message)?;
        if let Some(id) = &self.field_id {
            write!(f, " (field '{}')", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for MapperError {}

impl MapperError {
    pub fn new(
        stage: Stage,
        code: &str,
        message: impl Into<String>,
        field_id: Option<String>,
    ) -> Self {
        MapperError {
            code: code.into(),
            stage,
            message: message.into(),
            field_id,
        }
    }

    pub fn parse(code: &str, message: impl Into<String>) -> Self {
        Self::new(Stage::Parse, code, message, None)
    }

    /// A mapping finding, usually about one source or target field.
    pub fn map(code: &str, message: impl Into<String>, field_id: Option<String>) -> Self {
        Self::new(Stage::Map, code, message, field_id)
    }

    pub fn config(code: &str, message: impl Into<String>) -> Self {
        Self::new(Stage::Config, code, message, None)
    }
}
