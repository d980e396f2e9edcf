use crate::{SizeproResult, ToolCall, ToolResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Metadata describing a skill's interface.
///
/// The `parameters_schema` is a JSON Schema object the orchestrator uses for
/// argument routing and validation. A skill may declare a stricter schema than
/// its runtime enforces; the schema is advisory for the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDescriptor {
    pub name: String,
    pub description: String,
    pub parameters_schema: serde_json::Value,
}

/// Trait that all tools must implement.
///
/// `execute` must return `Ok` with an error [`ToolResult`] for tool-level
/// failures; `Err` is reserved for framework faults.
#[async_trait]
pub trait Skill: Send + Sync {
    fn descriptor(&self) -> &SkillDescriptor;

    async fn execute(&self, call: ToolCall) -> SizeproResult<ToolResult>;
}
