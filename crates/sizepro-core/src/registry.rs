use crate::skill::{Skill, SkillDescriptor};
use crate::{SizeproError, SizeproResult, ToolCall, ToolResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Central registry for all available skills.
pub struct SkillRegistry {
    skills: HashMap<String, Arc<dyn Skill>>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self {
            skills: HashMap::new(),
        }
    }

    pub fn register(&mut self, skill: Arc<dyn Skill>) {
        let name = skill.descriptor().name.clone();
        info!(skill = %name, "Registered skill");
        self.skills.insert(name, skill);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Skill>> {
        self.skills.get(name)
    }

    pub fn list_descriptors(&self) -> Vec<&SkillDescriptor> {
        self.skills.values().map(|s| s.descriptor()).collect()
    }

    /// Execute a tool call, resolving the skill by name.
    pub async fn execute(&self, call: ToolCall) -> SizeproResult<ToolResult> {
        let skill = self
            .skills
            .get(&call.name)
            .ok_or_else(|| SizeproError::Tool(format!("Unknown tool: {}", call.name)))?;

        skill.execute(call).await
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::new()
    }
}
