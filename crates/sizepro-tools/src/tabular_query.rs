use sizepro_core::{SizeproResult, Skill, SkillDescriptor, ToolCall, ToolResult};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

/// Column layout of the size-distribution dataset, prepended to every query.
const DATA_SCHEMA: &str = "\
Data Schema:
------------
1. group_article (str): Unique product identifier (e.g. \"S42834\")
2. technical_size (str/numeric): Standardized size value (e.g. \"M\", \"36\", \"9.5\")
3. sizecurve (float): Ratio of total sales for this size
4. local_size (str): Region-specific size designation
5. sizecurve_cluster (str): Grouping of similar size patterns
6. business_segments (str): Product category (e.g. \"menswear\", \"footwear\")";

const BUSINESS_RULES: &str = "\
Business Rules:
---------------
- Higher sizecurve = more popular size
- Compare sizes within the same sizecurve_cluster for accurate analysis
- Regional preferences visible in local_size vs technical_size";

const INSTRUCTIONS: &str = "\
Instructions:
1. Analyze the data carefully
2. Provide clear numerical results
3. Include relevant statistics
4. Explain your methodology";

/// External agent that reasons over the size-distribution dataframe.
///
/// The actual implementation (an LLM bound to the dataset) lives outside this
/// crate; embedders supply one. To plug in a new backend: implement this trait
/// and hand it to [`TabularQuerySkill::new`].
#[async_trait]
pub trait DataFrameAgent: Send + Sync {
    async fn answer(&self, prompt: &str) -> SizeproResult<String>;
}

/// Combine the fixed preamble with the user's query.
fn build_prompt(query: &str) -> String {
    format!(
        "{}\n\nCurrent Query: {}\n\n{}\n\n{}",
        DATA_SCHEMA, query, BUSINESS_RULES, INSTRUCTIONS
    )
}

/// Tabular query skill. Answers natural-language questions about the
/// size-distribution dataset by delegating to a [`DataFrameAgent`].
pub struct TabularQuerySkill {
    descriptor: SkillDescriptor,
    agent: Arc<dyn DataFrameAgent>,
}

impl TabularQuerySkill {
    pub fn new(agent: Arc<dyn DataFrameAgent>) -> Self {
        Self {
            descriptor: SkillDescriptor {
                name: "tabular_query".to_string(),
                description: "Answer natural-language questions about size distribution \
                              using the SizePro dataset. Processes complete user sentences \
                              including article numbers."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "User's query related to size distribution"
                        }
                    },
                    "required": ["query"]
                }),
            },
            agent,
        }
    }
}

#[async_trait]
impl Skill for TabularQuerySkill {
    fn descriptor(&self) -> &SkillDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> SizeproResult<ToolResult> {
        let query = call.arguments["query"].as_str().unwrap_or_default();

        if query.is_empty() {
            return Ok(ToolResult::error(&call.id, "Empty query"));
        }

        info!(query = %query, "Tabular query");
        let prompt = build_prompt(query);

        // The agent's answer is returned verbatim; its failures are recovered
        // into an error result so the orchestrator never sees a fault.
        match self.agent.answer(&prompt).await {
            Ok(answer) => Ok(ToolResult::success(&call.id, answer)),
            Err(e) => {
                error!(error = %e, "Dataframe agent failed");
                Ok(ToolResult::error(&call.id, format!("Error: {}", e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizepro_core::SizeproError;

    enum StubReply {
        Answer(String),
        Fail(String),
    }

    struct StubAgent {
        reply: StubReply,
    }

    #[async_trait]
    impl DataFrameAgent for StubAgent {
        async fn answer(&self, _prompt: &str) -> SizeproResult<String> {
            match &self.reply {
                StubReply::Answer(s) => Ok(s.clone()),
                StubReply::Fail(msg) => Err(SizeproError::Http(msg.clone())),
            }
        }
    }

    fn call_with_query(query: &str) -> ToolCall {
        ToolCall {
            id: "test_1".to_string(),
            name: "tabular_query".to_string(),
            arguments: serde_json::json!({"query": query}),
        }
    }

    #[test]
    fn test_prompt_contains_schema_rules_and_query() {
        let prompt = build_prompt("Top 3 sizes for article S42834?");
        assert!(prompt.contains("group_article"));
        assert!(prompt.contains("sizecurve_cluster"));
        assert!(prompt.contains("Higher sizecurve"));
        assert!(prompt.contains("Current Query: Top 3 sizes for article S42834?"));
        assert!(prompt.contains("Explain your methodology"));
    }

    #[tokio::test]
    async fn test_query_returns_agent_answer_verbatim() {
        let skill = TabularQuerySkill::new(Arc::new(StubAgent {
            reply: StubReply::Answer("M is the most popular size (0.31).".to_string()),
        }));
        let result = skill.execute(call_with_query("Most popular size?")).await.unwrap();
        assert!(!result.is_error);
        assert_eq!(result.content, "M is the most popular size (0.31).");
    }

    #[tokio::test]
    async fn test_agent_failure_becomes_error_result() {
        let skill = TabularQuerySkill::new(Arc::new(StubAgent {
            reply: StubReply::Fail("model unavailable".to_string()),
        }));
        let result = skill.execute(call_with_query("Most popular size?")).await.unwrap();
        assert!(result.is_error);
        assert!(result.content.starts_with("Error:"));
        assert!(result.content.contains("model unavailable"));
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected() {
        let skill = TabularQuerySkill::new(Arc::new(StubAgent {
            reply: StubReply::Answer("unused".to_string()),
        }));
        let result = skill.execute(call_with_query("")).await.unwrap();
        assert!(result.is_error);
    }
}
