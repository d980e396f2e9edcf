use sizepro_core::{SizeproResult, Skill, SkillDescriptor, ToolCall, ToolResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

/// Suffix appended to a lower-cased stage name to form the Jenkins job name.
const JOB_SUFFIX: &str = "-size-pro";

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_USERNAME: &str = "admin";

const TRIGGER_TIMEOUT: Duration = Duration::from_secs(10);

/// One named phase of the SizePro ML pipeline.
///
/// The set is closed: each stage maps to exactly one Jenkins job via
/// [`PipelineStage::job_name`], so no two stages can collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Preprocessing,
    Training,
    Postprocessing,
}

impl PipelineStage {
    /// All defined stages, in pipeline order.
    pub const ALL: [PipelineStage; 3] = [
        PipelineStage::Preprocessing,
        PipelineStage::Training,
        PipelineStage::Postprocessing,
    ];

    /// Parse a stage name, case-insensitively. Unknown names yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "preprocessing" => Some(Self::Preprocessing),
            "training" => Some(Self::Training),
            "postprocessing" => Some(Self::Postprocessing),
            _ => None,
        }
    }

    /// Canonical lower-case stage name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preprocessing => "preprocessing",
            Self::Training => "training",
            Self::Postprocessing => "postprocessing",
        }
    }

    /// The Jenkins job this stage triggers.
    pub fn job_name(&self) -> String {
        job_name_for(self.as_str())
    }
}

/// Derive the Jenkins job name for a raw stage string.
///
/// Applied to the raw input, not the parsed enum: the trigger forwards
/// unrecognized stages as-is and lets the CI server reject them. The
/// descriptor schema still restricts the orchestrator to the three defined
/// stages.
pub fn job_name_for(stage: &str) -> String {
    format!("{}{}", stage.to_lowercase(), JOB_SUFFIX)
}

/// Connection settings for the Jenkins trigger endpoint.
///
/// Held immutably for the component's lifetime. The token is a secret: it is
/// sent only as basic-auth material and never logged.
#[derive(Debug, Clone)]
pub struct JenkinsConfig {
    pub base_url: String,
    pub username: String,
    pub api_token: String,
}

impl JenkinsConfig {
    /// Config with the default local Jenkins URL and username.
    ///
    /// The token is not validated here; a missing or wrong token surfaces as
    /// an auth failure outcome on first use.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            api_token: api_token.into(),
        }
    }
}

/// Normalized result of one trigger attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The CI server accepted the trigger (HTTP 201) and queued the job.
    Success {
        job_name: String,
        status: u16,
        /// The response's `Date` header, verbatim.
        server_date: Option<String>,
    },
    /// The CI server answered with any status other than 201 — missing job,
    /// auth failure, and server errors are all folded together.
    RemoteFailure {
        job_name: String,
        status: u16,
        body: String,
        server_date: Option<String>,
    },
    /// The request never produced an HTTP response (connection refused,
    /// timeout, DNS or TLS failure).
    Transport { job_name: String, message: String },
}

impl TriggerOutcome {
    /// Whether the trigger was accepted by the CI server.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Render the outcome as the human-readable string handed to the
    /// orchestrator.
    pub fn render(&self) -> String {
        match self {
            Self::Success {
                job_name,
                status,
                server_date,
            } => format!(
                "✅ Jenkins job '{}' triggered successfully! {}\n{}",
                job_name,
                status,
                server_date.as_deref().unwrap_or("")
            ),
            Self::RemoteFailure {
                job_name,
                status,
                body,
                server_date,
            } => format!(
                "❌ Failed to trigger '{}': {}\n{}\n{}",
                job_name,
                status,
                body,
                server_date.as_deref().unwrap_or("")
            ),
            Self::Transport { job_name, message } => {
                format!("❌ Exception triggering '{}': {}", job_name, message)
            }
        }
    }
}

/// Client for the Jenkins build-trigger endpoint.
///
/// Stateless across calls: one blocking round-trip per [`trigger`] invocation,
/// no retry, no deduplication. Safe to share across tasks — the inner
/// `reqwest::Client` is `Send + Sync`.
///
/// [`trigger`]: JenkinsTrigger::trigger
pub struct JenkinsTrigger {
    config: JenkinsConfig,
    client: reqwest::Client,
}

impl JenkinsTrigger {
    pub fn new(config: JenkinsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(TRIGGER_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// The build-trigger URL for a job.
    pub fn target_url(&self, job_name: &str) -> String {
        format!("{}/job/{}/build", self.config.base_url, job_name)
    }

    /// Trigger the Jenkins job for a pipeline stage.
    ///
    /// Always returns an outcome, never an error: remote rejections become
    /// [`TriggerOutcome::RemoteFailure`] and network faults become
    /// [`TriggerOutcome::Transport`].
    pub async fn trigger(&self, stage: &str) -> TriggerOutcome {
        let job_name = job_name_for(stage);
        let url = self.target_url(&job_name);

        info!(url = %url, job = %job_name, "Triggering Jenkins job");

        let response = match self
            .client
            .post(&url)
            .basic_auth(&self.config.username, Some(&self.config.api_token))
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                return TriggerOutcome::Transport {
                    job_name,
                    message: e.to_string(),
                };
            }
        };

        let status = response.status().as_u16();
        let server_date = response
            .headers()
            .get(reqwest::header::DATE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if status == 201 {
            info!(job = %job_name, status, "Jenkins job queued");
            return TriggerOutcome::Success {
                job_name,
                status,
                server_date,
            };
        }

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => format!("<failed to read response body: {}>", e),
        };
        info!(job = %job_name, status, body = %body, "Jenkins trigger rejected");

        TriggerOutcome::RemoteFailure {
            job_name,
            status,
            body,
            server_date,
        }
    }
}

/// Pipeline trigger skill. Starts a Jenkins job for a named pipeline stage.
pub struct PipelineTriggerSkill {
    descriptor: SkillDescriptor,
    trigger: JenkinsTrigger,
}

impl PipelineTriggerSkill {
    pub fn new(config: JenkinsConfig) -> Self {
        Self {
            descriptor: SkillDescriptor {
                name: "pipeline_trigger".to_string(),
                description: "Trigger a Jenkins job for one of the pipeline stages: \
                              Preprocessing, Training, or Postprocessing."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "stage": {
                            "type": "string",
                            "enum": ["preprocessing", "training", "postprocessing"],
                            "description": "Stage of the pipeline to trigger"
                        }
                    },
                    "required": ["stage"]
                }),
            },
            trigger: JenkinsTrigger::new(config),
        }
    }
}

#[async_trait]
impl Skill for PipelineTriggerSkill {
    fn descriptor(&self) -> &SkillDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> SizeproResult<ToolResult> {
        let stage = call.arguments["stage"].as_str().unwrap_or_default();

        if stage.is_empty() {
            return Ok(ToolResult::error(&call.id, "Empty stage"));
        }

        let outcome = self.trigger.trigger(stage).await;
        let rendered = outcome.render();

        if outcome.is_success() {
            Ok(ToolResult::success(&call.id, rendered))
        } else {
            Ok(ToolResult::error(&call.id, rendered))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_name_derivation_for_all_stages() {
        assert_eq!(
            PipelineStage::Preprocessing.job_name(),
            "preprocessing-size-pro"
        );
        assert_eq!(PipelineStage::Training.job_name(), "training-size-pro");
        assert_eq!(
            PipelineStage::Postprocessing.job_name(),
            "postprocessing-size-pro"
        );
        for stage in PipelineStage::ALL {
            assert_eq!(stage.job_name(), job_name_for(stage.as_str()));
        }
    }

    #[test]
    fn test_job_name_is_case_insensitive() {
        assert_eq!(job_name_for("Preprocessing"), job_name_for("preprocessing"));
        assert_eq!(job_name_for("TRAINING"), "training-size-pro");
    }

    #[test]
    fn test_stage_parse_case_insensitive() {
        assert_eq!(
            PipelineStage::parse("Preprocessing"),
            Some(PipelineStage::Preprocessing)
        );
        assert_eq!(
            PipelineStage::parse("training"),
            Some(PipelineStage::Training)
        );
        assert_eq!(PipelineStage::parse("deploy"), None);
    }

    #[test]
    fn test_unrecognized_stage_still_derives_a_job_name() {
        // Pass-through: validation is the CI server's job.
        assert_eq!(job_name_for("nonexistent-stage"), "nonexistent-stage-size-pro");
    }

    #[test]
    fn test_target_url() {
        let trigger = JenkinsTrigger::new(JenkinsConfig::new("token123"));
        assert_eq!(
            trigger.target_url("training-size-pro"),
            "http://localhost:8080/job/training-size-pro/build"
        );
    }

    #[test]
    fn test_render_success() {
        let outcome = TriggerOutcome::Success {
            job_name: "training-size-pro".to_string(),
            status: 201,
            server_date: Some("Wed, 21 Oct 2015 07:28:00 GMT".to_string()),
        };
        let rendered = outcome.render();
        assert!(rendered.contains("triggered successfully"));
        assert!(rendered.contains("training-size-pro"));
        assert!(rendered.contains("201"));
        assert!(rendered.contains("Wed, 21 Oct 2015 07:28:00 GMT"));
    }

    #[test]
    fn test_render_remote_failure() {
        let outcome = TriggerOutcome::RemoteFailure {
            job_name: "training-size-pro".to_string(),
            status: 404,
            body: "Job not found".to_string(),
            server_date: None,
        };
        let rendered = outcome.render();
        assert!(rendered.contains("Failed"));
        assert!(rendered.contains("404"));
        assert!(rendered.contains("Job not found"));
    }

    #[test]
    fn test_render_transport() {
        let outcome = TriggerOutcome::Transport {
            job_name: "training-size-pro".to_string(),
            message: "connection refused".to_string(),
        };
        let rendered = outcome.render();
        assert!(rendered.contains("Exception"));
        assert!(rendered.contains("training-size-pro"));
    }

    #[tokio::test]
    async fn test_trigger_connection_refused_is_transport_outcome() {
        // Port 1 is never listening; the call must return an outcome, not raise.
        let mut config = JenkinsConfig::new("token123");
        config.base_url = "http://127.0.0.1:1".to_string();
        let trigger = JenkinsTrigger::new(config);

        let outcome = trigger.trigger("training").await;
        match &outcome {
            TriggerOutcome::Transport { job_name, .. } => {
                assert_eq!(job_name, "training-size-pro");
            }
            other => panic!("Expected Transport outcome, got {:?}", other),
        }
        assert!(outcome.render().contains("Exception"));
    }

    #[tokio::test]
    async fn test_skill_execute_empty_stage() {
        let skill = PipelineTriggerSkill::new(JenkinsConfig::new("token123"));
        let call = ToolCall {
            id: "test_1".to_string(),
            name: "pipeline_trigger".to_string(),
            arguments: serde_json::json!({}),
        };
        let result = skill.execute(call).await.unwrap();
        assert!(result.is_error);
        assert!(result.content.contains("Empty stage"));
    }
}
