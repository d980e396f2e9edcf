//! Tool implementations for the SizePro assistant.
//!
//! Provides the two skills the external orchestrator calls into: triggering a
//! Jenkins pipeline stage and querying the size-distribution dataset through
//! an external dataframe-reasoning agent.
//!
//! # Main entry points
//!
//! - [`register_tools()`] — Register the pipeline trigger skill.
//! - [`PipelineTriggerSkill`] / [`JenkinsTrigger`] — Jenkins build trigger.
//! - [`TabularQuerySkill`] / [`DataFrameAgent`] — dataset Q&A boundary.

/// Jenkins pipeline-stage trigger skill.
pub mod pipeline_trigger;
/// Size-distribution dataset query skill.
pub mod tabular_query;

pub use pipeline_trigger::{
    job_name_for, JenkinsConfig, JenkinsTrigger, PipelineStage, PipelineTriggerSkill,
    TriggerOutcome,
};
pub use tabular_query::{DataFrameAgent, TabularQuerySkill};

use sizepro_core::SkillRegistry;
use std::sync::Arc;

/// Register the pipeline trigger skill into the given registry.
///
/// The tabular query skill is not registered here: it needs a
/// [`DataFrameAgent`] implementation, which embedding applications supply via
/// [`TabularQuerySkill::new`] before registering it themselves.
pub fn register_tools(registry: &mut SkillRegistry, jenkins: JenkinsConfig) {
    registry.register(Arc::new(PipelineTriggerSkill::new(jenkins)));
}
