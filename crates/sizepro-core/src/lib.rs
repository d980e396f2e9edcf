//! Core types and error definitions for the SizePro assistant tools.
//!
//! This crate provides the foundational types shared across the SizePro
//! crates: error handling, tool call abstractions, and the skill trait and
//! registry that the external orchestrator drives.
//!
//! # Main types
//!
//! - [`SizeproError`] — Unified error enum for all SizePro subsystems.
//! - [`SizeproResult`] — Convenience alias for `Result<T, SizeproError>`.
//! - [`ToolCall`] — Represents an orchestrator-initiated tool invocation request.
//! - [`ToolResult`] — The result returned after executing a tool call.
//! - [`Skill`] — Trait implemented by every tool.
//! - [`SkillRegistry`] — Name-indexed registry the orchestrator resolves tools through.

/// Skill registry.
pub mod registry;
/// Skill trait and descriptor.
pub mod skill;

pub use registry::SkillRegistry;
pub use skill::{Skill, SkillDescriptor};

use serde::{Deserialize, Serialize};

// --- Error types ---

/// Top-level error type for the SizePro tool layer.
///
/// Each variant corresponds to a subsystem that can produce errors. Tool-level
/// failures (a failed trigger, a failed query) are NOT errors: they are
/// reported as [`ToolResult::error`] values so an orchestrator mid-conversation
/// never sees a fault. `Err` is reserved for framework misuse, such as
/// resolving an unknown tool name.
#[derive(Debug, thiserror::Error)]
pub enum SizeproError {
    /// An error in tool resolution or invocation plumbing.
    #[error("Tool error: {0}")]
    Tool(String),

    /// An error from an outbound HTTP request.
    #[error("HTTP error: {0}")]
    Http(String),

    /// An error in configuration loading or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenience `Result` alias using [`SizeproError`].
pub type SizeproResult<T> = Result<T, SizeproError>;

// --- Tool types ---

/// A request from the orchestrator to invoke a specific tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier assigned by the orchestrator for this tool call.
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// JSON arguments to pass to the tool.
    pub arguments: serde_json::Value,
}

/// The result returned after executing a [`ToolCall`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// The ID of the [`ToolCall`] this result corresponds to.
    pub call_id: String,
    /// The textual output produced by the tool.
    pub content: String,
    /// Whether the tool execution ended in an error.
    pub is_error: bool,
}

impl ToolResult {
    /// Creates a successful tool result.
    pub fn success(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            content: content.into(),
            is_error: false,
        }
    }

    /// Creates an error tool result.
    pub fn error(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            content: content.into(),
            is_error: true,
        }
    }
}
