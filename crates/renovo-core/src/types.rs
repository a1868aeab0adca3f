// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Renovo workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The closed enumeration of change-request categories.
///
/// Classification always lands on exactly one of these; unknown values
/// normalize to [`TaskType::ComponentEdit`] at validation boundaries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskType {
    /// Text or copy modifications (buttons, headings, paragraphs).
    CopyChange,
    /// Reorder page sections.
    SectionReorder,
    /// Update color tokens or themes.
    ColorChange,
    /// Modify SEO tags (title, meta, og tags).
    SeoUpdate,
    /// General component changes.
    ComponentEdit,
    /// CSS/styling modifications.
    StyleChange,
    /// Add new content to existing components.
    AddContent,
    /// Remove content from components.
    RemoveContent,
}

impl TaskType {
    /// Whether a successful change of this type may be committed without
    /// human review. Only simple, reversible categories qualify.
    pub fn auto_commit_safe(&self) -> bool {
        matches!(
            self,
            TaskType::CopyChange
                | TaskType::ColorChange
                | TaskType::SeoUpdate
                | TaskType::StyleChange
        )
    }
}

/// Lifecycle status of a task.
///
/// Transitions are forward-only: `Pending -> Processing -> terminal`.
/// A terminal task is relocated to the archive partition and never
/// returns to the active set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Processing,
    Success,
    Failed,
    ManualReview,
}

impl TaskStatus {
    /// Terminal statuses end the active lifecycle and trigger archival.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskStatus::Success | TaskStatus::Failed | TaskStatus::ManualReview
        )
    }
}

/// Provenance of a task: the originating message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSource {
    /// Raw message text the task was derived from.
    pub message: String,
    /// Sender identifier from the messaging channel.
    pub sender: String,
    /// ISO-8601 UTC timestamp of the originating message.
    pub timestamp: String,
}

/// Outcome record populated when a task leaves `Processing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    /// Terminal status the task resolved to.
    pub status: TaskStatus,
    /// Free-text details from the resolver.
    pub details: String,
    /// Optional structured payload from the resolver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// A persisted change request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Short unique identifier, immutable once assigned.
    pub id: String,
    /// Classification result.
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// Original or derived free-text description.
    pub description: String,
    /// Files the change may touch. Never empty.
    pub scope: Vec<String>,
    /// Constraints the downstream agent must obey.
    pub rules: Vec<String>,
    /// Whether a successful resolution may commit automatically.
    pub auto_commit: bool,
    /// Current lifecycle status.
    pub status: TaskStatus,
    /// ISO-8601 UTC creation timestamp.
    pub created_at: String,
    /// ISO-8601 UTC timestamp of the last status change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Originating message provenance.
    pub source: TaskSource,
    /// Outcome record, `None` until the task leaves `Processing`.
    #[serde(default)]
    pub result: Option<TaskResult>,
}

/// Transient output of intent classification, consumed once by the task store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    /// Detected change category.
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// Description to persist (usually the raw message).
    pub description: String,
    /// Detected file scope. Never empty.
    pub scope: Vec<String>,
    /// Generated safety rules.
    pub rules: Vec<String>,
    /// Auto-commit eligibility derived from the task type.
    pub auto_commit: bool,
    /// Classifier confidence in [0, 1].
    pub confidence: f32,
    /// Repository named by a trailing "in <repo>" clause, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_repo: Option<String>,
}

/// Kind of inbound message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageKind {
    Text,
    Voice,
}

/// An immutable entry in the bounded message log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Unique message identifier.
    pub id: String,
    /// Sender identifier from the messaging channel.
    pub sender: String,
    /// Message text (or transcription for voice messages).
    pub content: String,
    /// Text or voice.
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// Channel-specific metadata (e.g. source media reference).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    /// ISO-8601 UTC timestamp.
    pub timestamp: String,
}

/// External outcome signal for a dispatched task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskOutcome {
    /// Terminal status the task should resolve to.
    pub status: TaskStatus,
    /// Free-text details for the result record.
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn task_type_round_trips_through_strings() {
        let variants = [
            TaskType::CopyChange,
            TaskType::SectionReorder,
            TaskType::ColorChange,
            TaskType::SeoUpdate,
            TaskType::ComponentEdit,
            TaskType::StyleChange,
            TaskType::AddContent,
            TaskType::RemoveContent,
        ];
        assert_eq!(variants.len(), 8, "TaskType must have exactly 8 variants");

        for variant in &variants {
            let s = variant.to_string();
            let parsed = TaskType::from_str(&s).expect("should parse back");
            assert_eq!(*variant, parsed);
        }
    }

    #[test]
    fn task_type_serializes_snake_case() {
        let json = serde_json::to_string(&TaskType::CopyChange).unwrap();
        assert_eq!(json, r#""copy_change""#);
        let json = serde_json::to_string(&TaskType::SeoUpdate).unwrap();
        assert_eq!(json, r#""seo_update""#);
    }

    #[test]
    fn auto_commit_safe_is_exactly_the_safe_subset() {
        let safe = [
            TaskType::CopyChange,
            TaskType::ColorChange,
            TaskType::SeoUpdate,
            TaskType::StyleChange,
        ];
        let unsafe_ = [
            TaskType::SectionReorder,
            TaskType::ComponentEdit,
            TaskType::AddContent,
            TaskType::RemoveContent,
        ];
        for t in &safe {
            assert!(t.auto_commit_safe(), "{t} should be auto-commit safe");
        }
        for t in &unsafe_ {
            assert!(!t.auto_commit_safe(), "{t} should require review");
        }
    }

    #[test]
    fn terminal_statuses() {
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::Processing.is_terminal());
        assert!(TaskStatus::Success.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
        assert!(TaskStatus::ManualReview.is_terminal());
    }

    #[test]
    fn task_status_string_form_matches_wire_format() {
        assert_eq!(TaskStatus::ManualReview.to_string(), "manual_review");
        assert_eq!(
            TaskStatus::from_str("manual_review").unwrap(),
            TaskStatus::ManualReview
        );
    }

    #[test]
    fn task_serialization_uses_type_key() {
        let task = Task {
            id: "abc12345".into(),
            task_type: TaskType::CopyChange,
            description: "change hero text".into(),
            scope: vec!["app/components/Hero.tsx".into()],
            rules: vec!["Only modify text content".into()],
            auto_commit: true,
            status: TaskStatus::Pending,
            created_at: "2026-01-01T00:00:00Z".into(),
            updated_at: None,
            source: TaskSource {
                message: "change hero text".into(),
                sender: "user-1".into(),
                timestamp: "2026-01-01T00:00:00Z".into(),
            },
            result: None,
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["type"], "copy_change");
        assert_eq!(json["status"], "pending");
        assert!(json.get("updated_at").is_none());
        assert_eq!(json["result"], serde_json::Value::Null);

        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn message_kind_round_trips() {
        let json = serde_json::to_string(&MessageKind::Voice).unwrap();
        assert_eq!(json, r#""voice""#);
        let back: MessageKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MessageKind::Voice);
    }
}
