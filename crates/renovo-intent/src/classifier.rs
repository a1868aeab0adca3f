// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic intent classification.
//!
//! Maps a raw change-request message to a typed descriptor using ordered
//! keyword rules. No LLM call, no network, no latency -- and it never fails:
//! ambiguity comes back as a low-confidence default, not an error.

use renovo_core::types::{TaskDescriptor, TaskType};

/// Confidence when both the type and the scope matched a keyword.
const CONFIDENCE_FULL_MATCH: f32 = 0.85;
/// Confidence when exactly one axis matched.
const CONFIDENCE_PARTIAL_MATCH: f32 = 0.6;
/// Confidence when both axes fell back to defaults.
const CONFIDENCE_FALLBACK: f32 = 0.4;

/// Type-detection keyword sets, checked in priority order; the first set
/// with a hit decides the type.
const COPY_KEYWORDS: &[&str] = &[
    "change text",
    "change button",
    "change cta",
    "button text",
    "heading text",
    "rename",
    "update text",
    "modify text",
];

const COLOR_KEYWORDS: &[&str] = &["color", "colour", "theme", "background"];

const STYLE_KEYWORDS: &[&str] = &["style", "css", "padding", "margin"];

const SEO_KEYWORDS: &[&str] = &["seo", "meta", "title tag", "description tag"];

const REORDER_KEYWORDS: &[&str] = &["reorder", "move section", "swap"];

const ADD_KEYWORDS: &[&str] = &["add ", "insert ", "new section"];

const REMOVE_KEYWORDS: &[&str] = &["remove ", "delete ", "drop "];

/// Scope keyword -> canonical file path, checked in this order; the first
/// keyword present in the message wins.
const SCOPE_MAP: &[(&str, &str)] = &[
    ("hero", "app/components/Hero.tsx"),
    ("header", "app/components/Header.tsx"),
    ("footer", "app/components/Footer.tsx"),
    ("cta", "app/components/CTA.tsx"),
    ("nav", "app/components/Nav.tsx"),
    ("pricing", "app/components/Pricing.tsx"),
    ("features", "app/components/Features.tsx"),
    ("seo", "app/layout.tsx"),
    ("colors", "tailwind.config.js"),
];

/// Repository names that are flat HTML sites: scope collapses to the
/// single page file instead of the component map.
const FLAT_SITE_REPOS: &[&str] = &["landing-page", "flyer-site"];

/// Base safety rules attached to every task.
const BASE_RULES: &[&str] = &[
    "Do not change layout structure",
    "Do not remove existing functionality",
    "Preserve all existing imports",
    "Only modify what is explicitly requested",
];

/// Heuristic intent classifier.
///
/// Pure and non-blocking: the only inputs are the message text and the
/// construction-time configuration.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    confidence_threshold: f32,
    default_scope: String,
}

impl IntentClassifier {
    /// Create a classifier from the intent configuration section.
    pub fn new(config: &renovo_config::model::IntentConfig) -> Self {
        Self {
            confidence_threshold: config.confidence_threshold,
            default_scope: config.default_scope.clone(),
        }
    }

    /// Create a classifier with explicit threshold and fallback scope.
    pub fn with_defaults(confidence_threshold: f32, default_scope: impl Into<String>) -> Self {
        Self {
            confidence_threshold,
            default_scope: default_scope.into(),
        }
    }

    /// The confidence below which callers should suppress task creation
    /// and ask the sender to clarify.
    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }

    /// Classify a message into a task descriptor. Never fails.
    pub fn classify(&self, message: &str) -> TaskDescriptor {
        let lower = message.to_lowercase();

        let (task_type, type_matched) = detect_type(&lower);
        let target_repo = extract_target_repo(&lower);

        let (scope, scope_matched) = match target_repo
            .as_deref()
            .filter(|repo| FLAT_SITE_REPOS.contains(repo))
        {
            Some(_) => (vec!["index.html".to_string()], true),
            None => match detect_scope(&lower) {
                Some(path) => (vec![path.to_string()], true),
                None => (vec![self.default_scope.clone()], false),
            },
        };

        let confidence = match (type_matched, scope_matched) {
            (true, true) => CONFIDENCE_FULL_MATCH,
            (true, false) | (false, true) => CONFIDENCE_PARTIAL_MATCH,
            (false, false) => CONFIDENCE_FALLBACK,
        };

        TaskDescriptor {
            task_type,
            description: message.to_string(),
            scope,
            rules: rules_for(task_type),
            auto_commit: task_type.auto_commit_safe(),
            confidence,
            target_repo,
        }
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::with_defaults(0.5, "app/components/Hero.tsx")
    }
}

/// Detect the task type from a lowercased message. Returns the type and
/// whether any keyword set actually matched (false means default).
fn detect_type(lower: &str) -> (TaskType, bool) {
    let axes: &[(&[&str], TaskType)] = &[
        (COPY_KEYWORDS, TaskType::CopyChange),
        (COLOR_KEYWORDS, TaskType::ColorChange),
        (STYLE_KEYWORDS, TaskType::StyleChange),
        (SEO_KEYWORDS, TaskType::SeoUpdate),
        (REORDER_KEYWORDS, TaskType::SectionReorder),
        (ADD_KEYWORDS, TaskType::AddContent),
        (REMOVE_KEYWORDS, TaskType::RemoveContent),
    ];

    for (keywords, task_type) in axes {
        if keywords.iter().any(|k| lower.contains(k)) {
            return (*task_type, true);
        }
    }
    (TaskType::ComponentEdit, false)
}

/// Find the first scope keyword present in the message.
fn detect_scope(lower: &str) -> Option<&'static str> {
    SCOPE_MAP
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, path)| *path)
}

/// Extract a trailing `in <identifier>` clause naming a target repository.
///
/// Scope keywords are not repository names: "change the text in hero"
/// names a section, not a repo, so those identifiers are ignored.
fn extract_target_repo(lower: &str) -> Option<String> {
    let trimmed = lower.trim_end_matches(['.', '!', '?', ' ']);
    let (_, candidate) = trimmed.rsplit_once(" in ")?;
    let candidate = candidate.trim();

    if candidate.is_empty() || candidate.contains(' ') {
        return None;
    }
    if SCOPE_MAP.iter().any(|(keyword, _)| *keyword == candidate) {
        return None;
    }
    Some(candidate.to_string())
}

/// Safety rules for a task type: the base set plus type-specific additions.
/// The mapping is total -- every type has a defined (possibly empty) addition.
fn rules_for(task_type: TaskType) -> Vec<String> {
    let extra: &[&str] = match task_type {
        TaskType::CopyChange => &[
            "Only modify text content",
            "Do not touch styles or classes",
            "Keep the same element types",
        ],
        TaskType::ColorChange => &[
            "Only modify color values",
            "Keep the same variable names",
            "Do not change other style properties",
        ],
        TaskType::SeoUpdate => &[
            "Only modify meta tags",
            "Keep valid HTML structure",
            "Do not change page content",
        ],
        TaskType::SectionReorder => &[
            "Only change component order",
            "Do not modify component internals",
            "Keep all props intact",
        ],
        TaskType::StyleChange => &[
            "Only modify style properties",
            "Keep responsive breakpoints",
            "Do not change structure",
        ],
        TaskType::AddContent => &[
            "Only add the requested content",
            "Do not alter existing content",
        ],
        TaskType::RemoveContent => &[
            "Remove only the requested content",
            "Keep surrounding markup intact",
        ],
        TaskType::ComponentEdit => &[],
    };

    BASE_RULES
        .iter()
        .chain(extra.iter())
        .map(|r| r.to_string())
        .collect()
}
