// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic instruction-block rendering.
//!
//! The template is fixed with a stable field order so the downstream
//! agent sees identical structure for every task.

use renovo_core::types::Task;

/// Renders the instruction block handed to the change-making agent.
pub fn render(task: &Task) -> String {
    let scope_list = task
        .scope
        .iter()
        .map(|f| format!("- {f}"))
        .collect::<Vec<_>>()
        .join("\n");
    let rules_list = task
        .rules
        .iter()
        .map(|r| format!("- {r}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Apply the following change strictly:\n\
         \n\
         ## Task Type\n\
         {task_type}\n\
         \n\
         ## Description\n\
         {description}\n\
         \n\
         ## Target Files (ONLY modify these)\n\
         {scope_list}\n\
         \n\
         ## Rules (MUST follow)\n\
         {rules_list}\n\
         \n\
         ## Important\n\
         - Make ONLY the requested change\n\
         - Do NOT modify any other code\n\
         - Do NOT change layout or structure unless explicitly requested\n\
         - Preserve all existing functionality\n\
         - Keep the same code style and formatting\n\
         \n\
         Please apply this change now.",
        task_type = task.task_type,
        description = task.description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use renovo_core::types::{TaskSource, TaskStatus, TaskType};

    fn task() -> Task {
        Task {
            id: "abc12345".into(),
            task_type: TaskType::CopyChange,
            description: "change the hero button text".into(),
            scope: vec![
                "app/components/Hero.tsx".into(),
                "app/components/CTA.tsx".into(),
            ],
            rules: vec![
                "Do not change layout structure".into(),
                "Only modify text content".into(),
            ],
            auto_commit: true,
            status: TaskStatus::Pending,
            created_at: "2026-01-01T00:00:00Z".into(),
            updated_at: None,
            source: TaskSource {
                message: "m".into(),
                sender: "s".into(),
                timestamp: "2026-01-01T00:00:00Z".into(),
            },
            result: None,
        }
    }

    #[test]
    fn render_is_deterministic() {
        let t = task();
        assert_eq!(render(&t), render(&t));
    }

    #[test]
    fn render_has_stable_section_order() {
        let prompt = render(&task());
        let type_pos = prompt.find("## Task Type").unwrap();
        let desc_pos = prompt.find("## Description").unwrap();
        let files_pos = prompt.find("## Target Files").unwrap();
        let rules_pos = prompt.find("## Rules").unwrap();
        let important_pos = prompt.find("## Important").unwrap();
        assert!(type_pos < desc_pos);
        assert!(desc_pos < files_pos);
        assert!(files_pos < rules_pos);
        assert!(rules_pos < important_pos);
    }

    #[test]
    fn render_lists_every_scope_file_and_rule() {
        let prompt = render(&task());
        assert!(prompt.contains("- app/components/Hero.tsx"));
        assert!(prompt.contains("- app/components/CTA.tsx"));
        assert!(prompt.contains("- Do not change layout structure"));
        assert!(prompt.contains("- Only modify text content"));
        assert!(prompt.contains("copy_change"));
    }
}
