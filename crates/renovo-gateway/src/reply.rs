// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Templated reply strings for the messaging webhook.
//!
//! Every inbound message resolves to one of these replies -- the channel
//! retries delivery aggressively on HTTP errors, so even internal failures
//! come back as a reply body. Replies are wrapped in the channel's XML
//! message envelope.

use renovo_core::types::Task;

/// Wraps reply text in the messaging channel's XML envelope.
pub fn envelope(text: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
        xml_escape(text)
    )
}

/// Reply for an empty message body.
pub fn guidance() -> String {
    envelope(
        "Please send a text message or voice note describing the change you want to make.",
    )
}

/// Reply when classification confidence is below the threshold.
pub fn clarify() -> String {
    envelope(
        "I'm not sure what change you want. Please be more specific.\n\n\
         Example: \"Change the hero button text to 'Book a Free Audit'\"",
    )
}

/// Reply when voice transcription is unavailable or failed.
pub fn transcription_unavailable() -> String {
    envelope(
        "Sorry, I couldn't process that voice note. Please try again or send a text message.",
    )
}

/// Reply confirming a created task; fixed field order.
pub fn task_created(task: &Task) -> String {
    envelope(&format!(
        "Task created!\n\nType: {}\n{}\nFiles: {}\n\nTask ID: {}",
        task.task_type,
        task.description,
        task.scope.join(", "),
        task.id
    ))
}

/// Reply for any internal failure while handling a message.
pub fn internal_error() -> String {
    envelope("Sorry, there was an error processing your request. Please try again.")
}

/// Escapes the five XML-significant characters.
fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use renovo_core::types::{TaskSource, TaskStatus, TaskType};

    fn sample_task() -> Task {
        Task {
            id: "abc12345".into(),
            task_type: TaskType::CopyChange,
            description: "change the hero button text to 'Book a Free Audit'".into(),
            scope: vec!["app/components/Hero.tsx".into()],
            rules: vec![],
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
    fn envelope_wraps_and_escapes() {
        let xml = envelope("a < b & c");
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<Response><Message>a &lt; b &amp; c</Message></Response>"));
    }

    #[test]
    fn task_created_includes_all_fields_in_order() {
        let xml = task_created(&sample_task());
        assert!(xml.contains("copy_change"));
        assert!(xml.contains("app/components/Hero.tsx"));
        assert!(xml.contains("abc12345"));
        let type_pos = xml.find("Type:").unwrap();
        let files_pos = xml.find("Files:").unwrap();
        let id_pos = xml.find("Task ID:").unwrap();
        assert!(type_pos < files_pos && files_pos < id_pos);
    }

    #[test]
    fn quotes_in_description_are_escaped() {
        let xml = task_created(&sample_task());
        assert!(xml.contains("&apos;Book a Free Audit&apos;"));
    }

    #[test]
    fn canned_replies_are_valid_envelopes() {
        for xml in [guidance(), clarify(), transcription_unavailable(), internal_error()] {
            assert!(xml.contains("<Response><Message>"));
            assert!(xml.ends_with("</Message></Response>"));
        }
    }
}
