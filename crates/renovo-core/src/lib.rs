// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Renovo change pipeline.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Renovo workspace. Collaborator crates
//! (intent, store, gateway, watcher, clients) implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RenovoError;
pub use types::{
    MessageKind, StoredMessage, Task, TaskDescriptor, TaskOutcome, TaskResult, TaskSource,
    TaskStatus, TaskType,
};

// Re-export all capability traits at crate root.
pub use traits::{
    ChangeAgent, RemoteTaskWriter, TaskStore, TranscriptionAdapter, UnderstandingAdapter, Vcs,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renovo_error_has_all_variants() {
        // Verify all 7 error variants exist and can be constructed.
        let _config = RenovoError::Config("test".into());
        let _storage = RenovoError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _channel = RenovoError::Channel {
            message: "test".into(),
            source: None,
        };
        let _provider = RenovoError::Provider {
            message: "test".into(),
            source: None,
        };
        let _not_found = RenovoError::TaskNotFound("abc12345".into());
        let _timeout = RenovoError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = RenovoError::Internal("test".into());
    }

    #[test]
    fn task_not_found_display_includes_id() {
        let err = RenovoError::TaskNotFound("deadbeef".into());
        assert!(err.to_string().contains("deadbeef"));
    }

    #[test]
    fn all_trait_modules_are_exported() {
        // This test verifies that all capability trait modules compile and
        // are accessible through the public API. If any module is missing
        // or has a compile error, this test won't compile.
        fn _assert_store<T: TaskStore>() {}
        fn _assert_understanding<T: UnderstandingAdapter>() {}
        fn _assert_transcription<T: TranscriptionAdapter>() {}
        fn _assert_remote<T: RemoteTaskWriter>() {}
        fn _assert_agent<T: ChangeAgent>() {}
        fn _assert_vcs<T: Vcs>() {}
    }
}
