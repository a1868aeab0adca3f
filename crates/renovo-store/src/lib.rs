// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence layer for the Renovo change pipeline.
//!
//! Provides the file-backed [`FsTaskStore`] (file-per-task JSON records with
//! an archive partition) and the bounded [`MessageLog`]. Both are explicitly
//! owned objects constructed once at process start and passed by handle to
//! every consumer.

pub mod message_log;
pub mod task_store;

pub use message_log::MessageLog;
pub use task_store::FsTaskStore;
