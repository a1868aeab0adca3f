// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Audio-transcription adapter trait for voice messages.

use async_trait::async_trait;

use crate::error::RenovoError;

/// Adapter for an external audio-transcription service.
///
/// Takes a media reference (URL from the messaging channel) and returns
/// plain text. On failure the caller substitutes a placeholder reply
/// rather than surfacing the error.
#[async_trait]
pub trait TranscriptionAdapter: Send + Sync + 'static {
    /// Downloads and transcribes the referenced audio media.
    async fn transcribe(&self, media_url: &str) -> Result<String, RenovoError>;
}
