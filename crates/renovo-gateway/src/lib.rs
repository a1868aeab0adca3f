// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Renovo change pipeline.
//!
//! Exposes the messaging webhook (inbound change requests, always answered
//! with a reply envelope), the task REST API, the message log listing, and
//! the completion callback that drives terminal task transitions.

pub mod handlers;
pub mod reply;
pub mod server;

pub use server::{GatewayState, ServerConfig, build_router, start_server};
