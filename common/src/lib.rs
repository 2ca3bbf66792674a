//! Shared types and the client-side controller for the forum task widget.
//!
//! - `model`: mount context, snapshots and submission records.
//! - `requests`: request/response bodies exchanged with the widget handlers.
//! - `link`: the allow-list gate applied to submitted links.
//! - `controller`: the render/act/sync workflow, generic over the transport.

pub mod controller;
pub mod link;
pub mod model;
pub mod requests;
