//! Request middleware.
//!
//! Purpose: cross-cutting request lifecycle concerns. The session gate is
//! HTTP-specific and lives in `inbound::http::auth_gate`.

pub mod trace;

pub use trace::{Trace, TraceId};
