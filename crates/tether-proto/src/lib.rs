//! Typed layer over a JSON control protocol.
//!
//! A remote process speaks a method-plus-parameters protocol:
//! `"Domain.name"` strings select an operation, parameter objects go
//! out, result objects and events come back, all correlated by a
//! session id. This crate maps those method names to strongly-typed
//! request/response pairs and dispatches them through a transport
//! capability the caller supplies.
//!
//! The transport itself (connections, request/response correlation,
//! event delivery) lives outside this crate, behind [`call::Client`].
//! This crate never retries, never caches, and performs exactly one
//! transport invocation per call.
//!
//! # Modules
//!
//! - [`call`]: the dispatcher and the transport/caller capabilities
//! - [`command`]: command/event traits, normalization, event registry
//! - [`input`]: mouse and touch dispatch commands
//! - [`page`]: navigation commands and lifecycle events
//! - [`dom`]: element geometry queries
//! - [`fetch`]: request interception patterns

pub mod call;
pub mod command;
pub mod dom;
pub mod fetch;
pub mod input;
pub mod page;
