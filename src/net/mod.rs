//! Networking modules for the catalog REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` is the single boundary to the network, `fetch` layers retry
//! and response sniffing over it, and `api` maps resources to endpoints.
//! Nothing outside this module talks HTTP directly.

pub mod api;
pub mod fetch;
pub mod transport;
