//! # cinedesk
//!
//! Headless admin client for the movie catalog REST API.
//!
//! This crate contains the transport boundary, the retrying fetch client,
//! record/field-path access, the resource catalog, the loading coordinator,
//! and the list/update/add view-models that admin front ends render. The
//! `cli` crate drives these against a live server.

pub mod catalog;
pub mod config;
pub mod error;
pub mod fields;
pub mod net;
pub mod record;
pub mod state;
pub mod views;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use error::AdminError;
