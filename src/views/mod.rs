//! View-models for the generic admin pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page is one of three generic views configured per resource by
//! `catalog`: a searchable table (`list`), an edit form over a fetched
//! collection (`update`), and a create form (`add`). Views own their state
//! and talk to the server only through `ResourceApi`.

pub mod add;
pub mod list;
pub mod update;
