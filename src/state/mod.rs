//! Client-side UI state shared by the admin views.
//!
//! DESIGN
//! ======
//! Plain structs and a cloneable coordinator, no rendering. Front ends read
//! these to decide what to draw: spinners from `loading`, route changes
//! through `navigation`, and flash messages from `notice`.

pub mod loading;
pub mod navigation;
pub mod notice;
