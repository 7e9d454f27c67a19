//! GitHub REST client for starred repositories and their releases
//!
//! - Wire models in `models`
//! - Paged starred listing and releases listing in `index`

pub mod index;
pub mod models;
