//! HTTP handlers for registro CRUD and the rendered list page.

pub mod page;
pub mod registro;
pub use page::index;
