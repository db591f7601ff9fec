//! Repositories over the document store
//!
//! Each method maps to exactly one storage call. No validation, no
//! cross-collection work.

pub mod food;
pub mod requests;

pub use food::FoodRepo;
pub use requests::RequestRepo;
