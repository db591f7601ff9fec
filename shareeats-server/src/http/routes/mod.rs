//! Route handlers organized by resource

pub mod food;
pub mod health;
pub mod requests;
