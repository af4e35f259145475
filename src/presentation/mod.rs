//! View models and template rendering.

pub mod admin;
pub mod views;
