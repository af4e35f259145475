//! Admin-facing application services.

pub mod posts;
