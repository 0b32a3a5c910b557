//! Rendering of joint tables and significance results.

pub mod json;
pub mod terminal;
