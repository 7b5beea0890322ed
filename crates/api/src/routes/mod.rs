//! HTTP Routes

pub mod assets;
pub mod predictions;
pub mod profile;
