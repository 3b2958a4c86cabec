pub mod build;
pub mod plan;
pub mod theme;
