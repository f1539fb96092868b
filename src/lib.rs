pub mod assign;
pub mod config;
pub mod embedding;
pub mod error;
pub mod pipeline;
pub mod project;
pub mod roster;
pub mod taxonomy;
pub mod team;
