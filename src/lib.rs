pub mod app;
pub mod config;
pub mod domain;
pub mod emit;
pub mod error;
pub mod linker;
pub mod manifest;
pub mod output;
pub mod partition;
pub mod quality;
pub mod tracking;
