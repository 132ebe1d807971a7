pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod input;
pub mod output;
pub mod soft;
pub mod sra;
