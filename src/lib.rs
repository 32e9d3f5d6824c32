pub mod app;
pub mod assembly_report;
pub mod cli;
pub mod config;
pub mod domain;
pub mod download;
pub mod error;
pub mod listing;
pub mod output;
pub mod records;
pub mod taxonomy;
pub mod transport;
