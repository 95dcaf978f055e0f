//! Publishes study program module catalogues from a SQLite module database
//! into a templated Google spreadsheet, one sheet per program.

pub mod api;
pub mod auth;
pub mod catalogue;
pub mod config;
pub mod db;
pub mod publish;
