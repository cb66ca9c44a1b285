pub mod config;
pub mod dashboard;
pub mod fetcher;
pub mod mock_data;
pub mod models;
pub mod service;
pub mod shell;
pub mod state;
pub mod ui;
