pub mod browse;
pub mod clear;
pub mod config;
pub mod context;
pub mod display;
pub mod history;
pub mod prompts;
pub mod recommend;
pub mod spinner;
pub mod watchlist;
