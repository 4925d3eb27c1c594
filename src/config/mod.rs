// src/config/mod.rs
pub mod scraper;
pub mod sentiment;
