pub mod application;
pub mod config;
pub mod embed_url_resolver;
