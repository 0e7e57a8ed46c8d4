//! API module - HTTP routes, handlers, models and response envelopes

pub mod envelope;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod text_handlers;
