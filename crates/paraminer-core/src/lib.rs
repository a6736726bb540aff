pub mod config;
pub mod logging;

pub mod archive;
pub mod batch;
pub mod cancel;
pub mod fetch;
pub mod output;
pub mod retry;
pub mod url_model;
pub mod user_agent;
