pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
