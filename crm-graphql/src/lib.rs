pub mod graphql;
pub mod server;
