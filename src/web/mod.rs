pub mod handlers;
pub mod routes;
pub mod server;
pub mod session;

pub use server::{create_app, start_server};
