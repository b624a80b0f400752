pub mod data_sources;
pub mod handlers;
pub mod resources;
pub mod routes;
pub mod types;

pub use routes::create_router;
