pub mod api;
pub mod error;
pub mod lucky;
pub mod models;
pub mod reactive_resource;
pub mod resource_config;
pub mod resource_state;
pub mod routes;
pub mod source;
pub mod transport;

#[cfg(test)]
mod testing;
