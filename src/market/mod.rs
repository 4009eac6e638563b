pub mod error;
pub mod handler;
pub mod model;
pub mod provider;
pub mod routes;
pub mod service;
pub mod yahoo;
