//! Image upload service: stores single image uploads in a public bucket

pub mod routes;
pub mod server;
pub mod storage;
pub mod types;
pub mod upload;
