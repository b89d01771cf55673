pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod fetcher;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod seed;
