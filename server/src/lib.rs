pub mod config;
pub mod dto;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod unit_of_work;
pub mod utils;
pub mod validation;
