//! Workout Buddy AI Service Library
//!
//! This library exposes the service modules for use in tests and the binary.

pub mod agent;
pub mod clients;
pub mod config;
pub mod db;
pub mod error;
pub mod reply;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod telemetry;
