//! Nutrak Library
//!
//! This module exposes the tracker components for testing purposes.

pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod routes;
pub mod services;
pub mod tracker;
