//! Flashgen Server Library
//!
//! This module exposes the server components for testing purposes.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod services;
pub mod validation;
