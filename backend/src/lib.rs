//! # Dog API
//!
//! A small REST service for managing dog records.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain types (`Dog`, `NewDog`, `DogChanges`)
//! - [`services`]: Request body validation against the dog schema
//! - [`db`]: Repository pattern, storage backends and the service layer
//! - [`config`]: Server configuration read from the environment
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
