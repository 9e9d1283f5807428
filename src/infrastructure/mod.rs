//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without
//! containing business logic.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Wiring of pools, stores and services
//! - [`config`] - Configuration loading and validation
//! - [`security`] - Password hashing and bearer tokens

pub mod bootstrap;
pub mod config;
pub mod security;
