//! imgg - image adjustment server
//!
//! Accepts image uploads over HTTP, runs them through the `pixel-adjust`
//! pipeline and returns the adjusted image or its raw samples.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
