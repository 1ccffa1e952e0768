//! Core library for PIM: configuration, session persistence, and the
//! particles API gateway.

pub mod api;
pub mod config;
pub mod session;
