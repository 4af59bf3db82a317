//! Configuration and wire models shared by the client and the panel

pub mod config;
pub mod models;
