//! # Travel Agency Server
//!
//! The web application: startup configuration, the access policy and the pages it guards.

pub mod handlers;
pub mod security_config;
pub mod settings;
