//! Bloglist - a multi-user blog catalog service
//!
//! This library provides the core functionality for the blog catalog:
//! the entity model and its validators, credential management, blog and
//! user services with ownership rules, aggregate statistics, and the HTTP
//! boundary that maps typed failures to responses.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
