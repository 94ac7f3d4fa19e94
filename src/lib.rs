//! Huddle backend library.
//!
//! CRUD backend for the huddle task-management product: email invitations
//! with signed tokens, per-user tasks with a start/stop timer, workroom
//! membership, and feedback responses.
//!
//! This module exports the core components for testing and integration.

pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod http;
pub mod mail;
pub mod types;
