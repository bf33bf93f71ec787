//! Reply Coach - Personality-aware reply coaching
//!
//! This crate turns an incoming message and an instinctive reply into tone
//! analysis and better reply options, tailored to both participants'
//! personality profiles and backed by a hosted language model.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
