//! Futurecast - AI-Powered Future Timeline Simulation
//!
//! This crate implements the timeline generation core: turning a user's
//! life decision plus profile context into a validated, comparable set
//! of simulated future timelines.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
