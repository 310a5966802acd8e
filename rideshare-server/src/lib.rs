//! Ride-share route planner server.
//!
//! A web service that answers: "given these drivers and these passengers,
//! which passengers should each driver pick up, and in what order?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod oracle;
pub mod planner;
pub mod web;
