//! Mumbai journey planner server.
//!
//! Answers "how do I get from here to there by train, bus and a last
//! auto or cab ride, and what will it cost?" on top of a trip-planner
//! deployment, and serves the results over HTTP.

pub mod config;
pub mod domain;
pub mod fare;
pub mod otp;
pub mod planner;
pub mod polyline;
pub mod stations;
pub mod web;
