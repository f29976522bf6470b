//! Location Ranker - Coffee shop location decision support.
//!
//! Ranks candidate locations with the Weight Point method (benefit/cost
//! normalization followed by a weighted sum) and optionally asks an AI
//! gateway for a narrative analysis of the result.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
