//! Compass - Confidence-Driven Adaptive Assessment Engine
//!
//! This crate decides, turn by turn, whether a career assessment has gathered
//! enough evidence about a respondent's RIASEC personality axes, motivators
//! and interests to stop, needs a targeted clarification, or should keep
//! asking. Once it stops it synthesizes the final profile.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
