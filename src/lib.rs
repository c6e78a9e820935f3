//! Lesson Salary Engine
//!
//! This crate tracks per-lesson teacher obligations (absence marking,
//! feedbacks, voice and text messages), reports obligation compliance, and
//! generates monthly salary records with penalty deductions and an audit
//! trail.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod service;
pub mod store;
