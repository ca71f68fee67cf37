//! Rapha - Onboarding intake and devotional persistence
//!
//! This crate validates the onboarding questionnaire, keeps user profiles and
//! stores one devotional per user per day in a remote record store.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
