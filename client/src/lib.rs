//! SkinGlow Client Library
//!
//! Persisted client state (profile, latest analysis, score history,
//! reminders) and the HTTP client for the remote analysis service.

pub mod api;
pub mod config;
pub mod error;
pub mod repositories;
pub mod services;
pub mod state;
pub mod storage;
