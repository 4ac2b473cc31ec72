//! `mediaplan` — attachment presentation resolver for omnichannel inboxes.
//!
//! This crate provides the core library for turning attachment descriptors
//! delivered by a messaging backend into UI-agnostic render plans, plus
//! batch tooling for NDJSON descriptor dumps.

pub mod batch;
pub mod config;
pub mod error;
pub mod i18n;
pub mod model;
pub mod resolver;
