//! Core use-case services and UI-facing form state.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep UI-facing layers decoupled from storage details.

pub mod item_form;
pub mod item_service;
