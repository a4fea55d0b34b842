//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - FLTK buffer utilities
//! - Platform integration (link opening, window raising)
//! - Error types

pub mod buffer;
pub mod error;
pub mod platform;
