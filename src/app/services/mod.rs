//! Services layer - business operations and utilities.
//!
//! This module contains the widget-free operations:
//! - File bootstrap, load and save
//! - Pretty-printing
//! - Tree outline flattening
//! - Marker and link scanning

pub mod file_io;
pub mod formatter;
pub mod markers;
pub mod outline;
pub mod text_ops;
