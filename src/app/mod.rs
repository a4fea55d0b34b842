//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (XmlDocument, Settings, Messages)
//! - `controllers/` - Orchestration (DocumentController)
//! - `services/` - Widget-free operations (file_io, formatter, outline, markers)
//! - `infrastructure/` - External integrations (FLTK buffer, platform, error)
//! - `config.rs` - Command-line arguments and the resolved AppContext
//! - `state.rs` - Main application coordinator

pub mod config;
pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use config::{AppContext, Args};
pub use controllers::document::{DocumentController, ParsedView};
pub use domain::{AppSettings, FontChoice, Message, ThemeMode, XmlDocument};
pub use infrastructure::error::{AppError, Result};
