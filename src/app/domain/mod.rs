//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - The XML document tree and its parser
//! - Application settings
//! - Message types for the event system

pub mod messages;
pub mod settings;
pub mod xml;

pub use messages::Message;
pub use settings::{AppSettings, FontChoice, ThemeMode};
pub use xml::{Element, Node, XmlDocument};
