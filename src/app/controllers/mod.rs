//! Controllers layer - orchestration and coordination.
//!
//! Controllers sit between the domain model, the services and the UI:
//! - Document load / parse / save and tag selection

pub mod document;
