//! FFI boundary (PyO3)
//!
//! The Python serving layer (routing, templates, deployment) consumes the
//! engine through this module. The boundary is minimal: parse feed rows
//! and thresholds in, hand typed report payloads out.

pub mod engine;
pub mod types;
