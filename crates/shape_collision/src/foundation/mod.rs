//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Vector algebra shared by every collision test
//! - Logging utilities and the injectable log sink

pub mod math;
pub mod logging;
