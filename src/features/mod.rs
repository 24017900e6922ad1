//! Feature extraction modules
//!
//! This module contains the per-frame feature pipeline:
//! - Frame segmentation
//! - Pitch estimation (autocorrelation + peak-lag search)
//! - Spectral and prosodic extractors
//! - Feature vector assembly

pub mod assembler;
pub mod extractor;
pub mod frame;
pub mod pitch;
pub mod prosodic;
pub mod spectral;
