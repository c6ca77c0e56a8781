//! covcompare - statistical comparison of two test-generation tools
//!
//! Loads per-run coverage, AUC and fault artifacts for a baseline and an
//! enhanced tool, compares branch discovery and consistency, tests the AUC
//! metrics with one-sided Mann-Whitney U tests and Vargha-Delaney A12, and
//! writes a markdown report.

pub mod analysis;
pub mod artifacts;
pub mod cli;
pub mod config;
pub mod coverage;
pub mod report;
pub mod stats;
