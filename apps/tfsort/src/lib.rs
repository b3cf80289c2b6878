//! tfsort core library.
//!
//! This crate checks that Terraform/HCL documents declare their attributes,
//! nested blocks, object keys and top-level variables in a canonical order.
//! It only reports; files are never rewritten.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `models`: Elements, ordering policy, and lint output structs.
//! - `container`: Expected-order derivation and comparison for one container.
//! - `walk`: Extraction of containers from a parsed document.
//! - `lint`: File discovery and the run-wide verdict.
//! - `output`: Human/JSON printers.
//! - `error`: Fatal error type.
//! - `utils`: Supporting helpers.
pub mod cli;
pub mod config;
pub mod container;
pub mod error;
pub mod lint;
pub mod models;
pub mod output;
pub mod utils;
pub mod walk;

pub use error::{Error, Result};
