//! Packaging pipeline helpers
//!
//! Small building blocks for packaging scripts: running shell commands
//! where failure is fatal, picking the prebuilt artifact variant for the
//! host, and checking that a packaging step produced its expected outputs.

#![deny(
    // Safety
    unsafe_code,

    // Correctness
    missing_debug_implementations,
    unreachable_pub,

    // Future compatibility
    future_incompatible,

    // Rust 2018 idioms
    rust_2018_idioms,

    // All warnings must be fixed
    warnings,
)]
#![warn(
    // Documentation
    missing_docs,

    // Error handling best practices
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::unimplemented,
    clippy::todo,

    // Best practices
    clippy::wildcard_imports,
    clippy::enum_glob_use,
    clippy::if_not_else,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
)]

pub mod command;
pub mod exceptions;
pub mod exit_codes;
pub mod logger;
pub mod platform;
pub mod utils;
pub mod validation;

pub use command::{CommandOutput, run_command, run_command_or_exit};
pub use exceptions::{CommandError, PackagingError, Result, ValidationError};
pub use platform::{Arch, Platform, detect_platform_and_arch};
pub use validation::{validate_files_present, validate_files_present_to};
