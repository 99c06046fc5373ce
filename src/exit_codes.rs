//! Exit codes used when a pipeline helper terminates the process

/// A shell command failed and the pipeline cannot continue
pub const EXIT_ERROR: i32 = 1;
