//! pbrpack CLI library.
//!
//! Command implementations behind the `pbrpack` binary. Each command returns
//! an exit code and leaves error reporting to `main`.

pub mod commands;
