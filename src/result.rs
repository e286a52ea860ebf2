//! Error handling and result types for licensaurus.
//!
//! Application-level code (CLI, configuration loading, file loading) returns
//! the `Result<T>` defined here, which is backed by `color-eyre` for
//! colorized reports and chainable context. Failures that belong to a single
//! dependency never travel through this type: they are recorded per
//! dependency as a [`LicenseOutcome::Failed`](crate::resolver::LicenseOutcome)
//! so one bad repository never aborts a run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use color_eyre::eyre::WrapErr;
//! use crate::result::Result;
//!
//! fn read_cartfile(path: &str) -> Result<String> {
//!     let content = std::fs::read_to_string(path)
//!         .wrap_err_with(|| format!("failed to read {path}"))?;
//!     Ok(content)
//! }
//! ```

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used throughout licensaurus.
pub type Result<T> = EyreResult<T>;
