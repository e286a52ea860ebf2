//! Remote license lookup against source-hosting APIs.

/// GitHub REST API implementation of the license service.
pub mod github;

/// Common trait for remote license services.
pub mod traits;

/// Request and response types shared by license services.
pub mod types;

pub use traits::RemoteLicenseService;
#[cfg(test)]
pub use traits::MockRemoteLicenseService;
pub use types::{LicenseKind, LicenseRequest, RemoteLicense};
