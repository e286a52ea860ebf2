//! Traits related to remote license services
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    error::LicenseError,
    remote::types::{LicenseRequest, RemoteLicense},
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait RemoteLicenseService: Send + Sync {
    /// Fetch the license document for a repository, optionally at a pinned
    /// version. Returns [`LicenseError::NotFound`] when the repository or
    /// its license does not exist.
    async fn fetch(
        &self,
        req: LicenseRequest,
    ) -> Result<RemoteLicense, LicenseError>;
}
