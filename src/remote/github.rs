//! Implements the RemoteLicenseService trait for GitHub
use async_trait::async_trait;
use log::*;
use octocrab::Octocrab;
use reqwest::StatusCode;
use secrecy::SecretString;
use serde::de::DeserializeOwned;

use crate::{
    error::LicenseError,
    remote::{
        traits::RemoteLicenseService,
        types::{
            LicenseContentResponse, LicenseRequest, RemoteLicense,
            RepositoryResponse,
        },
    },
};

/// Default GitHub REST API base URL.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Connection settings for the GitHub API.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// API base URL (e.g., "https://api.github.com").
    pub base_uri: String,
    /// Optional personal access token. Anonymous requests are heavily rate
    /// limited.
    pub token: Option<SecretString>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            base_uri: DEFAULT_GITHUB_API_URL.into(),
            token: None,
        }
    }
}

/// GitHub license service using Octocrab for API interactions.
pub struct GithubLicenseService {
    base_uri: String,
    instance: Octocrab,
}

impl GithubLicenseService {
    /// Create GitHub client with optional personal access token
    /// authentication and API base URL configuration.
    pub fn new(config: GithubConfig) -> Result<Self, LicenseError> {
        let base_uri = config.base_uri.trim_end_matches('/').to_string();

        let mut builder = Octocrab::builder().base_uri(base_uri.clone())?;

        if let Some(token) = config.token {
            builder = builder.personal_token(token);
        }

        let instance = builder.build()?;

        Ok(Self { base_uri, instance })
    }

    /// GET an API endpoint, mapping 404 responses to `Ok(None)`.
    async fn get_optional<R: DeserializeOwned + Send + 'static>(
        &self,
        endpoint: String,
    ) -> Result<Option<R>, LicenseError> {
        let result: octocrab::Result<R> =
            self.instance.get(&endpoint, None::<&()>).await;

        match result {
            Err(octocrab::Error::GitHub { source, .. })
                if source.status_code == StatusCode::NOT_FOUND =>
            {
                debug!("not found: {endpoint}");
                Ok(None)
            }
            Err(err) => {
                debug!("request failed for {endpoint}: {err}");
                Err(err.into())
            }
            Ok(resp) => Ok(Some(resp)),
        }
    }

    async fn get_license(
        &self,
        owner: &str,
        name: &str,
        git_ref: Option<&str>,
    ) -> Result<Option<RemoteLicense>, LicenseError> {
        let mut endpoint =
            format!("{}/repos/{}/{}/license", self.base_uri, owner, name);

        if let Some(git_ref) = git_ref {
            endpoint = format!("{endpoint}?ref={git_ref}");
        }

        let resp: Option<LicenseContentResponse> =
            self.get_optional(endpoint).await?;

        resp.map(RemoteLicense::try_from).transpose()
    }

    /// Returns the (owner, name) of the upstream repository when `owner/name`
    /// is a fork.
    async fn get_fork_parent(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<(String, String)>, LicenseError> {
        let endpoint = format!("{}/repos/{}/{}", self.base_uri, owner, name);

        let repo: Option<RepositoryResponse> =
            self.get_optional(endpoint).await?;

        Ok(repo
            .filter(|r| r.fork)
            .and_then(|r| r.parent)
            .map(|p| (p.owner.login, p.name)))
    }
}

#[async_trait]
impl RemoteLicenseService for GithubLicenseService {
    async fn fetch(
        &self,
        req: LicenseRequest,
    ) -> Result<RemoteLicense, LicenseError> {
        let LicenseRequest {
            owner,
            name,
            version,
        } = req;

        if let Some(version) = version.as_deref() {
            if let Some(license) =
                self.get_license(&owner, &name, Some(version)).await?
            {
                return Ok(license);
            }
            info!(
                "no license for {owner}/{name} at {version}: trying default branch"
            );
        }

        if let Some(license) = self.get_license(&owner, &name, None).await? {
            return Ok(license);
        }

        if let Some((parent_owner, parent_name)) =
            self.get_fork_parent(&owner, &name).await?
        {
            info!(
                "{owner}/{name} is a fork: trying {parent_owner}/{parent_name}"
            );
            if let Some(license) =
                self.get_license(&parent_owner, &parent_name, None).await?
            {
                return Ok(license);
            }
        }

        Err(LicenseError::not_found(owner, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_anonymous_client() {
        let service = GithubLicenseService::new(GithubConfig::default());
        assert!(service.is_ok());
    }

    #[tokio::test]
    async fn trims_trailing_slash_from_base_uri() {
        let service = GithubLicenseService::new(GithubConfig {
            base_uri: "https://github.example.com/api/v3/".into(),
            token: Some(SecretString::from("token".to_string())),
        })
        .unwrap();

        assert_eq!(service.base_uri, "https://github.example.com/api/v3");
    }
}
