use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Deserialize;

use crate::{dependency::record::DependencyRecord, error::LicenseError};

/// SPDX placeholder GitHub reports for licenses it cannot classify.
const NO_ASSERTION: &str = "NOASSERTION";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to fetch the license of a single repository.
pub struct LicenseRequest {
    pub owner: String,
    pub name: String,
    pub version: Option<String>,
}

impl From<&DependencyRecord> for LicenseRequest {
    fn from(record: &DependencyRecord) -> Self {
        Self {
            owner: record.owner.clone(),
            name: record.name.clone(),
            version: record.version.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Classification of a license as detected by the remote service.
pub struct LicenseKind {
    pub key: String,
    pub name: String,
    pub spdx_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// License document returned by a remote service.
pub struct RemoteLicense {
    pub body: String,
    pub kind: LicenseKind,
}

#[derive(Debug, Deserialize)]
pub struct LicenseKindResponse {
    pub key: String,
    pub name: String,
    pub spdx_id: Option<String>,
}

#[derive(Debug, Deserialize)]
/// Body of `GET /repos/{owner}/{repo}/license`.
pub struct LicenseContentResponse {
    pub content: String,
    pub encoding: String,
    pub license: LicenseKindResponse,
}

impl TryFrom<LicenseContentResponse> for RemoteLicense {
    type Error = LicenseError;

    fn try_from(resp: LicenseContentResponse) -> Result<Self, Self::Error> {
        let body = decode_content(&resp.content, &resp.encoding)?;

        let spdx_id = resp
            .license
            .spdx_id
            .filter(|id| !id.is_empty() && id != NO_ASSERTION);

        Ok(Self {
            body,
            kind: LicenseKind {
                key: resp.license.key,
                name: resp.license.name,
                spdx_id,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct RepositoryOwnerResponse {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct ParentRepositoryResponse {
    pub name: String,
    pub owner: RepositoryOwnerResponse,
}

#[derive(Debug, Deserialize)]
/// Subset of `GET /repos/{owner}/{repo}` needed to follow forks.
pub struct RepositoryResponse {
    #[serde(default)]
    pub fork: bool,
    pub parent: Option<ParentRepositoryResponse>,
}

/// Decodes API file content. GitHub wraps base64 output at 60 columns, so
/// whitespace is stripped before decoding.
pub(crate) fn decode_content(
    content: &str,
    encoding: &str,
) -> Result<String, LicenseError> {
    match encoding {
        "base64" => {
            let compact = content
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>();
            let bytes = STANDARD.decode(compact)?;
            Ok(String::from_utf8(bytes)?)
        }
        "" | "utf-8" => Ok(content.to_string()),
        other => Err(LicenseError::Decode(format!(
            "unsupported content encoding: {other}"
        ))),
    }
}
