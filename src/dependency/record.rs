use std::{
    fmt,
    hash::{Hash, Hasher},
    path::PathBuf,
};

use crate::{cache::CacheLookupResult, dependency::variant::ConfigFileVariant};

/// Raw content of one discovered configuration file plus the context needed
/// to resolve licenses for the dependencies it declares.
#[derive(Debug, Clone)]
pub struct ConfigFileInput {
    pub variant: ConfigFileVariant,
    pub content: Option<String>,
    /// Directory whose subdirectories hold previously downloaded licenses,
    /// keyed by dependency name.
    pub cache_root: Option<PathBuf>,
}

impl ConfigFileInput {
    pub fn new(variant: ConfigFileVariant, content: Option<String>) -> Self {
        Self {
            variant,
            content,
            cache_root: None,
        }
    }

    pub fn carthage(content: Option<String>) -> Self {
        Self::new(ConfigFileVariant::Carthage, content)
    }

    pub fn mint(content: Option<String>) -> Self {
        Self::new(ConfigFileVariant::Mint, content)
    }

    pub fn license_plist(content: Option<String>) -> Self {
        Self::new(ConfigFileVariant::LicensePlist, content)
    }

    pub fn with_cache_root(mut self, cache_root: Option<PathBuf>) -> Self {
        self.cache_root = cache_root;
        self
    }
}

// cache_root is resolution context, not part of the file's identity
impl PartialEq for ConfigFileInput {
    fn eq(&self, other: &Self) -> bool {
        self.variant == other.variant && self.content == other.content
    }
}

impl Eq for ConfigFileInput {}

/// A single GitHub dependency declaration extracted from a configuration
/// file.
#[derive(Debug, Clone)]
pub struct DependencyRecord {
    /// Repository name.
    pub name: String,
    /// Preferred name for reports, taken from the caller's rename map.
    pub display_name: Option<String>,
    /// Repository owner.
    pub owner: String,
    /// Normalized version pin.
    pub version: Option<String>,
    /// Outcome of the local cache lookup performed during extraction.
    pub cached_license: CacheLookupResult,
}

impl DependencyRecord {
    pub fn new(
        name: impl Into<String>,
        display_name: Option<String>,
        owner: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name,
            owner: owner.into(),
            version,
            cached_license: CacheLookupResult::NotConfigured,
        }
    }

    pub fn with_cached_license(mut self, cached: CacheLookupResult) -> Self {
        self.cached_license = cached;
        self
    }

    /// Name to show in reports.
    pub fn preferred_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

// cached_license is a resolution artifact and excluded from identity
impl PartialEq for DependencyRecord {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.display_name == other.display_name
            && self.owner == other.owner
            && self.version == other.version
    }
}

impl Eq for DependencyRecord {}

impl Hash for DependencyRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.display_name.hash(state);
        self.owner.hash(state);
        self.version.hash(state);
    }
}

impl fmt::Display for DependencyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name: {}, display_name: {}, owner: {}, version: {}",
            self.name,
            self.display_name.as_deref().unwrap_or(""),
            self.owner,
            self.version.as_deref().unwrap_or("")
        )
    }
}
