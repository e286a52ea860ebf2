use regex::Regex;
use std::{fmt, sync::LazyLock};

/// Characters allowed in an owner, repository name, or version token.
const TOKEN: &str = r"[\w.\-]+";

static CARTHAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile(ConfigFileVariant::Carthage, false));
static CARTHAGE_VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile(ConfigFileVariant::Carthage, true));
static MINT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile(ConfigFileVariant::Mint, false));
static MINT_VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile(ConfigFileVariant::Mint, true));
static LICENSE_PLIST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile(ConfigFileVariant::LicensePlist, false));
static LICENSE_PLIST_VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile(ConfigFileVariant::LicensePlist, true));

/// Dependency declaration syntax used by a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFileVariant {
    /// `github "owner/name" "version"` lines from a Cartfile.
    Carthage,
    /// `owner/name@version` lines from a Mintfile.
    Mint,
    /// `owner/name version` lines from a manually maintained list.
    LicensePlist,
}

impl ConfigFileVariant {
    pub const ALL: [ConfigFileVariant; 3] = [
        ConfigFileVariant::Carthage,
        ConfigFileVariant::Mint,
        ConfigFileVariant::LicensePlist,
    ];

    /// Returns the precompiled extraction pattern. Capture groups are, in
    /// order, owner, name and (only when `include_version`) version.
    pub fn pattern(&self, include_version: bool) -> &'static Regex {
        match (self, include_version) {
            (ConfigFileVariant::Carthage, false) => &CARTHAGE_REGEX,
            (ConfigFileVariant::Carthage, true) => &CARTHAGE_VERSION_REGEX,
            (ConfigFileVariant::Mint, false) => &MINT_REGEX,
            (ConfigFileVariant::Mint, true) => &MINT_VERSION_REGEX,
            (ConfigFileVariant::LicensePlist, false) => &LICENSE_PLIST_REGEX,
            (ConfigFileVariant::LicensePlist, true) => {
                &LICENSE_PLIST_VERSION_REGEX
            }
        }
    }

    /// Number of capture groups (excluding the whole match) a pattern
    /// must produce.
    pub fn expected_groups(include_version: bool) -> usize {
        if include_version { 3 } else { 2 }
    }

    /// File name looked up in the project directory for this variant.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            ConfigFileVariant::Carthage => "Cartfile.resolved",
            ConfigFileVariant::Mint => "Mintfile",
            ConfigFileVariant::LicensePlist => "license_plist.txt",
        }
    }

    fn pattern_source(&self, include_version: bool) -> String {
        match self {
            ConfigFileVariant::Carthage => {
                let mut source = format!(r#"github "({TOKEN})/({TOKEN})""#);
                if include_version {
                    source.push_str(&format!(r#" "({TOKEN})""#));
                }
                source
            }
            ConfigFileVariant::Mint => {
                let mut source = format!("({TOKEN})/({TOKEN})");
                if include_version {
                    source.push_str(&format!("@({TOKEN})"));
                }
                source
            }
            ConfigFileVariant::LicensePlist => {
                let mut source = format!("({TOKEN})/({TOKEN})");
                if include_version {
                    source.push_str(&format!(" ({TOKEN})"));
                }
                source
            }
        }
    }
}

impl fmt::Display for ConfigFileVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigFileVariant::Carthage => "carthage",
            ConfigFileVariant::Mint => "mint",
            ConfigFileVariant::LicensePlist => "license-plist",
        };
        write!(f, "{name}")
    }
}

fn compile(variant: ConfigFileVariant, include_version: bool) -> Regex {
    Regex::new(&variant.pattern_source(include_version)).unwrap()
}
