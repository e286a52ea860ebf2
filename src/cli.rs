//! CLI argument parsing.
use clap::Parser;
use secrecy::SecretString;
use std::{env, path::PathBuf};

use crate::{
    config::DEFAULT_CONFIG_FILE, dependency::variant::ConfigFileVariant,
};

/// Collect license documents for the GitHub dependencies of a project.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = ".")]
    /// Project directory containing the dependency files.
    pub project_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    /// Configuration file, relative to the project directory.
    pub config: PathBuf,

    #[arg(long)]
    /// Carthage file. Defaults to Cartfile.resolved.
    pub cartfile_path: Option<PathBuf>,

    #[arg(long)]
    /// Mint file. Defaults to Mintfile.
    pub mintfile_path: Option<PathBuf>,

    #[arg(long)]
    /// Manually maintained `owner/name version` list. Defaults to
    /// license_plist.txt.
    pub license_list_path: Option<PathBuf>,

    #[arg(long)]
    /// License cache directory. Overrides the configuration file.
    pub cache_dir: Option<PathBuf>,

    #[arg(long)]
    /// Number of licenses resolved concurrently. Overrides the
    /// configuration file.
    pub concurrency: Option<usize>,

    #[arg(long, default_value = "")]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    /// Path of the dependency file for a variant, relative to the project
    /// directory.
    pub fn input_path(&self, variant: ConfigFileVariant) -> PathBuf {
        let custom = match variant {
            ConfigFileVariant::Carthage => &self.cartfile_path,
            ConfigFileVariant::Mint => &self.mintfile_path,
            ConfigFileVariant::LicensePlist => &self.license_list_path,
        };

        custom
            .clone()
            .unwrap_or_else(|| PathBuf::from(variant.default_file_name()))
    }

    /// Resolve the GitHub token from arguments or environment.
    pub fn github_token(&self) -> Option<SecretString> {
        let mut token = self.github_token.clone();

        if token.is_empty()
            && let Ok(env_var_token) = env::var("GITHUB_TOKEN")
        {
            token = env_var_token;
        }

        if token.is_empty() {
            return None;
        }

        Some(SecretString::from(token))
    }
}
