//! Command execution for licensaurus.
//!
//! A run follows four steps:
//!
//! 1. **Configuration**: Load `licensaurus.toml` and merge CLI overrides
//! 2. **Loading**: Read each known dependency file from the project directory
//! 3. **Resolution**: Extract dependencies and resolve their licenses from
//!    the cache or GitHub
//! 4. **Reporting**: Log the outcome for every dependency and a summary
//!
//! A dependency whose license cannot be resolved is reported individually
//! and never aborts the run.

use color_eyre::eyre::WrapErr;
use log::*;
use std::{path::PathBuf, sync::Arc};

use crate::{
    Result,
    cli::Args,
    config::Config,
    dependency::{record::ConfigFileInput, variant::ConfigFileVariant},
    file_loader::{FileLoader, LocalFileLoader},
    remote::github::{GithubConfig, GithubLicenseService},
    resolver::{
        LicenseOutcome, LicenseResolver, ResolutionSummary, ResolvedLibrary,
    },
};

/// Settings for a single run after merging CLI arguments over the
/// configuration file.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub config: Config,
    pub cache_root: Option<PathBuf>,
    pub concurrency: usize,
}

impl RunSettings {
    pub fn resolve(args: &Args, config: Config) -> Self {
        // cache_dir from the configuration file is relative to the project
        let cache_root = args.cache_dir.clone().or_else(|| {
            config
                .cache_dir
                .as_ref()
                .map(|dir| args.project_dir.join(dir))
        });

        let concurrency = args.concurrency.unwrap_or(config.concurrency);

        Self {
            config,
            cache_root,
            concurrency,
        }
    }
}

/// Execute a full license collection run.
pub async fn execute(args: &Args) -> Result<Vec<ResolvedLibrary>> {
    let loader = LocalFileLoader::new(&args.project_dir);

    let config = load_config(&loader, args).await?;
    let settings = RunSettings::resolve(args, config);

    if let Some(root) = settings.cache_root.as_ref() {
        info!(
            "using Carthage license cache at {}: no remote lookups on misses",
            root.display()
        );
    }

    let inputs =
        load_inputs(&loader, args, settings.cache_root.clone()).await?;

    if inputs.iter().all(|input| input.content.is_none()) {
        warn!(
            "no dependency files found in {}",
            args.project_dir.display()
        );
    }

    let service = GithubLicenseService::new(GithubConfig {
        base_uri: settings.config.github_api_url.clone(),
        token: args.github_token(),
    })
    .wrap_err("failed to create GitHub client")?;

    let resolver = LicenseResolver::new(Arc::new(service));

    let libraries = resolver
        .collect(&inputs, &settings.config.renames, settings.concurrency)
        .await;

    report(&libraries);

    Ok(libraries)
}

/// Load the configuration file, falling back to defaults when absent.
pub async fn load_config(
    loader: &dyn FileLoader,
    args: &Args,
) -> Result<Config> {
    match loader.load_file(&args.config).await? {
        Some(content) => Config::from_toml(&content).wrap_err_with(|| {
            format!("failed to parse {}", args.config.display())
        }),
        None => {
            info!("no configuration found: using default");
            Ok(Config::default())
        }
    }
}

/// Load one input per supported variant. Missing files produce inputs with
/// no content.
pub async fn load_inputs(
    loader: &dyn FileLoader,
    args: &Args,
    cache_root: Option<PathBuf>,
) -> Result<Vec<ConfigFileInput>> {
    let mut inputs = vec![];

    for variant in ConfigFileVariant::ALL {
        let path = args.input_path(variant);
        let content = loader
            .load_file(&path)
            .await
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;

        if content.is_some() {
            debug!("loaded {variant} dependencies from {}", path.display());
        }

        // the cache mirrors Carthage checkouts; other variants go remote
        let input_cache_root = match variant {
            ConfigFileVariant::Carthage => cache_root.clone(),
            _ => None,
        };

        inputs.push(
            ConfigFileInput::new(variant, content)
                .with_cache_root(input_cache_root),
        );
    }

    Ok(inputs)
}

fn report(libraries: &[ResolvedLibrary]) {
    for library in libraries {
        let name = library.record.preferred_name();
        match &library.outcome {
            LicenseOutcome::FromCache { .. } => {
                info!("{name}: license read from cache")
            }
            LicenseOutcome::FromRemote { kind, .. } => info!(
                "{name}: {}",
                kind.spdx_id.as_deref().unwrap_or(&kind.name)
            ),
            LicenseOutcome::Failed(reason) => warn!("{name}: {reason}"),
        }
    }

    info!("{}", ResolutionSummary::from_libraries(libraries));
}
