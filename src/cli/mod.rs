//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the pivnet
//! binary. Command execution lives in [`commands`].

pub mod commands;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::client::{ClientConfig, DEFAULT_HOST};
use crate::error::{PivnetError, Result};
use crate::output::OutputFormat;

/// Pivnet command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "pivnet",
    about = "Pivotal Network CLI",
    version,
    disable_version_flag = true
)]
pub struct Cli {
    /// API token (also read from PIVNET_API_TOKEN).
    #[arg(long, env = "PIVNET_API_TOKEN", hide_env_values = true, global = true)]
    pub api_token: Option<String>,

    /// API host, without the /api/v2 prefix.
    #[arg(long, env = "PIVNET_ENDPOINT", default_value = DEFAULT_HOST, global = true)]
    pub endpoint: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Log HTTP requests to stderr.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Accept invalid TLS certificates.
    #[arg(long, global = true)]
    pub skip_ssl_validation: bool,

    /// Print version.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Build the client configuration from the global flags.
    ///
    /// # Errors
    ///
    /// Returns [`PivnetError::ConfigMissing`] if no API token was given.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let token = self.api_token.clone().ok_or_else(|| {
            PivnetError::ConfigMissing(
                "--api-token or PIVNET_API_TOKEN environment variable not set".to_string(),
            )
        })?;

        Ok(ClientConfig::new(token)
            .with_host(self.endpoint.clone())
            .with_skip_ssl_validation(self.skip_ssl_validation))
    }
}

/// Hint to print after a client setup error, if one applies.
pub fn setup_hint(err: &PivnetError) -> Option<&'static str> {
    match err {
        PivnetError::ConfigMissing(_) => {
            Some("Pass --api-token or set PIVNET_API_TOKEN environment variable")
        }
        _ => None,
    }
}

/// Identifies a release by product slug and version.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ReleaseArgs {
    /// Product slug (e.g. pivotal-cf).
    #[arg(short = 'p', long = "product-slug")]
    pub product_slug: String,

    /// Release version (e.g. 1.7.2).
    #[arg(short = 'v', long = "release-version")]
    pub release_version: String,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all products.
    Products,

    /// Show a single product.
    Product {
        /// Product slug.
        #[arg(short = 's', long = "product-slug")]
        product_slug: String,
    },

    /// List the releases of a product.
    Releases {
        /// Product slug.
        #[arg(short = 'p', long = "product-slug")]
        product_slug: String,
    },

    /// Show a single release.
    Release(ReleaseArgs),

    /// Create a release.
    CreateRelease {
        #[command(flatten)]
        release: ReleaseArgs,

        /// Release type (see `release-types`).
        #[arg(short = 't', long = "release-type")]
        release_type: String,

        /// Slug of the EULA to attach.
        #[arg(short = 'e', long = "eula-slug")]
        eula_slug: String,

        /// Release date (YYYY-MM-DD).
        #[arg(long)]
        release_date: Option<String>,

        /// Release description.
        #[arg(long)]
        description: Option<String>,

        /// Release notes URL.
        #[arg(long)]
        release_notes_url: Option<String>,

        /// Mark the release as export controlled.
        #[arg(long)]
        controlled: bool,

        /// Export control classification number.
        #[arg(long)]
        eccn: Option<String>,

        /// License exception for controlled releases.
        #[arg(long)]
        license_exception: Option<String>,

        #[arg(long)]
        end_of_support_date: Option<String>,

        #[arg(long)]
        end_of_guidance_date: Option<String>,

        #[arg(long)]
        end_of_availability_date: Option<String>,

        /// Copy metadata from the previous release.
        #[arg(long)]
        copy_metadata: bool,
    },

    /// Delete a release.
    DeleteRelease(ReleaseArgs),

    /// List the accepted release types.
    ReleaseTypes,

    /// List all EULAs.
    Eulas,

    /// Show a single EULA.
    Eula {
        /// EULA slug.
        #[arg(short = 'e', long = "eula-slug")]
        eula_slug: String,
    },

    /// Accept the EULA of a release.
    AcceptEula(ReleaseArgs),

    /// List the dependencies of a release.
    ReleaseDependencies(ReleaseArgs),

    /// Add a dependency to a release.
    AddReleaseDependency {
        #[command(flatten)]
        release: ReleaseArgs,

        /// Slug of the product owning the dependent release.
        #[arg(short = 's', long = "dependent-product-slug")]
        dependent_product_slug: String,

        /// Version of the dependent release.
        #[arg(short = 'u', long = "dependent-release-version")]
        dependent_release_version: String,
    },

    /// Remove a dependency from a release.
    RemoveReleaseDependency {
        #[command(flatten)]
        release: ReleaseArgs,

        /// Slug of the product owning the dependent release.
        #[arg(short = 's', long = "dependent-product-slug")]
        dependent_product_slug: String,

        /// Version of the dependent release.
        #[arg(short = 'u', long = "dependent-release-version")]
        dependent_release_version: String,
    },

    /// List the releases that can be upgraded to a release.
    ReleaseUpgradePaths(ReleaseArgs),

    /// Allow upgrading to a release from an earlier release.
    AddReleaseUpgradePath {
        #[command(flatten)]
        release: ReleaseArgs,

        /// Version of the earlier release of the same product.
        #[arg(short = 'u', long = "previous-release-version")]
        previous_release_version: String,
    },

    /// Remove an upgrade path from a release.
    RemoveReleaseUpgradePath {
        #[command(flatten)]
        release: ReleaseArgs,

        /// Version of the earlier release of the same product.
        #[arg(short = 'u', long = "previous-release-version")]
        previous_release_version: String,
    },

    /// Verify the API token.
    CheckAuth,
}
