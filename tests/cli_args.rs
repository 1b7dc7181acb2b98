//! CLI argument parsing tests.

use std::ffi::OsStr;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use pivnet::cli::{setup_hint, Cli, Command, ReleaseArgs};
use pivnet::{OutputFormat, PivnetClient, PivnetError, DEFAULT_HOST};

#[test]
fn test_cli_parses_products_subcommand() {
    let cli = Cli::parse_from(["pivnet", "products"]);

    assert_eq!(cli.format, OutputFormat::Table);
    assert!(!cli.verbose);
    assert!(matches!(cli.command, Command::Products));
}

#[test]
fn test_cli_parses_release_with_short_flags() {
    let cli = Cli::parse_from(["pivnet", "release", "-p", "pivotal-cf", "-v", "1.7.2"]);

    match cli.command {
        Command::Release(args) => {
            assert_eq!(
                args,
                ReleaseArgs {
                    product_slug: "pivotal-cf".to_string(),
                    release_version: "1.7.2".to_string(),
                }
            );
        }
        _ => panic!("Expected Release command"),
    }
}

#[test]
fn test_cli_parses_release_with_long_flags() {
    let cli = Cli::parse_from([
        "pivnet",
        "release-dependencies",
        "--product-slug",
        "pivotal-cf",
        "--release-version",
        "1.7.2",
    ]);

    match cli.command {
        Command::ReleaseDependencies(args) => {
            assert_eq!(args.product_slug, "pivotal-cf");
            assert_eq!(args.release_version, "1.7.2");
        }
        _ => panic!("Expected ReleaseDependencies command"),
    }
}

#[test]
fn test_cli_parses_create_release() {
    let cli = Cli::parse_from([
        "pivnet",
        "create-release",
        "-p",
        "my-product",
        "-v",
        "2.0.0",
        "-t",
        "Major Release",
        "-e",
        "pivotal_software_eula",
        "--release-date",
        "2016-06-01",
    ]);

    match cli.command {
        Command::CreateRelease {
            release,
            release_type,
            eula_slug,
            release_date,
            description,
            ..
        } => {
            assert_eq!(release.product_slug, "my-product");
            assert_eq!(release.release_version, "2.0.0");
            assert_eq!(release_type, "Major Release");
            assert_eq!(eula_slug, "pivotal_software_eula");
            assert_eq!(release_date.as_deref(), Some("2016-06-01"));
            assert!(description.is_none());
        }
        _ => panic!("Expected CreateRelease command"),
    }
}

#[test]
fn test_cli_parses_create_release_export_flags() {
    let cli = Cli::parse_from([
        "pivnet",
        "create-release",
        "-p",
        "my-product",
        "-v",
        "2.0.0",
        "-t",
        "Major Release",
        "-e",
        "pivotal_software_eula",
        "--controlled",
        "--eccn",
        "5D002",
        "--license-exception",
        "ENC",
        "--end-of-support-date",
        "2018-01-01",
        "--copy-metadata",
    ]);

    match cli.command {
        Command::CreateRelease {
            controlled,
            eccn,
            license_exception,
            end_of_support_date,
            end_of_guidance_date,
            copy_metadata,
            ..
        } => {
            assert!(controlled);
            assert_eq!(eccn.as_deref(), Some("5D002"));
            assert_eq!(license_exception.as_deref(), Some("ENC"));
            assert_eq!(end_of_support_date.as_deref(), Some("2018-01-01"));
            assert!(end_of_guidance_date.is_none());
            assert!(copy_metadata);
        }
        _ => panic!("Expected CreateRelease command"),
    }
}

#[test]
fn test_cli_parses_add_release_dependency() {
    let cli = Cli::parse_from([
        "pivnet",
        "add-release-dependency",
        "-p",
        "my-product",
        "-v",
        "1.1.0",
        "-s",
        "other-product",
        "-u",
        "2.0.0",
    ]);

    match cli.command {
        Command::AddReleaseDependency {
            release,
            dependent_product_slug,
            dependent_release_version,
        } => {
            assert_eq!(release.product_slug, "my-product");
            assert_eq!(release.release_version, "1.1.0");
            assert_eq!(dependent_product_slug, "other-product");
            assert_eq!(dependent_release_version, "2.0.0");
        }
        _ => panic!("Expected AddReleaseDependency command"),
    }
}

#[test]
fn test_cli_parses_remove_release_upgrade_path() {
    let cli = Cli::parse_from([
        "pivnet",
        "remove-release-upgrade-path",
        "-p",
        "my-product",
        "-v",
        "1.1.0",
        "-u",
        "1.0.0",
    ]);

    match cli.command {
        Command::RemoveReleaseUpgradePath {
            release,
            previous_release_version,
        } => {
            assert_eq!(release.release_version, "1.1.0");
            assert_eq!(previous_release_version, "1.0.0");
        }
        _ => panic!("Expected RemoveReleaseUpgradePath command"),
    }
}

#[test]
fn test_cli_global_flags_after_subcommand() {
    let cli = Cli::parse_from([
        "pivnet",
        "eulas",
        "--format",
        "json",
        "--verbose",
        "--api-token",
        "abc",
        "--endpoint",
        "https://example.com",
    ]);

    assert_eq!(cli.format, OutputFormat::Json);
    assert!(cli.verbose);
    assert_eq!(cli.api_token.as_deref(), Some("abc"));
    assert_eq!(cli.endpoint, "https://example.com");
    assert!(matches!(cli.command, Command::Eulas));
}

#[test]
fn test_cli_yaml_format() {
    let cli = Cli::parse_from(["pivnet", "--format", "yaml", "release-types"]);
    assert_eq!(cli.format, OutputFormat::Yaml);
    assert!(matches!(cli.command, Command::ReleaseTypes));
}

#[test]
fn test_cli_rejects_unknown_format() {
    let result = Cli::try_parse_from(["pivnet", "--format", "xml", "products"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_requires_release_version() {
    let result = Cli::try_parse_from(["pivnet", "release", "-p", "pivotal-cf"]);

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_cli_requires_subcommand() {
    let result = Cli::try_parse_from(["pivnet"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_short_v_prints_version_at_top_level() {
    let err = Cli::try_parse_from(["pivnet", "-v"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
}

#[test]
fn test_cli_client_config_uses_flags() {
    let cli = Cli::parse_from([
        "pivnet",
        "check-auth",
        "--api-token",
        "secret",
        "--skip-ssl-validation",
    ]);

    let config = cli.client_config().expect("token was given");
    assert_eq!(config.token, "secret");
    assert_eq!(config.host, cli.endpoint);
    assert!(config.skip_ssl_validation);
}

#[test]
fn test_cli_endpoint_defaults_to_public_host() {
    // Read the declared default so a PIVNET_ENDPOINT in the environment
    // cannot mask it.
    let command = Cli::command();
    let endpoint = command
        .get_arguments()
        .find(|arg| arg.get_id() == "endpoint")
        .expect("endpoint argument");

    let defaults: Vec<_> = endpoint
        .get_default_values()
        .iter()
        .map(|v| v.to_str())
        .collect();
    assert_eq!(defaults, vec![Some(DEFAULT_HOST)]);
    assert_eq!(endpoint.get_env(), Some(OsStr::new("PIVNET_ENDPOINT")));
}

#[test]
fn test_setup_hint_only_for_missing_token() {
    let missing = PivnetError::ConfigMissing("no token".to_string());
    assert!(setup_hint(&missing).unwrap().contains("--api-token"));

    let bad_endpoint = Cli::parse_from([
        "pivnet",
        "--api-token",
        "secret",
        "--endpoint",
        "not a url",
        "products",
    ]);
    let err = bad_endpoint
        .client_config()
        .and_then(PivnetClient::new)
        .unwrap_err();
    assert!(matches!(err, PivnetError::UrlError(_)));
    assert!(setup_hint(&err).is_none());
}
