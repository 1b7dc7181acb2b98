//! CLI command execution.
//!
//! Each command resolves its arguments (release versions become release IDs
//! by listing the product's releases), performs one API operation and hands
//! the result to the [`Printer`].

use std::io::Write;

use crate::cli::{Command, ReleaseArgs};
use crate::output::{
    EulaRow, Printer, ProductRow, ReleaseDependencyRow, ReleaseRow, ReleaseTypeRow,
    UpgradePathRow,
};
use crate::{
    check_authentication, release_types, Create, CreateReleaseConfig, Delete, Eula, Get, List,
    PivnetClient, Product, Release, ReleaseDependency, ReleaseRef, ReleaseUpgradePath, Result,
};

/// Execute a parsed command against the API and print its result.
///
/// # Errors
///
/// Returns the first error from resolving arguments, calling the API or
/// writing output.
pub async fn run<W: Write>(
    client: &PivnetClient,
    command: Command,
    printer: &mut Printer<W>,
) -> Result<()> {
    match command {
        Command::Products => {
            let products = Product::list(client, &()).await?;
            printer.print_list(&products, |p| ProductRow::from(p))
        }
        Command::Product { product_slug } => {
            let product = Product::get(client, product_slug).await?;
            printer.print_single(&product)
        }
        Command::Releases { product_slug } => {
            let releases = Release::list(client, &product_slug).await?;
            printer.print_list(&releases, |r| ReleaseRow::from(r))
        }
        Command::Release(args) => {
            let release = resolve_release(client, &args).await?;
            // The list endpoint omits some fields; fetch the full record.
            let release = Release::get(client, release.release_ref(&args.product_slug)).await?;
            printer.print_single(&release)
        }
        Command::CreateRelease {
            release,
            release_type,
            eula_slug,
            release_date,
            description,
            release_notes_url,
            controlled,
            eccn,
            license_exception,
            end_of_support_date,
            end_of_guidance_date,
            end_of_availability_date,
            copy_metadata,
        } => {
            let config = CreateReleaseConfig {
                release_date,
                description,
                release_notes_url,
                controlled,
                eccn,
                license_exception,
                end_of_support_date,
                end_of_guidance_date,
                end_of_availability_date,
                copy_metadata,
                ..CreateReleaseConfig::new(
                    release.product_slug,
                    release.release_version,
                    release_type,
                    eula_slug,
                )
            };
            let created = Release::create(client, config).await?;
            printer.print_single(&created)
        }
        Command::DeleteRelease(args) => {
            let release = resolve_release(client, &args).await?;
            Release::delete(client, release.release_ref(&args.product_slug)).await?;
            printer.print_confirmation(&format!(
                "Release {} deleted from {}",
                args.release_version, args.product_slug
            ))
        }
        Command::ReleaseTypes => {
            let types = release_types(client).await?;
            printer.print_list(&types, |t| ReleaseTypeRow::from(t))
        }
        Command::Eulas => {
            let eulas = Eula::list(client, &()).await?;
            printer.print_list(&eulas, |e| EulaRow::from(e))
        }
        Command::Eula { eula_slug } => {
            let eula = Eula::get(client, eula_slug).await?;
            printer.print_single(&eula)
        }
        Command::AcceptEula(args) => {
            let release = resolve_release(client, &args).await?;
            let acceptance = Eula::accept(client, &release.release_ref(&args.product_slug)).await?;
            tracing::debug!(accepted_at = %acceptance.accepted_at, "EULA accepted");
            printer.print_confirmation(&format!(
                "EULA accepted for {} {}",
                args.product_slug, args.release_version
            ))
        }
        Command::ReleaseDependencies(args) => {
            let release = resolve_release(client, &args).await?;
            let dependencies =
                ReleaseDependency::list(client, &release.release_ref(&args.product_slug)).await?;
            printer.print_list(&dependencies, |d| ReleaseDependencyRow::from(d))
        }
        Command::AddReleaseDependency {
            release,
            dependent_product_slug,
            dependent_release_version,
        } => {
            let target = resolve_release(client, &release).await?;
            let dependent = Release::find_by_version(
                client,
                &dependent_product_slug,
                &dependent_release_version,
            )
            .await?;
            ReleaseDependency::add(client, &target.release_ref(&release.product_slug), dependent.id)
                .await?;
            printer.print_confirmation(&format!(
                "Added dependency on {} {} to {} {}",
                dependent_product_slug,
                dependent_release_version,
                release.product_slug,
                release.release_version
            ))
        }
        Command::RemoveReleaseDependency {
            release,
            dependent_product_slug,
            dependent_release_version,
        } => {
            let target = resolve_release(client, &release).await?;
            let dependent = Release::find_by_version(
                client,
                &dependent_product_slug,
                &dependent_release_version,
            )
            .await?;
            ReleaseDependency::remove(
                client,
                &target.release_ref(&release.product_slug),
                dependent.id,
            )
            .await?;
            printer.print_confirmation(&format!(
                "Removed dependency on {} {} from {} {}",
                dependent_product_slug,
                dependent_release_version,
                release.product_slug,
                release.release_version
            ))
        }
        Command::ReleaseUpgradePaths(args) => {
            let release = resolve_release(client, &args).await?;
            let paths =
                ReleaseUpgradePath::list(client, &release.release_ref(&args.product_slug)).await?;
            printer.print_list(&paths, |u| UpgradePathRow::from(u))
        }
        Command::AddReleaseUpgradePath {
            release,
            previous_release_version,
        } => {
            let (target, previous) =
                resolve_release_pair(client, &release, &previous_release_version).await?;
            ReleaseUpgradePath::add(client, &target, previous.id).await?;
            printer.print_confirmation(&format!(
                "Added upgrade path from {} to {}",
                previous_release_version, release.release_version
            ))
        }
        Command::RemoveReleaseUpgradePath {
            release,
            previous_release_version,
        } => {
            let (target, previous) =
                resolve_release_pair(client, &release, &previous_release_version).await?;
            ReleaseUpgradePath::remove(client, &target, previous.id).await?;
            printer.print_confirmation(&format!(
                "Removed upgrade path from {} to {}",
                previous_release_version, release.release_version
            ))
        }
        Command::CheckAuth => {
            check_authentication(client).await?;
            printer.print_confirmation("Authentication succeeded")
        }
    }
}

async fn resolve_release(client: &PivnetClient, args: &ReleaseArgs) -> Result<Release> {
    Release::find_by_version(client, &args.product_slug, &args.release_version).await
}

/// Resolve a release and an earlier release of the same product with a
/// single listing.
async fn resolve_release_pair(
    client: &PivnetClient,
    args: &ReleaseArgs,
    previous_version: &str,
) -> Result<(ReleaseRef, Release)> {
    let releases = Release::list(client, &args.product_slug).await?;
    let find = |version: &str| {
        releases
            .iter()
            .find(|r| r.version == version)
            .cloned()
            .ok_or_else(|| crate::PivnetError::ReleaseNotFound {
                product_slug: args.product_slug.clone(),
                version: version.to_string(),
            })
    };

    let target = find(&args.release_version)?;
    let previous = find(previous_version)?;
    Ok((target.release_ref(&args.product_slug), previous))
}
