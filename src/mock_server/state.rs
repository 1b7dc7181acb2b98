//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Pivnet API server.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    DependentRelease, Eula, Product, Release, ReleaseDependency, ReleaseUpgradePath,
    UpgradePathRelease,
};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Products indexed by slug.
    pub products: BTreeMap<String, Product>,

    /// Releases indexed by owning product slug.
    pub releases: BTreeMap<String, Vec<Release>>,

    /// EULAs indexed by slug.
    pub eulas: BTreeMap<String, Eula>,

    /// Release types accepted on create.
    pub release_types: Vec<String>,

    /// Dependent release IDs indexed by release ID.
    pub dependencies: HashMap<u64, Vec<u64>>,

    /// Previous release IDs indexed by release ID.
    pub upgrade_paths: HashMap<u64, Vec<u64>>,

    /// Releases whose EULA has been accepted.
    pub eula_acceptances: HashSet<u64>,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a product to the state.
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.insert(product.slug.clone(), product);
        self
    }

    /// Add a release owned by `product_slug`.
    pub fn with_release(mut self, product_slug: &str, release: Release) -> Self {
        self.releases
            .entry(product_slug.to_string())
            .or_default()
            .push(release);
        self
    }

    /// Add an EULA to the state.
    pub fn with_eula(mut self, eula: Eula) -> Self {
        self.eulas.insert(eula.slug.clone(), eula);
        self
    }

    /// Add a release type to the accepted set.
    pub fn with_release_type(mut self, release_type: &str) -> Self {
        self.release_types.push(release_type.to_string());
        self
    }

    /// Record that `release_id` depends on `dependent_release_id`.
    pub fn with_dependency(mut self, release_id: u64, dependent_release_id: u64) -> Self {
        self.add_dependency(release_id, dependent_release_id);
        self
    }

    /// Record an upgrade path to `release_id` from `previous_release_id`.
    pub fn with_upgrade_path(mut self, release_id: u64, previous_release_id: u64) -> Self {
        self.add_upgrade_path(release_id, previous_release_id);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Get a product by slug.
    pub fn get_product(&self, slug: &str) -> Option<&Product> {
        self.products.get(slug)
    }

    /// List all products.
    pub fn list_products(&self) -> Vec<&Product> {
        self.products.values().collect()
    }

    /// List the releases of a product, or `None` if the product is unknown.
    pub fn list_releases(&self, product_slug: &str) -> Option<Vec<&Release>> {
        self.get_product(product_slug)?;
        Some(
            self.releases
                .get(product_slug)
                .map(|r| r.iter().collect())
                .unwrap_or_default(),
        )
    }

    /// Get a release of a product by ID.
    pub fn get_release(&self, product_slug: &str, release_id: u64) -> Option<&Release> {
        self.releases
            .get(product_slug)?
            .iter()
            .find(|r| r.id == release_id)
    }

    /// Find a release by ID across all products, with its product.
    pub fn find_release(&self, release_id: u64) -> Option<(&Product, &Release)> {
        self.releases.iter().find_map(|(slug, releases)| {
            let release = releases.iter().find(|r| r.id == release_id)?;
            Some((self.products.get(slug)?, release))
        })
    }

    /// Next unused release ID.
    pub fn next_release_id(&self) -> u64 {
        self.releases
            .values()
            .flatten()
            .map(|r| r.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Store a new release under `product_slug`, assigning its ID.
    pub fn create_release(&mut self, product_slug: &str, mut release: Release) -> Release {
        release.id = self.next_release_id();
        self.releases
            .entry(product_slug.to_string())
            .or_default()
            .push(release.clone());
        release
    }

    /// Apply a PATCH to a stored release.
    ///
    /// Only fields present in `patch` are written; absent fields and the ID
    /// keep their stored values.
    pub fn update_release(
        &mut self,
        product_slug: &str,
        release_id: u64,
        patch: Release,
    ) -> Option<&Release> {
        let stored = self
            .releases
            .get_mut(product_slug)?
            .iter_mut()
            .find(|r| r.id == release_id)?;
        merge_release(stored, patch);
        Some(&*stored)
    }

    /// Delete a release and every link that references it.
    pub fn delete_release(&mut self, product_slug: &str, release_id: u64) -> bool {
        let Some(releases) = self.releases.get_mut(product_slug) else {
            return false;
        };
        let before = releases.len();
        releases.retain(|r| r.id != release_id);
        if releases.len() == before {
            return false;
        }

        for links in [&mut self.dependencies, &mut self.upgrade_paths] {
            links.remove(&release_id);
            for ids in links.values_mut() {
                ids.retain(|id| *id != release_id);
            }
        }
        self.eula_acceptances.remove(&release_id);
        true
    }

    /// Add a dependency link; adding an existing link is a no-op.
    pub fn add_dependency(&mut self, release_id: u64, dependent_release_id: u64) {
        let ids = self.dependencies.entry(release_id).or_default();
        if !ids.contains(&dependent_release_id) {
            ids.push(dependent_release_id);
        }
    }

    /// Remove a dependency link.
    pub fn remove_dependency(&mut self, release_id: u64, dependent_release_id: u64) {
        if let Some(ids) = self.dependencies.get_mut(&release_id) {
            ids.retain(|id| *id != dependent_release_id);
        }
    }

    /// Resolve the dependencies of a release into API records.
    pub fn dependencies_of(&self, release_id: u64) -> Vec<ReleaseDependency> {
        self.dependencies
            .get(&release_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.find_release(*id))
            .map(|(product, release)| ReleaseDependency {
                release: DependentRelease {
                    id: release.id,
                    version: release.version.clone(),
                    product: Product {
                        id: product.id,
                        name: product.name.clone(),
                        ..Default::default()
                    },
                },
            })
            .collect()
    }

    /// Add an upgrade path; adding an existing path is a no-op.
    pub fn add_upgrade_path(&mut self, release_id: u64, previous_release_id: u64) {
        let ids = self.upgrade_paths.entry(release_id).or_default();
        if !ids.contains(&previous_release_id) {
            ids.push(previous_release_id);
        }
    }

    /// Remove an upgrade path.
    pub fn remove_upgrade_path(&mut self, release_id: u64, previous_release_id: u64) {
        if let Some(ids) = self.upgrade_paths.get_mut(&release_id) {
            ids.retain(|id| *id != previous_release_id);
        }
    }

    /// Resolve the upgrade paths of a release into API records.
    pub fn upgrade_paths_of(&self, release_id: u64) -> Vec<ReleaseUpgradePath> {
        self.upgrade_paths
            .get(&release_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.find_release(*id))
            .map(|(_, release)| ReleaseUpgradePath {
                release: UpgradePathRelease {
                    id: release.id,
                    version: release.version.clone(),
                },
            })
            .collect()
    }
}

fn merge_release(stored: &mut Release, patch: Release) {
    fn merge<T>(slot: &mut Option<T>, value: Option<T>) {
        if value.is_some() {
            *slot = value;
        }
    }

    if !patch.version.is_empty() {
        stored.version = patch.version;
    }
    if patch.controlled {
        stored.controlled = true;
    }
    merge(&mut stored.release_type, patch.release_type);
    merge(&mut stored.release_date, patch.release_date);
    merge(&mut stored.release_notes_url, patch.release_notes_url);
    merge(&mut stored.availability, patch.availability);
    merge(&mut stored.description, patch.description);
    merge(&mut stored.eula, patch.eula);
    merge(&mut stored.oss_compliant, patch.oss_compliant);
    merge(&mut stored.end_of_support_date, patch.end_of_support_date);
    merge(&mut stored.end_of_guidance_date, patch.end_of_guidance_date);
    merge(&mut stored.end_of_availability_date, patch.end_of_availability_date);
    merge(&mut stored.eccn, patch.eccn);
    merge(&mut stored.license_exception, patch.license_exception);
    merge(&mut stored.updated_at, patch.updated_at);
    merge(&mut stored.links, patch.links);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::Fixtures;

    fn sample_state() -> MockState {
        MockState::new()
            .with_product(Fixtures::product(1, "alpha", "Alpha"))
            .with_product(Fixtures::product(2, "beta", "Beta"))
            .with_release("alpha", Fixtures::minimal_release(10, "1.0.0"))
            .with_release("alpha", Fixtures::minimal_release(11, "1.1.0"))
            .with_release("beta", Fixtures::minimal_release(20, "2.0.0"))
    }

    #[test]
    fn test_state_add_and_get_release() {
        let state = sample_state();

        let release = state.get_release("alpha", 11);
        assert_eq!(release.unwrap().version, "1.1.0");
        assert!(state.get_release("beta", 11).is_none());
        assert_eq!(state.list_releases("alpha").unwrap().len(), 2);
        assert!(state.list_releases("missing").is_none());
    }

    #[test]
    fn test_state_create_assigns_next_id() {
        let mut state = sample_state();
        let created = state.create_release("beta", Fixtures::minimal_release(0, "2.1.0"));
        assert_eq!(created.id, 21);
        assert_eq!(state.get_release("beta", 21).unwrap().version, "2.1.0");
    }

    #[test]
    fn test_state_update_release_keeps_absent_fields() {
        let eula = Fixtures::eula(1, "pivotal_software_eula", "Pivotal Software EULA");
        let mut state = MockState::new().with_release(
            "alpha",
            Fixtures::published_release(10, "1.0.0", "Major Release", eula),
        );

        let patch = Release {
            id: 999,
            description: Some("patched".to_string()),
            ..Default::default()
        };
        let updated = state.update_release("alpha", 10, patch).unwrap().clone();

        assert_eq!(updated.id, 10);
        assert_eq!(updated.version, "1.0.0");
        assert_eq!(updated.description.as_deref(), Some("patched"));
        assert_eq!(updated.release_type.as_deref(), Some("Major Release"));
        assert_eq!(updated.release_date.as_deref(), Some("2016-03-14"));
        assert_eq!(
            updated.eula.map(|e| e.slug),
            Some("pivotal_software_eula".to_string())
        );
        assert!(state.update_release("alpha", 11, Release::default()).is_none());
    }

    #[test]
    fn test_state_dependencies_resolve_product() {
        let state = sample_state().with_dependency(11, 20).with_dependency(11, 20);

        let deps = state.dependencies_of(11);
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].release.version, "2.0.0");
        assert_eq!(deps[0].release.product.name, "Beta");
    }

    #[test]
    fn test_state_delete_release_drops_links() {
        let mut state = sample_state()
            .with_dependency(11, 20)
            .with_upgrade_path(11, 10);

        assert!(state.delete_release("alpha", 10));
        assert!(state.upgrade_paths_of(11).is_empty());
        assert_eq!(state.dependencies_of(11).len(), 1);

        assert!(!state.delete_release("alpha", 10));
    }
}
