//! Canned products, releases and EULAs for the mock server.

use crate::{Eula, Product, Release};

/// Release types accepted by the mock API.
pub const RELEASE_TYPES: &[&str] = &[
    "All-In-One",
    "Major Release",
    "Minor Release",
    "Service Release",
    "Maintenance Release",
    "Security Release",
    "Alpha Release",
    "Beta Release",
    "Edge Release",
    "Release Candidate",
    "Developer Release",
];

/// Factories for mock API records.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Product Fixtures
    // =========================================================================

    pub fn product(id: u64, slug: &str, name: &str) -> Product {
        Product {
            id,
            slug: slug.to_string(),
            name: name.to_string(),
        }
    }

    // =========================================================================
    // Release Fixtures
    // =========================================================================

    /// Create a release with only an ID and version.
    pub fn minimal_release(id: u64, version: &str) -> Release {
        Release {
            id,
            version: version.to_string(),
            ..Default::default()
        }
    }

    /// Create a published release with a type, date and EULA.
    pub fn published_release(id: u64, version: &str, release_type: &str, eula: Eula) -> Release {
        Release {
            release_type: Some(release_type.to_string()),
            release_date: Some("2016-03-14".to_string()),
            availability: Some("All Users".to_string()),
            eula: Some(eula),
            ..Self::minimal_release(id, version)
        }
    }

    // =========================================================================
    // EULA Fixtures
    // =========================================================================

    pub fn eula(id: u64, slug: &str, name: &str) -> Eula {
        Eula {
            id,
            slug: slug.to_string(),
            name: name.to_string(),
            content: Some(format!("<p>{name}</p>")),
            links: None,
        }
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// The data [`MockServer::start`](super::MockServer::start) serves.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// Products with their releases, EULAs and release links.
pub struct DefaultScenario {
    pub products: Vec<Product>,
    /// Releases paired with the slug of their product.
    pub releases: Vec<(String, Release)>,
    pub eulas: Vec<Eula>,
    /// `(release_id, dependent_release_id)` pairs.
    pub dependencies: Vec<(u64, u64)>,
    /// `(release_id, previous_release_id)` pairs.
    pub upgrade_paths: Vec<(u64, u64)>,
}

impl DefaultScenario {
    fn new() -> Self {
        let eula = Fixtures::eula(1, "pivotal_software_eula", "Pivotal Software EULA");
        let beta_eula = Fixtures::eula(2, "pivotal_beta_eula", "Pivotal Beta EULA");

        let products = vec![
            Fixtures::product(1, "pivnet-resource-test", "Pivnet Resource Test"),
            Fixtures::product(2, "pivotal-runtime", "Pivotal Runtime"),
        ];

        let releases = vec![
            (
                "pivnet-resource-test".to_string(),
                Fixtures::published_release(100, "1.0.0", "Major Release", eula.clone()),
            ),
            (
                "pivnet-resource-test".to_string(),
                Fixtures::published_release(101, "1.1.0", "Minor Release", eula.clone()),
            ),
            (
                "pivotal-runtime".to_string(),
                Fixtures::published_release(200, "2.0.0", "Major Release", eula.clone()),
            ),
        ];

        Self {
            products,
            releases,
            eulas: vec![eula, beta_eula],
            dependencies: vec![(101, 200)],
            upgrade_paths: vec![(101, 100)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_published_release() {
        let eula = Fixtures::eula(1, "some-eula", "Some EULA");
        let release = Fixtures::published_release(7, "1.2.3", "Minor Release", eula);
        assert_eq!(release.id, 7);
        assert_eq!(release.release_type.as_deref(), Some("Minor Release"));
        assert!(release.has_eula());
    }

    #[test]
    fn test_default_scenario() {
        let scenario = Fixtures::default_scenario();
        assert!(!scenario.products.is_empty());
        assert!(!scenario.releases.is_empty());
        assert!(!scenario.eulas.is_empty());

        // Every linked release exists in the scenario
        let ids: Vec<u64> = scenario.releases.iter().map(|(_, r)| r.id).collect();
        for (a, b) in scenario.dependencies.iter().chain(&scenario.upgrade_paths) {
            assert!(ids.contains(a));
            assert!(ids.contains(b));
        }
    }
}
