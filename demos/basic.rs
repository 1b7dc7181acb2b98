//! Basic example demonstrating the Pivnet API client.
//!
//! Run with:
//! ```
//! PIVNET_API_TOKEN=your-token cargo run --example basic -- pivotal-cf
//! ```

use pivnet::{
    check_authentication, Get, List, PivnetClient, Product, Release, ReleaseDependency,
    ReleaseUpgradePath,
};

#[tokio::main]
async fn main() -> pivnet::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let product_slug = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "pivotal-cf".to_string());

    // Create client from environment variables
    println!("Creating Pivnet client...");
    let client = PivnetClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    check_authentication(&client).await?;
    println!("Token accepted");

    println!("\n--- Product ---");
    let product = Product::get(&client, product_slug).await?;
    println!("{} ({}, id {})", product.name, product.slug, product.id);

    println!("\n--- Releases ---");
    let releases = Release::list(&client, &product.slug).await?;
    println!("Found {} releases", releases.len());

    for release in releases.iter().take(5) {
        let release_type = release.release_type.as_deref().unwrap_or("unknown");
        println!("  - {} [{}] (id {})", release.version, release_type, release.id);
    }

    // Show links for the most recent release
    if let Some(latest) = releases.first() {
        let release_ref = latest.release_ref(&product.slug);

        println!("\n--- Dependencies of {} ---", latest.version);
        let deps = ReleaseDependency::list(&client, &release_ref).await?;
        for dep in &deps {
            println!(
                "  - {} {} (release id {})",
                dep.release.product.name, dep.release.version, dep.release.id
            );
        }

        println!("\n--- Upgrade paths to {} ---", latest.version);
        let paths = ReleaseUpgradePath::list(&client, &release_ref).await?;
        for path in &paths {
            println!("  - from {}", path.release.version);
        }
    }

    println!("\nDone!");
    Ok(())
}
