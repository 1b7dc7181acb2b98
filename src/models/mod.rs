//! Pivnet API model types.

mod authentication;
mod eula;
mod links;
mod product;
mod release;
mod release_dependency;
mod release_upgrade_path;

pub use authentication::*;
pub use eula::*;
pub use links::*;
pub use product::*;
pub use release::*;
pub use release_dependency::*;
pub use release_upgrade_path::*;
