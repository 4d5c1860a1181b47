//! Bridge version metadata

/// Bridge semver, taken from Cargo.toml
///
/// Never hand-write the version here; `env!("CARGO_PKG_VERSION")` keeps it in
/// sync with the manifest.
pub const BRIDGE_VERSION: &str = env!("CARGO_PKG_VERSION");
