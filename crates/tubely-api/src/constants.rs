//! API constants

/// Prefix of every JSON API route
pub const API_PREFIX: &str = "/api";

/// Route the assets root is served under
pub const ASSETS_ROUTE: &str = "/assets";
