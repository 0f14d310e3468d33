pub mod ports;

/// Every v2 networking resource lives under this path segment.
pub(crate) const API_VERSION: &str = "v2.0";
