//! URL conventions for the networking service. Only the ports resource is provided.

pub mod v2;
