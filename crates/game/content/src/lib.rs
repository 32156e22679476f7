//! Data-driven content definitions and loaders.
//!
//! This crate houses static combat content and provides loaders for
//! RON/TOML data files:
//! - Skill catalogs (data-driven via RON)
//! - Balance tables and weapon attack profiles (data-driven via TOML)
//!
//! Content is consumed by runtime oracles and never appears in simulation
//! state. All loaders use game-core types directly with serde for RON/TOML
//! deserialization. A built-in default catalog and balance set back tests
//! and demos that ship without data files.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{BalanceTables, SkillCatalog, default_balance, default_catalog};

#[cfg(feature = "loaders")]
pub use loaders::{SkillLoader, TablesLoader};
