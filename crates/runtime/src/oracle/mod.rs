//! Content-backed oracle implementations.

use std::sync::Arc;

use game_content::{BalanceTables, SkillCatalog, default_balance, default_catalog};
use game_core::{
    CombatParams, PcgRng, RngOracle, SkillDefinition, SkillOracle, TablesOracle,
    WeaponAttackProfile, WeaponType, WorldEnv,
};

/// [`SkillOracle`] over a loaded skill catalog.
pub struct CatalogSkillOracle(pub SkillCatalog);

impl SkillOracle for CatalogSkillOracle {
    fn skill(&self, group: &str) -> Option<&SkillDefinition> {
        self.0.get(group)
    }
}

/// [`TablesOracle`] over loaded balance tables.
pub struct BalanceTablesOracle(pub BalanceTables);

impl TablesOracle for BalanceTablesOracle {
    fn combat(&self) -> CombatParams {
        self.0.combat
    }

    fn weapon_profile(&self, weapon: WeaponType) -> Option<WeaponAttackProfile> {
        self.0.weapon_profile(weapon)
    }
}

/// Bundle of oracle implementations injected into the session.
#[derive(Clone)]
pub struct OracleManager {
    pub skills: Arc<dyn SkillOracle>,
    pub tables: Arc<dyn TablesOracle>,
    pub rng: Arc<dyn RngOracle>,
}

impl OracleManager {
    /// Builds oracles from loaded content.
    pub fn from_content(catalog: SkillCatalog, balance: BalanceTables) -> Self {
        Self {
            skills: Arc::new(CatalogSkillOracle(catalog)),
            tables: Arc::new(BalanceTablesOracle(balance)),
            rng: Arc::new(PcgRng),
        }
    }

    /// Oracles over the built-in default content.
    pub fn default_content() -> Self {
        Self::from_content(default_catalog(), default_balance())
    }

    /// Replaces the rng oracle (tests use fixed rolls to force outcomes).
    pub fn with_rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    /// Borrowed oracle bundle for one world operation.
    pub fn env(&self, seed: u64) -> WorldEnv<'_> {
        WorldEnv::new(
            self.skills.as_ref(),
            self.tables.as_ref(),
            self.rng.as_ref(),
            seed,
        )
    }
}
