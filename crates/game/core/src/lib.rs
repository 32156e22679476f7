//! Deterministic combat simulation shared by server and clients.
//!
//! `game-core` defines the canonical combat rules (character state machine,
//! skill runtime, attack resolution, crowd control) and exposes pure APIs
//! that can be reused by the authoritative runtime, client prediction, and
//! offline tools. All state mutation flows through [`world::CombatWorld`],
//! and supporting crates depend on the types re-exported here.
pub mod combat;
pub mod config;
pub mod env;
pub mod events;
pub mod fsm;
pub mod skill;
pub mod state;
pub mod world;

pub use combat::{
    AttackInfo, AttackOutcome, AttackResponse, CameraShake, attack_info_for_normal_attack,
    attack_info_for_skill,
};
pub use config::CombatConfig;
pub use env::{
    CombatParams, FixedRoll, PcgRng, RngOracle, SkillOracle, TablesOracle, WeaponAttackProfile,
    WorldEnv, compute_seed,
};
pub use events::GameplayEvent;
pub use fsm::{ClientReaction, reactions_for_transition};
pub use skill::{SkillDefinition, SkillSet, SkillSlot, SkillSlotState};
pub use state::{
    AttackSection, CharacterId, CharacterKind, CharacterRecord, CharacterStat, CharacterState,
    CharacterStateInfo, CrowdControlEffect, CrowdControlImmunities, DamageType, Loadout,
    PrimaryStats, StatKind, WeaponMask, WeaponType,
};
pub use world::{ActionRequest, CombatWorld, TaskScheduler, TimerHandle, TimerTask};
