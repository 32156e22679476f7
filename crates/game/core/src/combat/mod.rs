//! Attack resolution.
//!
//! This module provides pure functions for building and resolving attacks.
//! All combat math is deterministic; randomness enters only through the
//! explicit roll parameter supplied by the caller.
//!
//! # Architecture
//!
//! - **Pure Functions**: no side effects; application of results (health,
//!   timers, events) happens in [`crate::world`]
//! - **Stats-based**: damage derives from [`crate::state::PrimaryStats`]
//! - **Table-driven**: multipliers and reductions come from
//!   [`crate::env::CombatParams`]

mod attack;
mod crowd_control;
mod resolve;

pub use attack::{AttackInfo, AttackOutcome, AttackResponse, CameraShake};
pub use crowd_control::can_apply_crowd_control;
pub use resolve::{
    Resolution, attack_info_for_normal_attack, attack_info_for_skill, mitigate, resolve_attack,
};
