//! Character state machine rules.
//!
//! [`predicates`] holds the eligibility checks queried before a transition
//! request is issued and re-checked authoritatively before commit.
//! [`observer`] derives client reactions from replicated tuples.

pub mod observer;
pub mod predicates;

pub use observer::{ClientReaction, reactions_for_transition};
pub use predicates::{
    can_dodge, can_guard_against_attacks, can_jump, can_move, can_normal_attack,
    can_start_interaction, can_toggle_sheathe, can_trigger_skill, can_use_any_skill,
};
