//! Skill definitions and per-character skill runtime.

mod definition;
mod runtime;

pub use definition::SkillDefinition;
pub use runtime::{ActiveSkill, ChainWindow, SkillSet, SkillSlot, SkillSlotState};
