//! Normal-attack section mapping.
//!
//! Normal-attack animations are a single montage split into named sections,
//! one per swing. The replicated sub-state index identifies the swing;
//! clients reconstruct the section to play from the index alone.

/// A named section of the normal-attack animation set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackSection {
    FirstSwing,
    SecondSwing,
    ThirdSwing,
    FourthSwing,
    FifthSwing,
    /// Special swing performed while pressing forward (index 11).
    ForwardSpSwing,
    /// Special swing performed while pressing backward (index 12).
    BackwardSpSwing,
}

impl AttackSection {
    /// Attack index that starts a combo from rest.
    pub const FIRST_INDEX: u8 = 1;
    /// Index of the forward special swing.
    pub const FORWARD_SP_INDEX: u8 = 11;
    /// Index of the backward special swing.
    pub const BACKWARD_SP_INDEX: u8 = 12;

    /// Maps an attack index to its section. Invalid indices (including 0)
    /// map to `None`.
    pub fn from_attack_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::FirstSwing),
            2 => Some(Self::SecondSwing),
            3 => Some(Self::ThirdSwing),
            4 => Some(Self::FourthSwing),
            5 => Some(Self::FifthSwing),
            11 => Some(Self::ForwardSpSwing),
            12 => Some(Self::BackwardSpSwing),
            _ => None,
        }
    }

    /// Inverse of [`Self::from_attack_index`].
    pub fn attack_index(self) -> u8 {
        match self {
            Self::FirstSwing => 1,
            Self::SecondSwing => 2,
            Self::ThirdSwing => 3,
            Self::FourthSwing => 4,
            Self::FifthSwing => 5,
            Self::ForwardSpSwing => 11,
            Self::BackwardSpSwing => 12,
        }
    }

    /// Whether this swing can begin a combo from rest. Regular combos start
    /// at the first swing; special swings restart the chain on their own.
    pub fn starts_combo(self) -> bool {
        matches!(
            self,
            Self::FirstSwing | Self::ForwardSpSwing | Self::BackwardSpSwing
        )
    }

    /// The next swing in a regular combo, bounded by the equipped weapon's
    /// combo length. Special swings do not chain.
    pub fn next_in_combo(self, combo_length: u8) -> Option<Self> {
        let index = self.attack_index();
        if index >= 5 || index >= combo_length {
            return None;
        }
        Self::from_attack_index(index + 1)
    }
}
