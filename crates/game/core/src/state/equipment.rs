//! Weapon types and the equipped loadout.

use bitflags::bitflags;

/// Weapon classes. `None` means unarmed; most combat actions require an
/// equipped, unsheathed weapon.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponType {
    #[default]
    None,
    GreatSword,
    WarHammer,
    LongSword,
    Mace,
    Dagger,
    Staff,
}

bitflags! {
    /// Set of weapon types a skill supports. Bit positions follow the
    /// [`WeaponType`] discriminants so masks stay stable in content files.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct WeaponMask: u16 {
        const GREAT_SWORD = 1 << 1;
        const WAR_HAMMER = 1 << 2;
        const LONG_SWORD = 1 << 3;
        const MACE = 1 << 4;
        const DAGGER = 1 << 5;
        const STAFF = 1 << 6;
    }
}

impl WeaponMask {
    /// All concrete weapon types.
    pub fn any_weapon() -> Self {
        Self::all()
    }

    /// Whether the mask includes the given weapon. Unarmed is never
    /// supported.
    pub fn supports(&self, weapon: WeaponType) -> bool {
        let bit = match weapon {
            WeaponType::None => return false,
            WeaponType::GreatSword => Self::GREAT_SWORD,
            WeaponType::WarHammer => Self::WAR_HAMMER,
            WeaponType::LongSword => Self::LONG_SWORD,
            WeaponType::Mace => Self::MACE,
            WeaponType::Dagger => Self::DAGGER,
            WeaponType::Staff => Self::STAFF,
        };
        self.contains(bit)
    }
}

/// Currently equipped weapon state. Weapons themselves are separate actors
/// referenced for the duration of equip; the loadout only carries what the
/// combat rules need.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    pub weapon: WeaponType,
    pub sheathed: bool,
}

impl Loadout {
    pub fn armed(weapon: WeaponType) -> Self {
        Self {
            weapon,
            sheathed: false,
        }
    }

    pub fn has_weapon(&self) -> bool {
        self.weapon != WeaponType::None
    }

    /// Weapon equipped and drawn.
    pub fn weapon_ready(&self) -> bool {
        self.has_weapon() && !self.sheathed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_never_supports_unarmed() {
        assert!(!WeaponMask::any_weapon().supports(WeaponType::None));
        assert!(WeaponMask::any_weapon().supports(WeaponType::Dagger));
    }

    #[test]
    fn mask_matches_selected_weapons() {
        let mask = WeaponMask::GREAT_SWORD | WeaponMask::STAFF;
        assert!(mask.supports(WeaponType::GreatSword));
        assert!(mask.supports(WeaponType::Staff));
        assert!(!mask.supports(WeaponType::Mace));
    }
}
