//! Props: whatever a brawler can grab off the nearest table.
//!
//! A prop is held until it is used once, then it is gone. Grabbing a new
//! prop drops the old one.

use std::fmt;

use serde::Serialize;

/// Rarity tier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropTier {
    /// Everyday tavern clutter.
    Common,
    /// Something that really should not have been within reach.
    Epic,
}

impl PropTier {
    /// Extra wounds when smashed over someone.
    #[must_use]
    pub const fn smash_wounds(self) -> u8 {
        match self {
            Self::Common => 1,
            Self::Epic => 2,
        }
    }

    /// Bonus to the contest roll when hurled.
    #[must_use]
    pub const fn hurl_bonus(self) -> i32 {
        match self {
            Self::Common => 2,
            Self::Epic => 4,
        }
    }

    /// Defense granted when used to parry.
    #[must_use]
    pub const fn parry_defense(self) -> i32 {
        match self {
            Self::Common => 2,
            Self::Epic => 4,
        }
    }
}

/// Ways a prop can be spent.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropMode {
    /// Melee: more wounds.
    Smash,
    /// Thrown: better odds to hit.
    Hurl,
    /// Defensive: a one-turn defense bonus.
    Parry,
}

/// A holdable item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Prop {
    /// Catalog key.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Rarity tier.
    pub tier: PropTier,
    /// Supported modes.
    pub modes: &'static [PropMode],
}

impl Prop {
    /// Whether the prop can be used in `mode`.
    #[must_use]
    pub fn supports(&self, mode: PropMode) -> bool {
        self.modes.contains(&mode)
    }
}

impl fmt::Display for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Common props, drawn on an ordinary successful grab.
pub static COMMON_PROPS: &[Prop] = &[
    Prop {
        key: "tankard",
        name: "Pewter Tankard",
        tier: PropTier::Common,
        modes: &[PropMode::Smash, PropMode::Hurl],
    },
    Prop {
        key: "barstool",
        name: "Barstool",
        tier: PropTier::Common,
        modes: &[PropMode::Smash, PropMode::Parry],
    },
    Prop {
        key: "broom",
        name: "Broom",
        tier: PropTier::Common,
        modes: &[PropMode::Smash, PropMode::Parry],
    },
    Prop {
        key: "serving_tray",
        name: "Serving Tray",
        tier: PropTier::Common,
        modes: &[PropMode::Parry, PropMode::Hurl],
    },
    Prop {
        key: "stale_loaf",
        name: "Stale Loaf",
        tier: PropTier::Common,
        modes: &[PropMode::Hurl],
    },
    Prop {
        key: "chair_leg",
        name: "Chair Leg",
        tier: PropTier::Common,
        modes: &[PropMode::Smash],
    },
];

/// Epic props, drawn when the grab roll is a natural 20.
pub static EPIC_PROPS: &[Prop] = &[
    Prop {
        key: "enchanted_lute",
        name: "Enchanted Lute",
        tier: PropTier::Epic,
        modes: &[PropMode::Smash, PropMode::Parry],
    },
    Prop {
        key: "dwarven_keg",
        name: "Keg of Dwarven Stout",
        tier: PropTier::Epic,
        modes: &[PropMode::Smash, PropMode::Hurl],
    },
    Prop {
        key: "boars_head",
        name: "Mounted Boar's Head",
        tier: PropTier::Epic,
        modes: &[PropMode::Smash, PropMode::Hurl, PropMode::Parry],
    },
];

/// The prop pool for a tier.
#[must_use]
pub fn pool(tier: PropTier) -> &'static [Prop] {
    match tier {
        PropTier::Common => COMMON_PROPS,
        PropTier::Epic => EPIC_PROPS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pools_match_tier() {
        assert!(COMMON_PROPS.iter().all(|p| p.tier == PropTier::Common));
        assert!(EPIC_PROPS.iter().all(|p| p.tier == PropTier::Epic));
    }

    #[test]
    fn every_prop_has_a_mode() {
        assert!(COMMON_PROPS.iter().chain(EPIC_PROPS).all(|p| !p.modes.is_empty()));
    }

    #[test]
    fn epic_props_outclass_common() {
        assert!(PropTier::Epic.smash_wounds() > PropTier::Common.smash_wounds());
        assert!(PropTier::Epic.hurl_bonus() > PropTier::Common.hurl_bonus());
        assert!(PropTier::Epic.parry_defense() > PropTier::Common.parry_defense());
    }

    #[test]
    fn supports_checks_modes() {
        let loaf = COMMON_PROPS.iter().find(|p| p.key == "stale_loaf").unwrap();
        assert!(loaf.supports(PropMode::Hurl));
        assert!(!loaf.supports(PropMode::Smash));
    }
}
