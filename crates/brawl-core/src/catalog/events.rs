//! Environmental event catalog.
//!
//! Narrative events are flavor only. Hazards may carry a save: every
//! conscious participant rolls d20 + best modifier against the DC and the
//! pass or fail effects land through the normal effect-application path.

use serde::Serialize;

use crate::participant::Attribute;
use crate::status::StatusKind;

use super::Effect;

/// Whether an event is mechanical or flavor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// Mechanical; may require a save.
    Hazard,
    /// Announcement only.
    Narrative,
}

/// Save a hazard asks of each participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveRequirement {
    /// Attributes the save may draw on.
    pub pool: &'static [Attribute],
    /// Total needed to pass.
    pub dc: i32,
    /// Effects on a failed save.
    pub on_fail: &'static [Effect],
    /// Effects on a passed save.
    pub on_pass: &'static [Effect],
}

/// A randomly selected happening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentalEvent {
    /// Catalog key.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Hazard or narrative.
    pub category: EventCategory,
    /// Narration text.
    pub description: &'static str,
    /// Save, for hazards that have one.
    pub save: Option<SaveRequirement>,
}

/// Flavor events announced on the turn cadence.
pub static NARRATIVE_EVENTS: &[EnvironmentalEvent] = &[
    EnvironmentalEvent {
        key: "barkeep_order",
        name: "Order! Order!",
        category: EventCategory::Narrative,
        description: "The barkeep bangs a ladle on the counter and is roundly ignored.",
        save: None,
    },
    EnvironmentalEvent {
        key: "bard_tune",
        name: "Fighting Music",
        category: EventCategory::Narrative,
        description: "A bard in the corner strikes up a jaunty tune to match the punches.",
        save: None,
    },
    EnvironmentalEvent {
        key: "placing_bets",
        name: "Place Your Bets",
        category: EventCategory::Narrative,
        description: "Coins slap onto tables as the regulars start taking odds.",
        save: None,
    },
    EnvironmentalEvent {
        key: "sausage_thief",
        name: "Sausage Thief",
        category: EventCategory::Narrative,
        description: "The tavern dog seizes the moment and a sausage.",
        save: None,
    },
    EnvironmentalEvent {
        key: "lanterns_flicker",
        name: "Flickering Lanterns",
        category: EventCategory::Narrative,
        description: "The lanterns gutter and every shadow seems to throw a punch.",
        save: None,
    },
    EnvironmentalEvent {
        key: "chant",
        name: "The Chant",
        category: EventCategory::Narrative,
        description: "Someone starts a chant. Everyone joins in. Nobody knows the words.",
        save: None,
    },
];

/// Mechanical hazards.
pub static HAZARD_EVENTS: &[EnvironmentalEvent] = &[
    EnvironmentalEvent {
        key: "spilled_ale",
        name: "Spilled Ale",
        category: EventCategory::Hazard,
        description: "A barrel gives way and the floor turns into a slick of ale.",
        save: Some(SaveRequirement {
            pool: &[Attribute::Dexterity],
            dc: 12,
            on_fail: &[Effect::Status { kind: StatusKind::Prone, turns: 1 }],
            on_pass: &[],
        }),
    },
    EnvironmentalEvent {
        key: "flying_tankard",
        name: "Flying Tankard",
        category: EventCategory::Hazard,
        description: "A tankard sails out of nowhere, aimed at nobody in particular.",
        save: Some(SaveRequirement {
            pool: &[Attribute::Dexterity],
            dc: 13,
            on_fail: &[Effect::Wound(1)],
            on_pass: &[],
        }),
    },
    EnvironmentalEvent {
        key: "collapsing_shelf",
        name: "Collapsing Shelf",
        category: EventCategory::Hazard,
        description: "The bottle shelf tears loose from the wall.",
        save: Some(SaveRequirement {
            pool: &[Attribute::Dexterity, Attribute::Strength],
            dc: 14,
            on_fail: &[Effect::Wound(2)],
            on_pass: &[Effect::Wound(1)],
        }),
    },
    EnvironmentalEvent {
        key: "kitchen_flare",
        name: "Kitchen Flare",
        category: EventCategory::Hazard,
        description: "A grease fire roars out of the kitchen hatch.",
        save: Some(SaveRequirement {
            pool: &[Attribute::Constitution],
            dc: 12,
            on_fail: &[
                Effect::Wound(1),
                Effect::Status { kind: StatusKind::Dazed, turns: 1 },
            ],
            on_pass: &[],
        }),
    },
    EnvironmentalEvent {
        key: "hearth_smoke",
        name: "Hearth Smoke",
        category: EventCategory::Hazard,
        description: "Someone kicks the hearth and the room fills with smoke.",
        save: Some(SaveRequirement {
            pool: &[Attribute::Constitution],
            dc: 11,
            on_fail: &[Effect::Status { kind: StatusKind::Blinded, turns: 1 }],
            on_pass: &[],
        }),
    },
    EnvironmentalEvent {
        key: "bouncer_arrives",
        name: "The Bouncer Arrives",
        category: EventCategory::Hazard,
        description: "A very large person cracks their knuckles by the door. Nobody moves, for a moment.",
        save: None,
    },
];

/// Looks up a hazard by key.
#[must_use]
pub fn hazard(key: &str) -> Option<&'static EnvironmentalEvent> {
    HAZARD_EVENTS.iter().find(|e| e.key == key)
}
