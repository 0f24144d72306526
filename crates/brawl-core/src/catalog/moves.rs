//! Move catalog data.
//!
//! Adding a move means adding an entry here; the resolver table picks up a
//! resolver for it from its [`ResolutionKind`].

use crate::participant::{Attribute, Role};
use crate::status::StatusKind;

use super::{ActionCategory, Effect, Move, MoveFamily, MoveKey, PropMode, ResolutionKind, TargetArity};

const PHYSICAL: &[Attribute] = &[Attribute::Strength, Attribute::Dexterity];
const STR: &[Attribute] = &[Attribute::Strength];
const DEX: &[Attribute] = &[Attribute::Dexterity];
const INT: &[Attribute] = &[Attribute::Intelligence];
const WIS: &[Attribute] = &[Attribute::Wisdom];
const CHA: &[Attribute] = &[Attribute::Charisma];
const SPELL: &[Attribute] = &[Attribute::Intelligence, Attribute::Wisdom, Attribute::Charisma];

/// Every move in the game. Index 0 is the baseline attack.
pub static MOVES: &[Move] = &[
    // -------------------------------------------------------------------------
    // Baseline and generic
    // -------------------------------------------------------------------------
    Move {
        key: MoveKey::new("unarmed_strike"),
        name: "Unarmed Strike",
        family: MoveFamily::Baseline,
        pool: PHYSICAL,
        arity: TargetArity::Single,
        category: ActionCategory::Action,
        resolution: ResolutionKind::Contest,
        effects: &[Effect::Wound(1)],
        description: "A plain punch, kick, or elbow.",
    },
    Move {
        key: MoveKey::new("shove"),
        name: "Shove",
        family: MoveFamily::Generic,
        pool: STR,
        arity: TargetArity::Single,
        category: ActionCategory::Action,
        resolution: ResolutionKind::Contest,
        effects: &[Effect::Status { kind: StatusKind::Prone, turns: 1 }],
        description: "Knock someone off their feet and into the sawdust.",
    },
    Move {
        key: MoveKey::new("headbutt"),
        name: "Headbutt",
        family: MoveFamily::Generic,
        pool: &[Attribute::Strength, Attribute::Constitution],
        arity: TargetArity::Single,
        category: ActionCategory::Action,
        resolution: ResolutionKind::Contest,
        effects: &[
            Effect::Wound(1),
            Effect::Status { kind: StatusKind::Dazed, turns: 1 },
        ],
        description: "Forehead meets nose. Both parties see stars, one more than the other.",
    },
    Move {
        key: MoveKey::new("taunt"),
        name: "Taunt",
        family: MoveFamily::Generic,
        pool: CHA,
        arity: TargetArity::Single,
        category: ActionCategory::Bonus,
        resolution: ResolutionKind::Contest,
        effects: &[Effect::Status { kind: StatusKind::Rattled, turns: 2 }],
        description: "Say something about their mother.",
    },
    Move {
        key: MoveKey::new("grab_something"),
        name: "Grab Something",
        family: MoveFamily::Generic,
        pool: &[Attribute::Dexterity, Attribute::Strength],
        arity: TargetArity::None,
        category: ActionCategory::Bonus,
        resolution: ResolutionKind::AcquireProp,
        effects: &[],
        description: "Snatch whatever is within reach: a tankard, a stool, a broom.",
    },
    Move {
        key: MoveKey::new("size_up"),
        name: "Size Up",
        family: MoveFamily::Generic,
        pool: &[Attribute::Wisdom, Attribute::Intelligence],
        arity: TargetArity::None,
        category: ActionCategory::Bonus,
        resolution: ResolutionKind::SelfBuff,
        effects: &[Effect::SelfStatus { kind: StatusKind::SizedUp, turns: 2 }],
        description: "Read the room. The next swing lands with advantage.",
    },
    Move {
        key: MoveKey::new("duck_and_weave"),
        name: "Duck and Weave",
        family: MoveFamily::Generic,
        pool: DEX,
        arity: TargetArity::None,
        category: ActionCategory::Reaction,
        resolution: ResolutionKind::SelfBuff,
        effects: &[Effect::SelfStatus { kind: StatusKind::Weaving, turns: 1 }],
        description: "Bob out of the way of the incoming fist.",
    },
    Move {
        key: MoveKey::new("prop_smash"),
        name: "Smash With Prop",
        family: MoveFamily::Generic,
        pool: PHYSICAL,
        arity: TargetArity::Single,
        category: ActionCategory::Action,
        resolution: ResolutionKind::WieldProp(PropMode::Smash),
        effects: &[Effect::Wound(1)],
        description: "Break the held prop over someone. Epic props hit harder.",
    },
    Move {
        key: MoveKey::new("prop_hurl"),
        name: "Hurl Prop",
        family: MoveFamily::Generic,
        pool: DEX,
        arity: TargetArity::Single,
        category: ActionCategory::Action,
        resolution: ResolutionKind::WieldProp(PropMode::Hurl),
        effects: &[Effect::Wound(1)],
        description: "Throw the held prop across the room with a bonus to hit.",
    },
    Move {
        key: MoveKey::new("prop_parry"),
        name: "Parry With Prop",
        family: MoveFamily::Generic,
        pool: PHYSICAL,
        arity: TargetArity::None,
        category: ActionCategory::Reaction,
        resolution: ResolutionKind::WieldProp(PropMode::Parry),
        effects: &[],
        description: "Put the held prop between you and the blow; it does not survive.",
    },
    // -------------------------------------------------------------------------
    // Magic
    // -------------------------------------------------------------------------
    Move {
        key: MoveKey::new("arcane_jolt"),
        name: "Arcane Jolt",
        family: MoveFamily::Magic,
        pool: SPELL,
        arity: TargetArity::Single,
        category: ActionCategory::Action,
        resolution: ResolutionKind::Contest,
        effects: &[Effect::Wound(1)],
        description: "A snap of static that makes hair stand on end.",
    },
    Move {
        key: MoveKey::new("befuddle"),
        name: "Befuddle",
        family: MoveFamily::Magic,
        pool: SPELL,
        arity: TargetArity::Single,
        category: ActionCategory::Action,
        resolution: ResolutionKind::Contest,
        effects: &[Effect::Status { kind: StatusKind::Befuddled, turns: 2 }],
        description: "Muddle the target's thoughts until they forget which way is up.",
    },
    Move {
        key: MoveKey::new("twin_sparks"),
        name: "Twin Sparks",
        family: MoveFamily::Magic,
        pool: SPELL,
        arity: TargetArity::Many { max: 2 },
        category: ActionCategory::Action,
        resolution: ResolutionKind::Contest,
        effects: &[Effect::Wound(1)],
        description: "Two sparks, two targets, or the same one twice.",
    },
    Move {
        key: MoveKey::new("flicker_ward"),
        name: "Flicker Ward",
        family: MoveFamily::Magic,
        pool: SPELL,
        arity: TargetArity::None,
        category: ActionCategory::Reaction,
        resolution: ResolutionKind::SelfBuff,
        effects: &[Effect::SelfStatus { kind: StatusKind::Warded, turns: 1 }],
        description: "A shimmer that turns blows aside but not insults.",
    },
    // -------------------------------------------------------------------------
    // Roles
    // -------------------------------------------------------------------------
    Move {
        key: MoveKey::new("reckless_slam"),
        name: "Reckless Slam",
        family: MoveFamily::Role(Role::Barbarian),
        pool: STR,
        arity: TargetArity::Single,
        category: ActionCategory::Action,
        resolution: ResolutionKind::Contest,
        effects: &[Effect::Wound(2)],
        description: "Throw caution and bodyweight at the nearest problem.",
    },
    Move {
        key: MoveKey::new("tavern_quake"),
        name: "Tavern Quake",
        family: MoveFamily::Ace(Role::Barbarian),
        pool: STR,
        arity: TargetArity::None,
        category: ActionCategory::Action,
        resolution: ResolutionKind::Hazard,
        effects: &[],
        description: "Stomp hard enough to bring the shelves down on everyone.",
    },
    Move {
        key: MoveKey::new("heckle"),
        name: "Heckle",
        family: MoveFamily::Role(Role::Bard),
        pool: CHA,
        arity: TargetArity::Many { max: 3 },
        category: ActionCategory::Bonus,
        resolution: ResolutionKind::Contest,
        effects: &[Effect::Status { kind: StatusKind::Rattled, turns: 1 }],
        description: "A verse so cutting that up to three listeners lose their nerve.",
    },
    Move {
        key: MoveKey::new("show_stopper"),
        name: "Show Stopper",
        family: MoveFamily::Ace(Role::Bard),
        pool: CHA,
        arity: TargetArity::Many { max: 4 },
        category: ActionCategory::Action,
        resolution: ResolutionKind::Contest,
        effects: &[Effect::Status { kind: StatusKind::Stunned, turns: 1 }],
        description: "A final note that freezes the whole room mid-swing.",
    },
    Move {
        key: MoveKey::new("withering_glare"),
        name: "Withering Glare",
        family: MoveFamily::Role(Role::Cleric),
        pool: WIS,
        arity: TargetArity::Single,
        category: ActionCategory::Bonus,
        resolution: ResolutionKind::Contest,
        effects: &[Effect::Status { kind: StatusKind::Blinded, turns: 1 }],
        description: "A look of divine disappointment bright enough to dazzle.",
    },
    Move {
        key: MoveKey::new("divine_intervention"),
        name: "Divine Intervention",
        family: MoveFamily::Ace(Role::Cleric),
        pool: WIS,
        arity: TargetArity::None,
        category: ActionCategory::Reaction,
        resolution: ResolutionKind::SelfBuff,
        effects: &[Effect::SelfStatus { kind: StatusKind::Blessed, turns: 2 }],
        description: "Untouchable by fist or hex until the next round is out.",
    },
    Move {
        key: MoveKey::new("haymaker"),
        name: "Haymaker",
        family: MoveFamily::Role(Role::Fighter),
        pool: STR,
        arity: TargetArity::Single,
        category: ActionCategory::Action,
        resolution: ResolutionKind::Contest,
        effects: &[Effect::Wound(2)],
        description: "A textbook right hook.",
    },
    Move {
        key: MoveKey::new("knockout_blow"),
        name: "Knockout Blow",
        family: MoveFamily::Ace(Role::Fighter),
        pool: PHYSICAL,
        arity: TargetArity::Single,
        category: ActionCategory::Action,
        resolution: ResolutionKind::Contest,
        effects: &[Effect::Wound(3)],
        description: "The punch they will tell stories about.",
    },
    Move {
        key: MoveKey::new("flurry_of_blows"),
        name: "Flurry of Blows",
        family: MoveFamily::Role(Role::Monk),
        pool: &[Attribute::Dexterity, Attribute::Wisdom],
        arity: TargetArity::Many { max: 2 },
        category: ActionCategory::Bonus,
        resolution: ResolutionKind::Contest,
        effects: &[Effect::Wound(1)],
        description: "Two quick strikes, split or stacked.",
    },
    Move {
        key: MoveKey::new("stunning_strike"),
        name: "Stunning Strike",
        family: MoveFamily::Ace(Role::Monk),
        pool: &[Attribute::Dexterity, Attribute::Wisdom],
        arity: TargetArity::Single,
        category: ActionCategory::Action,
        resolution: ResolutionKind::Contest,
        effects: &[
            Effect::Wound(1),
            Effect::Status { kind: StatusKind::Stunned, turns: 1 },
        ],
        description: "A precise jab to the nerve cluster.",
    },
    Move {
        key: MoveKey::new("shield_bash"),
        name: "Shield Bash",
        family: MoveFamily::Role(Role::Paladin),
        pool: STR,
        arity: TargetArity::Single,
        category: ActionCategory::Action,
        resolution: ResolutionKind::Contest,
        effects: &[
            Effect::Wound(1),
            Effect::Status { kind: StatusKind::Prone, turns: 1 },
        ],
        description: "A tray, a shield, same principle.",
    },
    Move {
        key: MoveKey::new("righteous_stand"),
        name: "Righteous Stand",
        family: MoveFamily::Ace(Role::Paladin),
        pool: CHA,
        arity: TargetArity::None,
        category: ActionCategory::Bonus,
        resolution: ResolutionKind::SelfBuff,
        effects: &[Effect::SelfStatus { kind: StatusKind::Unbreakable, turns: 2 }],
        description: "Plant your feet and refuse to fall.",
    },
    Move {
        key: MoveKey::new("cheap_shot"),
        name: "Cheap Shot",
        family: MoveFamily::Role(Role::Rogue),
        pool: DEX,
        arity: TargetArity::Single,
        category: ActionCategory::Bonus,
        resolution: ResolutionKind::Contest,
        effects: &[
            Effect::Wound(1),
            Effect::Status { kind: StatusKind::Dazed, turns: 1 },
        ],
        description: "Below the belt, behind the back.",
    },
    Move {
        key: MoveKey::new("dirty_trick"),
        name: "Dirty Trick",
        family: MoveFamily::Ace(Role::Rogue),
        pool: DEX,
        arity: TargetArity::Single,
        category: ActionCategory::Action,
        resolution: ResolutionKind::Contest,
        effects: &[
            Effect::Wound(2),
            Effect::Status { kind: StatusKind::Blinded, turns: 2 },
        ],
        description: "Pepper in the eyes, then a knee.",
    },
    Move {
        key: MoveKey::new("mischief_hand"),
        name: "Mischief Hand",
        family: MoveFamily::Role(Role::Wizard),
        pool: INT,
        arity: TargetArity::Single,
        category: ActionCategory::Bonus,
        resolution: ResolutionKind::Contest,
        effects: &[Effect::Status { kind: StatusKind::Prone, turns: 1 }],
        description: "An invisible hand ties someone's bootlaces together.",
    },
    Move {
        key: MoveKey::new("chaos_surge"),
        name: "Chaos Surge",
        family: MoveFamily::Ace(Role::Wizard),
        pool: INT,
        arity: TargetArity::None,
        category: ActionCategory::Action,
        resolution: ResolutionKind::Hazard,
        effects: &[],
        description: "Wild magic ripples through the taproom with unpredictable results.",
    },
];
