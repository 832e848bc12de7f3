// Canonical tendency catalog: names, display categories, caps, locked
// ceilings and pairwise ordering rules.
//
// The order of `TENDENCIES` is the output order of every `TendencyMap` and is
// depended on by exports. Renaming, reordering or removing an entry requires
// bumping `CATALOG_VERSION`.

use serde::Serialize;

/// Version of the canonical name set and order.
pub const CATALOG_VERSION: u32 = 1;

/// Hard cap applied to names without an explicit one.
pub const DEFAULT_HARD_CAP: u32 = 100;

/// Display grouping for a tendency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Shooting,
    PullUpStepBack,
    Driving,
    Finishing,
    Dunks,
    DirectionTripleThreat,
    DribbleSetup,
    PassingBalance,
    Isolation,
    Post,
    Defense,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Shooting => "Shooting",
            Category::PullUpStepBack => "Pull-Up & Step-Back",
            Category::Driving => "Driving",
            Category::Finishing => "Finishing",
            Category::Dunks => "Dunks",
            Category::DirectionTripleThreat => "Direction & Triple Threat",
            Category::DribbleSetup => "Dribble Setup",
            Category::PassingBalance => "Passing & Balance",
            Category::Isolation => "Isolation",
            Category::Post => "Post",
            Category::Defense => "Defense",
        }
    }
}

/// A canonical tendency and its ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TendencyAttribute {
    pub name: &'static str,
    pub category: Category,
    pub hard_cap: u32,
    /// Design-level ceiling independent of the hard cap.
    pub locked_absolute: Option<u32>,
    /// Upper bound applied after the locked absolute.
    pub locked_cap: Option<u32>,
}

const fn attr(name: &'static str, category: Category, hard_cap: u32) -> TendencyAttribute {
    TendencyAttribute {
        name,
        category,
        hard_cap,
        locked_absolute: None,
        locked_cap: None,
    }
}

const fn locked_absolute(
    name: &'static str,
    category: Category,
    hard_cap: u32,
    ceiling: u32,
) -> TendencyAttribute {
    TendencyAttribute {
        locked_absolute: Some(ceiling),
        ..attr(name, category, hard_cap)
    }
}

const fn locked_cap(
    name: &'static str,
    category: Category,
    hard_cap: u32,
    ceiling: u32,
) -> TendencyAttribute {
    TendencyAttribute {
        locked_cap: Some(ceiling),
        ..attr(name, category, hard_cap)
    }
}

use Category::*;

/// Every canonical tendency, in output order.
pub const TENDENCIES: &[TendencyAttribute] = &[
    // Shooting
    attr("Shot", Shooting, 75),
    attr("Touch", Shooting, 65),
    attr("Shot Close", Shooting, 60),
    attr("Shot Under", Shooting, 60),
    attr("Shot Close Left", Shooting, 50),
    attr("Shot Close Middle", Shooting, 50),
    attr("Shot Close Right", Shooting, 50),
    attr("Shot Mid", Shooting, 55),
    attr("Spot-Up Shot Mid", Shooting, 45),
    attr("Off-Screen Mid", Shooting, 40),
    attr("Shot Mid Left", Shooting, 45),
    attr("Shot Mid Left-Center", Shooting, 45),
    attr("Shot Mid Center", Shooting, 45),
    attr("Shot Mid Right-Center", Shooting, 45),
    attr("Shot Mid Right", Shooting, 45),
    attr("Shot Three", Shooting, 60),
    attr("Spot-Up Three", Shooting, 60),
    attr("Off-Screen Three", Shooting, 55),
    attr("Shot Three Left", Shooting, 50),
    attr("Shot Three Left-Center", Shooting, 50),
    attr("Shot Three Center", Shooting, 50),
    attr("Shot Three Right-Center", Shooting, 50),
    attr("Shot Three Right", Shooting, 50),
    attr("Contested Jumper Mid", Shooting, 45),
    attr("Contested Jumper Three", Shooting, 40),
    // Pull-Up & Step-Back
    locked_absolute("Step-Back Jumper Mid", PullUpStepBack, 40, 40),
    locked_absolute("Step-Back Jumper Three", PullUpStepBack, 35, 35),
    attr("Spin Jumper", PullUpStepBack, 45),
    attr("Transition Pull-Up Three", PullUpStepBack, 45),
    attr("Dribble Pull-Up Mid", PullUpStepBack, 50),
    attr("Dribble Pull-Up Three", PullUpStepBack, 40),
    // Driving
    attr("Drive", Driving, 60),
    attr("Spot-Up Drive", Driving, 55),
    attr("Off-Screen Drive", Driving, 50),
    // Finishing
    attr("Use Glass", Finishing, 55),
    attr("Driving Layup", Finishing, 60),
    attr("Step Through Shot", Finishing, 45),
    attr("Spin Layup", Finishing, 55),
    attr("Eurostep Layup", Finishing, 55),
    attr("Hop Step Layup", Finishing, 55),
    attr("Floater", Finishing, 55),
    // Dunks
    attr("Stand & Dunk", Dunks, 60),
    attr("Drive & Dunk", Dunks, 60),
    locked_cap("Flashy Dunk", Dunks, 55, 55),
    locked_cap("Alley-Oop", Dunks, 55, 55),
    locked_cap("Putback", Dunks, 55, 55),
    attr("Crash", Dunks, 55),
    // Direction & Triple Threat
    attr("Drive Right", DirectionTripleThreat, 80),
    attr("Triple Threat Pump Fake", DirectionTripleThreat, 60),
    attr("Triple Threat Jab Step", DirectionTripleThreat, 60),
    attr("Triple Threat Idle", DirectionTripleThreat, 40),
    attr("Triple Threat Shoot", DirectionTripleThreat, 55),
    // Dribble Setup
    attr("Set Up with Size Up", DribbleSetup, 55),
    attr("Set Up with Hesitation", DribbleSetup, 55),
    attr("No Set Up Dribble", DribbleSetup, 35),
    attr("Drive and Crossover", DribbleSetup, 55),
    attr("Drive and Double Crossover", DribbleSetup, 55),
    attr("Drive and Spin", DribbleSetup, 55),
    attr("Drive and Half Spin", DribbleSetup, 55),
    attr("Drive and Step Back", DribbleSetup, 55),
    attr("Drive and Behind the Back", DribbleSetup, 55),
    attr("Drive and Dribble Hesitation", DribbleSetup, 55),
    attr("Drive and In and Out", DribbleSetup, 55),
    attr("No Drive & Dribble Move", DribbleSetup, 85),
    // Passing & Balance
    attr("Attack Strong on Drive", PassingBalance, 60),
    attr("Dish to Open Man", PassingBalance, 55),
    attr("Flashy Pass", PassingBalance, 55),
    attr("Alley-Oop Pass", PassingBalance, 55),
    attr("Roll vs Pop", PassingBalance, 85),
    attr("Transition Spot Up vs Cut to Basket", PassingBalance, 85),
    // Isolation
    attr("Isolation vs Elite", Isolation, 55),
    attr("Isolation vs Good", Isolation, 55),
    attr("Isolation vs Average", Isolation, 55),
    attr("Isolation vs Poor", Isolation, 55),
    attr("Play Discipline", Isolation, 75),
    // Post
    attr("Post Up", Post, 60),
    attr("Post Back Down", Post, 60),
    attr("Post Aggressive Back Down", Post, 60),
    attr("Post Face Up", Post, 55),
    attr("Post Spin", Post, 60),
    attr("Post Drive", Post, 60),
    attr("Post Drop Step", Post, 60),
    attr("Shoot From Post", Post, 60),
    attr("Post Hook Left", Post, 60),
    attr("Post Hook Right", Post, 60),
    attr("Post Fade Left", Post, 60),
    attr("Post Fade Right", Post, 60),
    attr("Post Shimmy Shot", Post, 60),
    attr("Post Hop Shot", Post, 60),
    attr("Post Step Back Shot", Post, 60),
    attr("Post Up and Under", Post, 60),
    // Defense
    attr("Takes Charge", Defense, 60),
    attr("Foul", Defense, 60),
    attr("Hard Foul", Defense, 55),
    attr("Pass Interception", Defense, 60),
    attr("On-Ball Steal", Defense, 60),
    attr("Blocked Shot", Defense, 60),
    attr("Contest Shot", Defense, 60),
];

/// A declared inequality `lesser <= greater`, enforced after individual
/// capping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderingRule {
    pub lesser: &'static str,
    pub greater: &'static str,
}

/// Ordering rules, applied once each in declaration order.
pub const RELATIONAL_RULES: &[OrderingRule] = &[OrderingRule {
    lesser: "Spot-Up Shot Mid",
    greater: "Shot Mid",
}];

/// Look up a canonical attribute by name.
pub fn attribute(name: &str) -> Option<&'static TendencyAttribute> {
    TENDENCIES.iter().find(|a| a.name == name)
}

/// Hard cap for `name`, or `DEFAULT_HARD_CAP` for unknown names.
pub fn hard_cap(name: &str) -> u32 {
    attribute(name).map_or(DEFAULT_HARD_CAP, |a| a.hard_cap)
}

/// Canonical names in output order.
pub fn names() -> impl Iterator<Item = &'static str> {
    TENDENCIES.iter().map(|a| a.name)
}

/// Canonical names belonging to `category`, in output order.
pub fn names_in(category: Category) -> impl Iterator<Item = &'static str> {
    TENDENCIES
        .iter()
        .filter(move |a| a.category == category)
        .map(|a| a.name)
}
