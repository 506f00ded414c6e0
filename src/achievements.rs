use serde::{Deserialize, Serialize};

pub const ACHIEVEMENT_COUNT: usize = 10;

/// Condition under which an achievement unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unlock {
    ComboAtLeast(u32),
    ComboAbove(u32),
    TotalAbove(u32),
}

impl Unlock {
    pub fn holds(&self, combo: u32, total_score: u32) -> bool {
        match *self {
            Unlock::ComboAtLeast(n) => combo >= n,
            Unlock::ComboAbove(n) => combo > n,
            Unlock::TotalAbove(n) => total_score > n,
        }
    }
}

struct Definition {
    title: &'static str,
    icon: &'static str,
    description: &'static str,
    unlock: Unlock,
}

// Descriptions are player-facing copy. Id 5 says 250 while the rule checks
// 300; the rule wins.
const DEFINITIONS: [Definition; ACHIEVEMENT_COUNT] = [
    Definition {
        title: "The Great First Step",
        icon: "figure.stair.stepper",
        description: "reach Combo x3 till end game",
        unlock: Unlock::ComboAtLeast(3),
    },
    Definition {
        title: "Typing Machine",
        icon: "bag.circle",
        description: "reach Combo x7 till end game",
        unlock: Unlock::ComboAtLeast(7),
    },
    Definition {
        title: "Legendary",
        icon: "bolt.fill",
        description: "reach Combo x10 till end game",
        unlock: Unlock::ComboAtLeast(9),
    },
    Definition {
        title: "God hand",
        icon: "hand.raised.brakesignal",
        description: "reach Combo x15 till end game",
        unlock: Unlock::ComboAbove(15),
    },
    Definition {
        title: "Zenith Warrior",
        icon: "shield.checkered",
        description: "reach more than 150 total score",
        unlock: Unlock::TotalAbove(150),
    },
    Definition {
        title: "Zenith Elite",
        icon: "medal.fill",
        description: "reach more than 250 total score",
        unlock: Unlock::TotalAbove(300),
    },
    Definition {
        title: "Zenith Master",
        icon: "trophy.fill",
        description: "reach more than 500 total score",
        unlock: Unlock::TotalAbove(500),
    },
    Definition {
        title: "Zenith Legend",
        icon: "flag.filled.and.flag.crossed",
        description: "reach more than 750 total score",
        unlock: Unlock::TotalAbove(750),
    },
    Definition {
        title: "Zenith Champion",
        icon: "crown.fill",
        description: "reach more than 1000 total score",
        unlock: Unlock::TotalAbove(1000),
    },
    Definition {
        title: "God Like",
        icon: "sparkle",
        description: "reach more than 1500 total score",
        unlock: Unlock::TotalAbove(1500),
    },
];

/// One persisted achievement record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: usize,
    pub title: String,
    pub unlocked: bool,
    pub icon: String,
    pub description: String,
}

impl Achievement {
    pub fn unlock_rule(&self) -> Option<Unlock> {
        DEFINITIONS.get(self.id).map(|d| d.unlock)
    }
}

/// The ten predefined achievements, all locked.
pub fn defaults() -> Vec<Achievement> {
    DEFINITIONS
        .iter()
        .enumerate()
        .map(|(id, d)| Achievement {
            id,
            title: d.title.to_string(),
            unlocked: false,
            icon: d.icon.to_string(),
            description: d.description.to_string(),
        })
        .collect()
}

/// Overlay stored unlock flags onto the defaults by id. Unknown ids and
/// missing entries are ignored, so the result always has ten entries.
pub fn merge(stored: &[Achievement]) -> Vec<Achievement> {
    let mut list = defaults();
    for record in stored.iter().filter(|r| r.unlocked) {
        if let Some(slot) = list.get_mut(record.id) {
            slot.unlocked = true;
        }
    }
    list
}

/// Decode a stored record list; `None` if the payload is not a list of
/// records.
pub fn decode(payload: &str) -> Option<Vec<Achievement>> {
    serde_json::from_str::<Vec<Achievement>>(payload)
        .ok()
        .map(|stored| merge(&stored))
}

pub fn encode(list: &[Achievement]) -> Result<String, serde_json::Error> {
    serde_json::to_string(list)
}

/// Unlock every achievement whose rule holds. Returns the ids unlocked by
/// this call; already unlocked entries are never touched.
pub fn evaluate(list: &mut [Achievement], combo: u32, total_score: u32) -> Vec<usize> {
    let mut fresh = Vec::new();
    for achievement in list.iter_mut().filter(|a| !a.unlocked) {
        if let Some(rule) = achievement.unlock_rule() {
            if rule.holds(combo, total_score) {
                achievement.unlocked = true;
                fresh.push(achievement.id);
            }
        }
    }
    fresh
}
