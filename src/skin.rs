use crate::dice::Dice;

pub const FAMILY_COUNT: usize = 7;
pub const BACKDROP_COUNT: usize = 2;

/// Skin used whenever the family cannot be determined.
pub const BASELINE_SKIN: &str = "Building1";

/// The first block dropped in a session. Its trailing digit selects the
/// skin family for the rest of the tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialBlock(u8);

impl InitialBlock {
    /// `family` is 1-based; values outside 1..=7 are clamped.
    pub fn new(family: u8) -> Self {
        Self(family.clamp(1, FAMILY_COUNT as u8))
    }

    pub fn roll<D: Dice + ?Sized>(dice: &mut D) -> Self {
        Self::new(dice.roll(FAMILY_COUNT) as u8 + 1)
    }

    pub fn family(&self) -> u8 {
        self.0
    }

    pub fn name(&self) -> String {
        format!("initialBlock{}", self.0)
    }
}

impl Default for InitialBlock {
    fn default() -> Self {
        Self(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum TowerTier {
    Building,
    Intermediate,
    Advanced,
    Pro,
    Elite,
    Master,
}

impl TowerTier {
    /// Tier of the block at `index`; index 0 is the initial block and is
    /// reported as `Building`.
    pub fn for_index(index: usize) -> Self {
        match index {
            5..=9 => TowerTier::Intermediate,
            10..=14 => TowerTier::Advanced,
            15..=19 => TowerTier::Pro,
            20..=24 => TowerTier::Elite,
            25.. => TowerTier::Master,
            _ => TowerTier::Building,
        }
    }

    fn asset_prefix(&self) -> &'static str {
        match self {
            TowerTier::Building => "Building",
            TowerTier::Intermediate => "ascendToIntermediet",
            TowerTier::Advanced => "ascendToAdvance",
            TowerTier::Pro => "ascendToPro",
            TowerTier::Elite => "ascendToElite",
            TowerTier::Master => "ascendToMaster",
        }
    }
}

/// Skin name for the tower block at `index`, given the name of the
/// session's initial block.
pub fn skin_name(initial: Option<&str>, index: usize) -> String {
    let Some(initial) = initial else {
        return BASELINE_SKIN.to_string();
    };
    if index == 0 {
        return initial.to_string();
    }
    match initial.chars().last().and_then(|c| c.to_digit(10)) {
        Some(digit @ 1..=7) => format!("{}{}", TowerTier::for_index(index).asset_prefix(), digit),
        _ => BASELINE_SKIN.to_string(),
    }
}

/// Tower blocks shrink as it grows: 1 up to 4 blocks, then one step every
/// five blocks, capped at 5.
pub fn scale_factor(tower_len: usize) -> usize {
    (tower_len / 5 + 1).min(5)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Backdrop(u8);

impl Backdrop {
    pub fn roll<D: Dice + ?Sized>(dice: &mut D) -> Self {
        Self(dice.roll(BACKDROP_COUNT) as u8)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    #[test]
    fn initial_block_names() {
        assert_eq!(InitialBlock::new(3).name(), "initialBlock3");
        assert_eq!(InitialBlock::new(0).family(), 1);
        assert_eq!(InitialBlock::new(12).family(), 7);
    }

    #[test]
    fn initial_block_roll_is_one_based() {
        let mut dice = ScriptedDice::new([0, 6]);
        assert_eq!(InitialBlock::roll(&mut dice).family(), 1);
        assert_eq!(InitialBlock::roll(&mut dice).family(), 7);
    }

    #[test]
    fn first_block_uses_initial_skin() {
        assert_eq!(skin_name(Some("initialBlock4"), 0), "initialBlock4");
    }

    #[test]
    fn tiers_follow_index_bands() {
        let initial = Some("initialBlock2");
        assert_eq!(skin_name(initial, 1), "Building2");
        assert_eq!(skin_name(initial, 4), "Building2");
        assert_eq!(skin_name(initial, 5), "ascendToIntermediet2");
        assert_eq!(skin_name(initial, 10), "ascendToAdvance2");
        assert_eq!(skin_name(initial, 15), "ascendToPro2");
        assert_eq!(skin_name(initial, 24), "ascendToElite2");
        assert_eq!(skin_name(initial, 25), "ascendToMaster2");
        assert_eq!(skin_name(initial, 90), "ascendToMaster2");
    }

    #[test]
    fn unparseable_suffix_falls_back_to_baseline() {
        assert_eq!(skin_name(None, 3), BASELINE_SKIN);
        assert_eq!(skin_name(Some("initialBlock"), 3), BASELINE_SKIN);
        assert_eq!(skin_name(Some("initialBlock9"), 3), BASELINE_SKIN);
        assert_eq!(skin_name(Some("initialBlock0"), 7), BASELINE_SKIN);
    }

    #[test]
    fn scale_factor_steps_every_five_blocks() {
        assert_eq!(scale_factor(0), 1);
        assert_eq!(scale_factor(4), 1);
        assert_eq!(scale_factor(5), 2);
        assert_eq!(scale_factor(19), 4);
        assert_eq!(scale_factor(20), 5);
        assert_eq!(scale_factor(400), 5);
    }

    #[test]
    fn backdrop_has_two_variants() {
        let mut dice = ScriptedDice::new([1, 2]);
        assert_eq!(Backdrop::roll(&mut dice).index(), 1);
        assert_eq!(Backdrop::roll(&mut dice).index(), 0);
    }
}
