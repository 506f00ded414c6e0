//! Pure display mappings. None of these affect game state; they turn
//! counters into the discrete buckets the screen shows.

/// Colour band of the accuracy bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Off,
    Red,
    Yellow,
    Green,
}

pub const ACCURACY_BAR_BLOCKS: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccuracyTier {
    pub lit: u8,
    pub band: Band,
}

impl AccuracyTier {
    /// Step table for the 8-block accuracy bar. The table is a convention,
    /// not a formula; keep it exactly as is.
    pub fn from_percent(percent: u32) -> Self {
        let (lit, band) = match percent {
            0 => (0, Band::Off),
            1..=18 => (1, Band::Red),
            19..=28 => (2, Band::Red),
            29..=38 => (3, Band::Red),
            39..=48 => (3, Band::Yellow),
            49..=58 => (4, Band::Yellow),
            59..=68 => (5, Band::Yellow),
            69..=78 => (5, Band::Green),
            79..=88 => (6, Band::Green),
            89..=98 => (7, Band::Green),
            99 => (7, Band::Green),
            _ => (8, Band::Green),
        };
        Self { lit, band }
    }

    /// Accuracy ratio in [0, 1]; the percentage is truncated, not rounded.
    pub fn from_ratio(ratio: f64) -> Self {
        let percent = (ratio.clamp(0.0, 1.0) * 100.0) as u32;
        Self::from_percent(percent)
    }
}

/// How loudly the combo counter is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboBanner {
    Hidden,
    Warm,
    Hot,
    Blazing,
    Rainbow,
}

impl ComboBanner {
    pub fn for_combo(combo: u32) -> Self {
        match combo {
            0..=1 => ComboBanner::Hidden,
            2..=5 => ComboBanner::Warm,
            6..=10 => ComboBanner::Hot,
            11..=15 => ComboBanner::Blazing,
            _ => ComboBanner::Rainbow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockPhase {
    Calm,
    Alarm,
    Urgent,
}

impl ClockPhase {
    pub fn for_countdown(remaining: u32, configured: u32) -> Self {
        if remaining > configured * 50 / 100 {
            ClockPhase::Calm
        } else if remaining > configured * 10 / 100 {
            ClockPhase::Alarm
        } else {
            ClockPhase::Urgent
        }
    }
}

/// End-of-game verdict shown on the game over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    NewRecord,
    Champion,
    Legend,
    Warrior,
    Newborn,
    FirstStep,
    KeepPractising,
    NotTrying,
}

impl Verdict {
    /// `high_score` is the record before this session is folded in.
    ///
    /// The rung offsets are `p % high`, not `p` percent of `high`, so a
    /// record above 75 gives thresholds of `high - p`.
    pub fn judge(total_score: u32, high_score: u32) -> Self {
        let total = i64::from(total_score);
        let high = i64::from(high_score);
        if total > high {
            return Verdict::NewRecord;
        }
        if total == high {
            return Verdict::Champion;
        }
        let ladder: [(i64, Verdict); 5] = [
            (5, Verdict::Legend),
            (15, Verdict::Warrior),
            (30, Verdict::Newborn),
            (50, Verdict::FirstStep),
            (75, Verdict::KeepPractising),
        ];
        ladder
            .iter()
            .find(|(p, _)| total > high - *p % high)
            .map(|(_, v)| *v)
            .unwrap_or(Verdict::NotTrying)
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Verdict::NewRecord => "Congratulations! You made a new high score",
            Verdict::Champion => "What a mighty TypeZenith Champion",
            Verdict::Legend => "Congrats for being one of TypeZenith's Legends",
            Verdict::Warrior => "What a truly TypeZenith Warrior",
            Verdict::Newborn => "New born future Champion",
            Verdict::FirstStep => "The Great First Step, keep going ^^",
            Verdict::KeepPractising => "Play more games to improve your skill",
            Verdict::NotTrying => "You are not even trying -_-",
        }
    }

    pub fn tagline(&self) -> Option<&'static str> {
        match self {
            Verdict::NewRecord | Verdict::Champion => Some("What a mighty TypeZenith Champion"),
            Verdict::Legend => Some("Almost beat the Champion"),
            Verdict::Warrior => Some("Keep going, you're close to being a Legend"),
            Verdict::Newborn => Some("Keep going, we all know that you are the chosen one"),
            _ => None,
        }
    }
}
