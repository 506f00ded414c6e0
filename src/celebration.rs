use rand::seq::SliceRandom;
use rand::Rng;

use crate::runtime::FRAME_INTERVAL;

const BANNERS: [&str; 4] = ["NEW RECORD!", "ZENITH!", "CHAMPION!", "TOP OF THE TOWER!"];
const SPARK_SYMBOLS: [char; 6] = ['*', '+', '✦', '✧', '·', '★'];
const SPARK_COLORS: usize = 7;
const GRAVITY: f64 = 15.0;

/// One animated glyph. Letter sparks fly to a slot in the banner and stay
/// there; loose sparks fall under gravity.
#[derive(Debug, Clone)]
pub struct Spark {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
    pub target: Option<(f64, f64)>,
}

impl Spark {
    fn loose<R: Rng>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            vel_x: rng.gen_range(-3.0..3.0),
            vel_y: rng.gen_range(-4.0..-1.0),
            symbol: *SPARK_SYMBOLS.choose(rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..SPARK_COLORS),
            age: 0.0,
            max_age: rng.gen_range(2.0..4.0),
            target: None,
        }
    }

    fn letter<R: Rng>(from: (f64, f64), to: (f64, f64), symbol: char, rng: &mut R) -> Self {
        Self {
            x: from.0,
            y: from.1,
            vel_x: to.0 - from.0,
            vel_y: to.1 - from.1,
            symbol,
            color_index: rng.gen_range(0..SPARK_COLORS),
            age: 0.0,
            max_age: rng.gen_range(3.0..5.0),
            target: Some(to),
        }
    }

    pub fn is_letter(&self) -> bool {
        self.target.is_some()
    }

    /// Advance by `dt` seconds; false once the spark has burnt out.
    fn update(&mut self, dt: f64) -> bool {
        match self.target {
            Some((tx, ty)) => {
                let distance = ((tx - self.x).powi(2) + (ty - self.y).powi(2)).sqrt();
                if distance > 1.0 {
                    self.x += self.vel_x * dt;
                    self.y += self.vel_y * dt;
                    self.vel_x *= 0.95;
                    self.vel_y *= 0.95;
                } else {
                    self.x = tx;
                    self.y = ty;
                    self.vel_x = 0.0;
                    self.vel_y = 0.0;
                }
            }
            None => {
                self.x += self.vel_x * dt;
                self.y += self.vel_y * dt;
                self.vel_y += GRAVITY * dt;
            }
        }
        self.age += dt;
        self.age < self.max_age
    }
}

/// Particle burst shown over the game over screen after a new high score.
/// Advanced by frames, never by wall clock.
#[derive(Debug)]
pub struct Celebration {
    sparks: Vec<Spark>,
    frames_left: u32,
    width: f64,
    height: f64,
}

impl Celebration {
    /// Three seconds of frames.
    pub const DURATION_FRAMES: u32 = 30;

    pub fn new() -> Self {
        Self {
            sparks: Vec::new(),
            frames_left: 0,
            width: 80.0,
            height: 24.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.frames_left > 0
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    pub fn start<R: Rng>(&mut self, width: u16, height: u16, rng: &mut R) {
        self.sparks.clear();
        self.frames_left = Self::DURATION_FRAMES;
        self.width = f64::from(width);
        self.height = f64::from(height);

        let center = (self.width / 2.0, self.height / 2.0);
        let banner = *BANNERS.choose(rng).unwrap_or(&BANNERS[0]);
        self.spell(banner, center, rng);

        for _ in 0..25 {
            let x = center.0 + rng.gen_range(-15.0..15.0);
            let y = center.1 + rng.gen_range(-8.0..8.0);
            self.sparks.push(Spark::loose(x, y, rng));
        }
        tracing::debug!(banner, sparks = self.sparks.len(), "celebration started");
    }

    fn spell<R: Rng>(&mut self, text: &str, center: (f64, f64), rng: &mut R) {
        let spacing = 2.0;
        let span = (text.chars().count() as f64 - 1.0) * spacing;
        let left = center.0 - span / 2.0;
        for (i, ch) in text.chars().enumerate().filter(|(_, c)| *c != ' ') {
            let to = (left + i as f64 * spacing, center.1 - 2.0);
            let from = (
                center.0 + rng.gen_range(-10.0..10.0),
                center.1 + rng.gen_range(-5.0..5.0),
            );
            self.sparks.push(Spark::letter(from, to, ch, rng));
        }
    }

    /// Advance one frame.
    pub fn step(&mut self) {
        if self.frames_left == 0 {
            return;
        }
        self.frames_left -= 1;
        if self.frames_left == 0 {
            self.sparks.clear();
            return;
        }

        let dt = FRAME_INTERVAL.as_secs_f64();
        let (width, height) = (self.width, self.height);
        self.sparks.retain_mut(|spark| {
            let alive = spark.update(dt);
            if spark.is_letter() {
                return alive;
            }
            let margin = 5.0;
            let gone = spark.y > height + margin || spark.x < -margin || spark.x > width + margin;
            alive && !gone
        });
    }

    pub fn stop(&mut self) {
        self.frames_left = 0;
        self.sparks.clear();
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn loose_spark_falls() {
        let mut spark = Spark::loose(10.0, 10.0, &mut rng());
        let vel_y = spark.vel_y;
        assert!(spark.update(0.1));
        assert!(spark.vel_y > vel_y);
        assert_ne!(spark.y, 10.0);
    }

    #[test]
    fn letter_spark_settles_on_its_slot() {
        let mut spark = Spark::letter((0.0, 0.0), (10.0, 5.0), 'Z', &mut rng());
        assert!(spark.is_letter());
        for _ in 0..60 {
            spark.update(0.1);
        }
        let distance = ((10.0 - spark.x).powi(2) + (5.0 - spark.y).powi(2)).sqrt();
        assert!(distance < 5.0);
    }

    #[test]
    fn idle_until_started() {
        let mut celebration = Celebration::new();
        assert!(!celebration.is_active());
        celebration.step();
        assert!(celebration.sparks().is_empty());
    }

    #[test]
    fn start_spells_a_banner_with_loose_sparks() {
        let mut celebration = Celebration::new();
        celebration.start(80, 24, &mut rng());
        assert!(celebration.is_active());
        assert!(celebration.sparks().iter().any(Spark::is_letter));
        assert!(celebration.sparks().iter().any(|s| !s.is_letter()));
    }

    #[test]
    fn runs_for_a_fixed_number_of_frames() {
        let mut celebration = Celebration::new();
        celebration.start(80, 24, &mut rng());
        for _ in 0..Celebration::DURATION_FRAMES - 1 {
            celebration.step();
        }
        assert!(celebration.is_active());
        celebration.step();
        assert!(!celebration.is_active());
        assert!(celebration.sparks().is_empty());
    }

    #[test]
    fn sparks_leaving_the_screen_are_dropped() {
        let mut celebration = Celebration::new();
        let mut rng = rng();
        celebration.start(20, 10, &mut rng);
        celebration.sparks.push(Spark::loose(100.0, 100.0, &mut rng));
        for _ in 0..10 {
            celebration.step();
        }
        for spark in celebration.sparks().iter().filter(|s| !s.is_letter()) {
            assert!(spark.y <= 15.0 && spark.x >= -5.0 && spark.x <= 25.0);
        }
    }

    #[test]
    fn stop_clears_everything() {
        let mut celebration = Celebration::new();
        celebration.start(80, 24, &mut rng());
        celebration.stop();
        assert!(!celebration.is_active());
        assert!(celebration.sparks().is_empty());
    }
}
