use chrono::{DateTime, Utc};

pub const STAT_MIN: u8 = 0;
pub const STAT_MAX: u8 = 100;
pub const DEFAULT_STAT: u8 = 50;
pub const DEFAULT_NAME: &str = "Tomo";
pub(crate) const NAME_MAX: usize = 18;

pub const DEFAULT_FEED_AMOUNT: i64 = 20;
pub const DEFAULT_PLAY_MINUTES: i64 = 10;
pub const DEFAULT_SLEEP_HOURS: i64 = 2;
pub const DEFAULT_TICK_MINUTES: i64 = 60;

/// Neglect window for a pet with a care score of zero.
pub const MIN_NEGLECT_DAYS: f64 = 3.0;
/// Neglect window for a pet with a perfect care score.
pub const MAX_NEGLECT_DAYS: f64 = 30.0;

/// Clamps any intermediate value into the stat range.
pub(crate) fn clamp_stat(v: i64) -> u8 {
    v.clamp(i64::from(STAT_MIN), i64::from(STAT_MAX)) as u8
}

pub(crate) fn adjust(stat: u8, delta: i64) -> u8 {
    clamp_stat(i64::from(stat).saturating_add(delta))
}

/// Presentation hint for front ends choosing a sprite or face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mood {
    Dead,
    Sick,
    Sleepy,
    Hungry,
    Happy,
    Neutral,
}

/// The pet. Every bounded stat lives in `0..=100`; once `alive` is false the
/// whole value is frozen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pet {
    pub(crate) name: String,
    /// 0 = fully fed, 100 = starving.
    pub(crate) hunger: u8,
    pub(crate) happiness: u8,
    pub(crate) energy: u8,
    pub(crate) alive: bool,
    pub(crate) sick: bool,
    pub(crate) litter_dirt: u8,
    pub(crate) care_score: u8,
    pub(crate) cumulative_play_seconds: u64,
    pub(crate) last_cared: Option<DateTime<Utc>>,
    pub(crate) last_tick: Option<DateTime<Utc>>,
}

impl Default for Pet {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            hunger: DEFAULT_STAT,
            happiness: DEFAULT_STAT,
            energy: DEFAULT_STAT,
            alive: true,
            sick: false,
            litter_dirt: 0,
            care_score: DEFAULT_STAT,
            cumulative_play_seconds: 0,
            last_cared: None,
            last_tick: None,
        }
    }
}

impl Pet {
    pub fn named(name: &str) -> Self {
        let mut pet = Self::default();
        pet.set_name(name);
        pet
    }

    /// Builds a pet with caller-supplied needs, clamped into range.
    pub fn with_stats(name: &str, hunger: i64, happiness: i64, energy: i64) -> Self {
        Self {
            hunger: clamp_stat(hunger),
            happiness: clamp_stat(happiness),
            energy: clamp_stat(energy),
            ..Self::named(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hunger(&self) -> u8 {
        self.hunger
    }

    pub fn happiness(&self) -> u8 {
        self.happiness
    }

    pub fn energy(&self) -> u8 {
        self.energy
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_sick(&self) -> bool {
        self.sick
    }

    pub fn litter_dirt(&self) -> u8 {
        self.litter_dirt
    }

    pub fn care_score(&self) -> u8 {
        self.care_score
    }

    pub fn cumulative_play_seconds(&self) -> u64 {
        self.cumulative_play_seconds
    }

    pub fn last_cared(&self) -> Option<DateTime<Utc>> {
        self.last_cared
    }

    pub fn last_tick(&self) -> Option<DateTime<Utc>> {
        self.last_tick
    }

    /// Days of neglect this pet survives: 3 at care score 0, 30 at 100.
    pub fn death_threshold_days(&self) -> f64 {
        MIN_NEGLECT_DAYS + (f64::from(self.care_score) / 100.0) * (MAX_NEGLECT_DAYS - MIN_NEGLECT_DAYS)
    }

    /// Renames the pet. Blank names are ignored, long ones truncated.
    pub fn rename(&mut self, name: &str) -> bool {
        if !self.alive {
            return false;
        }
        self.set_name(name)
    }

    fn set_name(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.name = trimmed.chars().take(NAME_MAX).collect();
        true
    }

    pub fn mood(&self) -> Mood {
        if !self.alive {
            return Mood::Dead;
        }
        if self.sick {
            return Mood::Sick;
        }
        if self.energy < 20 {
            return Mood::Sleepy;
        }
        if self.hunger > 70 {
            return Mood::Hungry;
        }
        if self.happiness > 65 {
            return Mood::Happy;
        }
        Mood::Neutral
    }

    pub fn status(&self) -> String {
        let alive_text = if self.alive { "alive" } else { "dead" };
        let mut s = format!(
            "{} ({}) — Hunger: {}/100, Happiness: {}/100, Energy: {}/100, Care: {}/100, Litter: {}/100",
            self.name,
            alive_text,
            self.hunger,
            self.happiness,
            self.energy,
            self.care_score,
            self.litter_dirt
        );
        if self.sick {
            s.push_str(", sick");
        }
        s
    }
}
