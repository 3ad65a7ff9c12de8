use crate::model::{adjust, Pet};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use log::{debug, info};

const FEED_CARE: u8 = 3;
const PLAY_CARE: u8 = 2;
const SLEEP_CARE: u8 = 1;
const CLEAN_CARE: u8 = 2;
const DISCIPLINE_CARE: u8 = 2;
const ATTENTION_CARE: u8 = 2;
const MEDICINE_CARE: u8 = 4;

const SICK_HUNGER: u8 = 90;
const SICK_ENERGY: u8 = 5;
const SICK_LITTER: u8 = 90;
const LITTER_FILTHY: u8 = 80;
const LITTER_DIRTY: u8 = 50;

/// A caring action, as issued by a front end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Feed(i64),
    Play(i64),
    Sleep(i64),
    Clean,
    Discipline,
    Attention,
    Medicine,
}

impl Action {
    pub fn verb(&self) -> &'static str {
        match self {
            Action::Feed(_) => "feed",
            Action::Play(_) => "play",
            Action::Sleep(_) => "sleep",
            Action::Clean => "clean",
            Action::Discipline => "discipline",
            Action::Attention => "attention",
            Action::Medicine => "medicine",
        }
    }
}

impl Pet {
    /// Applies `action`. Only `Play` can be refused; every other action
    /// returns true unless the pet is dead.
    pub fn apply(&mut self, action: &Action, now: DateTime<Utc>) -> bool {
        match *action {
            Action::Feed(amount) => self.feed(amount, now),
            Action::Play(minutes) => return self.play(minutes, now),
            Action::Sleep(hours) => self.sleep(hours, now),
            Action::Clean => self.clean_litter(now),
            Action::Discipline => self.discipline(now),
            Action::Attention => self.give_attention(now),
            Action::Medicine => self.administer_medicine(now),
        }
        self.alive
    }

    pub fn feed(&mut self, amount: i64, now: DateTime<Utc>) {
        if !self.still_alive(now) {
            return;
        }
        self.hunger = adjust(self.hunger, amount.saturating_neg());
        self.happiness = adjust(self.happiness, 5);
        debug!("{} fed {amount}: hunger={}", self.name, self.hunger);
        self.record_caring_event(FEED_CARE, now);
    }

    /// Returns false, leaving the pet untouched, when it is dead or has less
    /// energy than the session costs.
    pub fn play(&mut self, minutes: i64, now: DateTime<Utc>) -> bool {
        if !self.still_alive(now) {
            return false;
        }
        let cost = minutes.div_euclid(2).max(1);
        if i64::from(self.energy) < cost {
            debug!("{} too tired to play (energy={}, cost={cost})", self.name, self.energy);
            return false;
        }
        self.happiness = adjust(self.happiness, minutes.div_euclid(2));
        self.energy = adjust(self.energy, -cost);
        self.hunger = adjust(self.hunger, minutes.div_euclid(3));
        self.add_play_seconds(minutes.saturating_mul(60));
        debug!("{} played {minutes}m: energy={}", self.name, self.energy);
        self.record_caring_event(PLAY_CARE, now);
        true
    }

    /// Logs play time. Negative amounts are ignored so the counter never
    /// goes backwards.
    pub fn add_play_seconds(&mut self, seconds: i64) {
        if !self.alive {
            return;
        }
        self.cumulative_play_seconds = self
            .cumulative_play_seconds
            .saturating_add(seconds.max(0) as u64);
    }

    pub fn sleep(&mut self, hours: i64, now: DateTime<Utc>) {
        if !self.still_alive(now) {
            return;
        }
        self.energy = adjust(self.energy, hours.saturating_mul(25));
        self.hunger = adjust(self.hunger, hours.saturating_mul(5));
        debug!("{} slept {hours}h: energy={}", self.name, self.energy);
        self.record_caring_event(SLEEP_CARE, now);
    }

    pub fn clean_litter(&mut self, now: DateTime<Utc>) {
        if !self.still_alive(now) {
            return;
        }
        self.litter_dirt = 0;
        self.happiness = adjust(self.happiness, 8);
        self.record_caring_event(CLEAN_CARE, now);
    }

    /// Costs happiness but still resets the neglect clock.
    pub fn discipline(&mut self, now: DateTime<Utc>) {
        if !self.still_alive(now) {
            return;
        }
        self.happiness = adjust(self.happiness, -5);
        self.record_caring_event(DISCIPLINE_CARE, now);
    }

    pub fn give_attention(&mut self, now: DateTime<Utc>) {
        if !self.still_alive(now) {
            return;
        }
        self.happiness = adjust(self.happiness, 8);
        self.energy = adjust(self.energy, -1);
        self.record_caring_event(ATTENTION_CARE, now);
    }

    pub fn administer_medicine(&mut self, now: DateTime<Utc>) {
        if !self.still_alive(now) {
            return;
        }
        if self.sick {
            info!("{} is cured", self.name);
        }
        self.sick = false;
        self.energy = adjust(self.energy, 15);
        self.happiness = adjust(self.happiness, 5);
        self.record_caring_event(MEDICINE_CARE, now);
    }

    /// Passive decay over `minutes` of simulated time. Durations below one
    /// minute count as one minute; each effect is truncated toward zero, so
    /// short ticks may change nothing.
    pub fn tick(&mut self, minutes: i64) {
        if !self.alive {
            return;
        }
        let hours = minutes.max(1) as f64 / 60.0;
        let scaled = |rate: f64| (rate * hours) as i64;

        self.hunger = adjust(self.hunger, scaled(5.0));
        self.happiness = adjust(self.happiness, -scaled(2.0));
        self.energy = adjust(self.energy, -scaled(5.0));
        self.litter_dirt = adjust(self.litter_dirt, scaled(4.0));

        if self.litter_dirt >= LITTER_FILTHY {
            self.happiness = adjust(self.happiness, -scaled(3.0));
        } else if self.litter_dirt >= LITTER_DIRTY {
            self.happiness = adjust(self.happiness, -scaled(1.0));
        }

        if !self.sick
            && (self.hunger >= SICK_HUNGER
                || self.energy <= SICK_ENERGY
                || self.litter_dirt >= SICK_LITTER)
        {
            self.sick = true;
            info!(
                "{} fell sick (hunger={}, energy={}, litter={})",
                self.name, self.hunger, self.energy, self.litter_dirt
            );
        }
        debug!("{} ticked {minutes}m", self.name);
    }

    /// Catches the simulation up to `now`. A pet that was never ticked is
    /// only stamped; otherwise the whole minutes since the last stamp are
    /// applied as a single tick.
    pub fn tick_realtime(&mut self, now: DateTime<Utc>) {
        if !self.alive {
            return;
        }
        if let Some(last) = self.last_tick {
            let elapsed = (now - last).num_minutes();
            if elapsed > 0 {
                self.tick(elapsed);
            }
        }
        self.last_tick = Some(now);
        self.evaluate_mortality(now);
    }

    pub(crate) fn record_caring_event(&mut self, points: u8, now: DateTime<Utc>) {
        if !self.alive {
            return;
        }
        self.care_score = adjust(self.care_score, i64::from(points));
        self.last_cared = Some(now);
        self.evaluate_mortality(now);
    }

    /// Kills the pet once the time since it was last cared for reaches its
    /// neglect window. A pet that was never cared for starts its window now.
    pub fn evaluate_mortality(&mut self, now: DateTime<Utc>) {
        if !self.alive {
            return;
        }
        if self.last_cared.is_none() {
            self.last_cared = Some(now);
            return;
        }
        if self.neglected(now) {
            self.die_of_neglect(now);
        }
    }

    /// True once the neglect window has run out. A pet that was never cared
    /// for is still in its grace period.
    fn neglected(&self, now: DateTime<Utc>) -> bool {
        let Some(last) = self.last_cared else {
            return false;
        };
        let threshold_ms = self.death_threshold_days() * 24.0 * 3600.0 * 1000.0;
        now - last >= ChronoDuration::milliseconds(threshold_ms as i64)
    }

    fn die_of_neglect(&mut self, now: DateTime<Utc>) {
        self.alive = false;
        if let Some(last) = self.last_cared {
            info!(
                "{} died of neglect after {:.1} days (care score {})",
                self.name,
                (now - last).num_seconds() as f64 / 86_400.0,
                self.care_score
            );
        }
    }

    /// Gate run before every action. Only kills; never stamps the grace
    /// period, so a refused action leaves the pet untouched.
    fn still_alive(&mut self, now: DateTime<Utc>) -> bool {
        if self.alive && self.neglected(now) {
            self.die_of_neglect(now);
        }
        self.alive
    }
}
