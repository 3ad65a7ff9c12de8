use crate::model::Pet;
use std::time::Duration;

/// Pushes simulated time into a pet from a frame or timer loop.
///
/// Wall-clock time is accumulated and every whole `step` becomes
/// `minutes_per_step` simulated minutes. Those minutes are held back until a
/// full `batch_minutes` is pending, because [`Pet::tick`] truncates its
/// effects and a stream of five-minute ticks would otherwise never move a
/// stat. Use either this or [`Pet::tick_realtime`] for a given pet, not both.
#[derive(Clone, Debug)]
pub struct FixedStepDriver {
    step: Duration,
    minutes_per_step: i64,
    batch_minutes: i64,
    accum: Duration,
    pending_minutes: i64,
}

impl Default for FixedStepDriver {
    fn default() -> Self {
        // 5 s of wall clock per 5 simulated minutes, flushed hourly.
        Self::new(Duration::from_secs(5), 5, 60)
    }
}

impl FixedStepDriver {
    pub fn new(step: Duration, minutes_per_step: i64, batch_minutes: i64) -> Self {
        Self {
            step: step.max(Duration::from_millis(1)),
            minutes_per_step: minutes_per_step.max(1),
            batch_minutes: batch_minutes.max(1),
            accum: Duration::ZERO,
            pending_minutes: 0,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn pending_minutes(&self) -> i64 {
        self.pending_minutes
    }

    /// Feeds `real_dt` of wall-clock time in and returns how many ticks were
    /// applied to `pet`.
    pub fn advance(&mut self, pet: &mut Pet, real_dt: Duration) -> u32 {
        self.accum = self.accum.saturating_add(real_dt);
        while self.accum >= self.step {
            self.accum = self.accum.saturating_sub(self.step);
            self.pending_minutes = self.pending_minutes.saturating_add(self.minutes_per_step);
        }

        let mut ticks = 0;
        while self.pending_minutes >= self.batch_minutes {
            self.pending_minutes -= self.batch_minutes;
            if pet.is_alive() {
                pet.tick(self.batch_minutes);
                ticks += 1;
            }
        }
        ticks
    }
}
