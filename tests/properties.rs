//! Property tests over arbitrary action and tick sequences.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use tomodachi::{Action, Pet, Snapshot};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

#[derive(Debug, Clone)]
enum Step {
    Act(Action),
    Tick(i64),
    Realtime(i64),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (-500i64..500).prop_map(Action::Feed),
        (-200i64..400).prop_map(Action::Play),
        (-10i64..20).prop_map(Action::Sleep),
        Just(Action::Clean),
        Just(Action::Discipline),
        Just(Action::Attention),
        Just(Action::Medicine),
    ]
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        action().prop_map(Step::Act),
        (-120i64..5000).prop_map(Step::Tick),
        (0i64..600).prop_map(Step::Realtime),
    ]
}

fn in_bounds(pet: &Pet) -> bool {
    [
        pet.hunger(),
        pet.happiness(),
        pet.energy(),
        pet.litter_dirt(),
        pet.care_score(),
    ]
    .iter()
    .all(|v| *v <= 100)
}

/// Runs `steps`, advancing the clock a few minutes per step. Returns the
/// final clock.
fn run(pet: &mut Pet, steps: &[Step], mut on_step: impl FnMut(&Pet)) -> DateTime<Utc> {
    let mut now = t0();
    for s in steps {
        now = now + Duration::minutes(3);
        match s {
            Step::Act(a) => {
                pet.apply(a, now);
            }
            Step::Tick(m) => pet.tick(*m),
            Step::Realtime(m) => {
                now = now + Duration::minutes(*m);
                pet.tick_realtime(now);
            }
        }
        on_step(pet);
    }
    now
}

proptest! {
    #[test]
    fn stats_stay_in_bounds(
        hunger in -50i64..150, happiness in -50i64..150, energy in -50i64..150,
        steps in proptest::collection::vec(step(), 0..60),
    ) {
        let mut pet = Pet::with_stats("Prop", hunger, happiness, energy);
        prop_assert!(in_bounds(&pet));
        let mut ok = true;
        run(&mut pet, &steps, |p| ok &= in_bounds(p));
        prop_assert!(ok);
    }

    #[test]
    fn dead_pet_never_changes(steps in proptest::collection::vec(step(), 1..40)) {
        let mut pet = Pet::from_snapshot(
            Snapshot { alive: false, ..Snapshot::default() },
            t0(),
        );
        let before = pet.clone();
        run(&mut pet, &steps, |_| {});
        prop_assert_eq!(pet, before);
    }

    #[test]
    fn sleep_is_monotone_in_hours(
        hunger in 0i64..=100, energy in 0i64..=100, h in 0i64..10,
    ) {
        let mut short = Pet::with_stats("Zz", hunger, 50, energy);
        let mut long = short.clone();
        short.sleep(h, t0());
        long.sleep(h + 1, t0());
        prop_assert!(long.energy() >= short.energy());
        prop_assert!(long.hunger() >= short.hunger());
    }

    #[test]
    fn failed_play_changes_nothing(energy in 0i64..=100, minutes in 0i64..400) {
        let mut pet = Pet::with_stats("Tired", 50, 50, energy);
        let before = pet.clone();
        if !pet.play(minutes, t0()) {
            prop_assert!(pet.last_cared().is_none());
            prop_assert_eq!(pet, before);
        } else {
            prop_assert!(pet.energy() < before.energy());
        }
    }

    #[test]
    fn snapshot_round_trip(steps in proptest::collection::vec(step(), 0..40)) {
        let mut pet = Pet::named("Round");
        pet.feed(1, t0());
        let now = run(&mut pet, &steps, |_| {});
        pet.evaluate_mortality(now);

        let json = serde_json::to_string(&pet.to_snapshot()).unwrap();
        let snapshot: Snapshot = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(Pet::from_snapshot(snapshot, now), pet);
    }
}
