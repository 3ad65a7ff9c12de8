//! Flat key-value record of a [`Pet`].
//!
//! Loading is deliberately forgiving: absent keys take the attribute's
//! default, values of the wrong shape are defaulted instead of failing the
//! whole record, and unknown keys are ignored. This keeps save files written
//! by older builds loadable.

use crate::model::{clamp_stat, Pet, DEFAULT_NAME, DEFAULT_STAT};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_name", deserialize_with = "lenient::name")]
    pub name: String,
    #[serde(default = "default_stat", deserialize_with = "lenient::mid_stat")]
    pub hunger: u8,
    #[serde(default = "default_stat", deserialize_with = "lenient::mid_stat")]
    pub happiness: u8,
    #[serde(default = "default_stat", deserialize_with = "lenient::mid_stat")]
    pub energy: u8,
    #[serde(default = "default_alive", deserialize_with = "lenient::alive")]
    pub alive: bool,
    #[serde(default, deserialize_with = "lenient::sick")]
    pub sick: bool,
    #[serde(default, deserialize_with = "lenient::zero_stat")]
    pub litter_dirt: u8,
    #[serde(default = "default_stat", deserialize_with = "lenient::mid_stat")]
    pub care_score: u8,
    #[serde(default, deserialize_with = "lenient::counter")]
    pub cumulative_play_seconds: u64,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub last_cared: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub last_tick: Option<String>,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_stat() -> u8 {
    DEFAULT_STAT
}

fn default_alive() -> bool {
    true
}

impl Default for Snapshot {
    fn default() -> Self {
        Pet::default().to_snapshot()
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Accepts RFC 3339 and offset-less ISO-8601 (read as UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

impl Pet {
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            name: self.name.clone(),
            hunger: self.hunger,
            happiness: self.happiness,
            energy: self.energy,
            alive: self.alive,
            sick: self.sick,
            litter_dirt: self.litter_dirt,
            care_score: self.care_score,
            cumulative_play_seconds: self.cumulative_play_seconds,
            last_cared: self.last_cared.map(format_timestamp),
            last_tick: self.last_tick.map(format_timestamp),
        }
    }

    /// Rebuilds a pet and immediately checks whether it died of neglect
    /// while it was stored.
    pub fn from_snapshot(snapshot: Snapshot, now: DateTime<Utc>) -> Self {
        let mut pet = Pet {
            name: snapshot.name,
            hunger: clamp_stat(i64::from(snapshot.hunger)),
            happiness: clamp_stat(i64::from(snapshot.happiness)),
            energy: clamp_stat(i64::from(snapshot.energy)),
            alive: snapshot.alive,
            sick: snapshot.sick,
            litter_dirt: clamp_stat(i64::from(snapshot.litter_dirt)),
            care_score: clamp_stat(i64::from(snapshot.care_score)),
            cumulative_play_seconds: snapshot.cumulative_play_seconds,
            last_cared: read_timestamp("last_cared", snapshot.last_cared.as_deref()),
            last_tick: read_timestamp("last_tick", snapshot.last_tick.as_deref()),
        };
        pet.evaluate_mortality(now);
        pet
    }
}

fn read_timestamp(field: &str, raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    let parsed = parse_timestamp(raw);
    if parsed.is_none() {
        warn!("ignoring malformed {field} timestamp {raw:?}");
    }
    parsed
}

mod lenient {
    use super::{clamp_stat, DEFAULT_NAME, DEFAULT_STAT};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn int(v: &Value) -> Option<i64> {
        match v {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    fn flag(v: &Value) -> Option<bool> {
        match v {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|f| f != 0.0),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Some(true),
                "false" | "0" | "no" | "" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub(super) fn name<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => s,
            _ => DEFAULT_NAME.to_string(),
        })
    }

    pub(super) fn mid_stat<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(int(&v).map(clamp_stat).unwrap_or(DEFAULT_STAT))
    }

    pub(super) fn zero_stat<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(int(&v).map(clamp_stat).unwrap_or(0))
    }

    pub(super) fn counter<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        let v = Value::deserialize(d)?;
        let n = match &v {
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
            other => int(other).map(|i| i.max(0) as u64),
        };
        Ok(n.unwrap_or(0))
    }

    pub(super) fn alive<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(flag(&v).unwrap_or(true))
    }

    pub(super) fn sick<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(flag(&v).unwrap_or(false))
    }

    pub(super) fn timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_record_yields_defaults() {
        let snap: Snapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snap, Snapshot::default());
        let pet = Pet::from_snapshot(snap, t0());
        assert!(pet.is_alive());
        assert_eq!(pet.name(), "Tomo");
        assert_eq!(pet.last_cared(), Some(t0()));
    }

    #[test]
    fn legacy_record_with_extra_keys() {
        let json = r#"{
            "name": "Old", "hunger": 30, "happiness": 70, "energy": 90,
            "alive": true, "death_threshold_days": 3, "cumulative_play_seconds": 1200
        }"#;
        let pet = Pet::from_snapshot(serde_json::from_str(json).unwrap(), t0());
        assert_eq!(pet.name(), "Old");
        assert_eq!(pet.hunger(), 30);
        assert_eq!(pet.cumulative_play_seconds(), 1200);
        assert_eq!(pet.care_score(), 50);
        assert_eq!(pet.litter_dirt(), 0);
        assert!(!pet.is_sick());
    }

    #[test]
    fn wrong_shapes_are_defaulted() {
        let json = r#"{
            "name": 7, "hunger": "oops", "happiness": 250, "energy": -4,
            "alive": "maybe", "sick": null, "care_score": 12.9,
            "cumulative_play_seconds": -60, "last_cared": 42
        }"#;
        let snap: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.name, "Tomo");
        assert_eq!(snap.hunger, 50);
        assert_eq!(snap.happiness, 100);
        assert_eq!(snap.energy, 0);
        assert!(snap.alive);
        assert!(!snap.sick);
        assert_eq!(snap.care_score, 12);
        assert_eq!(snap.cumulative_play_seconds, 0);
        assert_eq!(snap.last_cared, None);
    }

    #[test]
    fn malformed_timestamp_keeps_pet_alive() {
        let snap = Snapshot {
            care_score: 0,
            last_cared: Some("the day before yesterday".to_string()),
            ..Snapshot::default()
        };
        let pet = Pet::from_snapshot(snap, t0());
        assert!(pet.is_alive());
        assert_eq!(pet.last_cared(), Some(t0()));
    }

    #[test]
    fn stale_save_loads_dead() {
        let snap = Snapshot {
            care_score: 0,
            last_cared: Some(format_timestamp(t0())),
            ..Snapshot::default()
        };
        let pet = Pet::from_snapshot(snap, t0() + Duration::days(4));
        assert!(!pet.is_alive());
    }

    #[test]
    fn parses_python_style_isoformat() {
        let aware = parse_timestamp("2024-03-01T12:00:00.250000+00:00").unwrap();
        assert_eq!(aware, t0() + Duration::milliseconds(250));
        let naive = parse_timestamp("2024-03-01T12:00:00").unwrap();
        assert_eq!(naive, t0());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn timestamps_keep_subsecond_precision() {
        let at = t0() + Duration::nanoseconds(123_456_789);
        assert_eq!(parse_timestamp(&format_timestamp(at)), Some(at));
    }
}
