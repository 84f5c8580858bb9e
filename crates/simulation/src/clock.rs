//! Simulated facility wall clock.
//!
//! One `FixedUpdate` tick advances the clock by one simulated minute at 1x
//! speed (speed only rescales the fixed timestep, so each tick always
//! advances the same amount of facility time). `now()` is the single
//! deterministic "current time" reference used by alert derivation and
//! report generation stamps.

use bevy::prelude::*;
use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Minutes in one facility day.
const MINUTES_PER_DAY: u64 = 24 * 60;

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct FacilityClock {
    /// Real-world timestamp of demo start (midday, so the seeded morning
    /// collection runs already have a few hours of age).
    pub epoch: DateTime<Utc>,
    /// Simulated minutes elapsed since the epoch.
    pub elapsed_minutes: u64,
    pub speed: f32,
    pub paused: bool,
}

impl Default for FacilityClock {
    fn default() -> Self {
        Self {
            epoch: demo_epoch(),
            elapsed_minutes: 0,
            speed: 1.0,
            paused: false,
        }
    }
}

/// 2025-11-04 12:00 UTC, the collection day of the seeded demo batches.
pub fn demo_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 4, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

impl FacilityClock {
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        self.elapsed_minutes += 1;
    }

    /// Current simulated facility time.
    pub fn now(&self) -> DateTime<Utc> {
        self.epoch + Duration::minutes(self.elapsed_minutes as i64)
    }

    /// Demo day counter, starting at 1.
    pub fn day(&self) -> u32 {
        1 + (self.elapsed_minutes / MINUTES_PER_DAY) as u32
    }

    pub fn formatted(&self) -> String {
        let now = self.now();
        format!("Day {} {:02}:{:02}", self.day(), now.hour(), now.minute())
    }
}

pub fn tick_facility_clock(mut clock: ResMut<FacilityClock>) {
    clock.tick();
}

/// Scales the FixedUpdate timestep based on clock speed.
/// Base rate is 10 Hz (100 ms). At 2x speed it becomes 50 ms, at 4x -> 25 ms.
pub fn sync_fixed_timestep(clock: Res<FacilityClock>, mut time: ResMut<Time<Fixed>>) {
    let base = std::time::Duration::from_millis(100);
    let effective = if clock.paused || clock.speed <= 0.0 {
        // When paused, keep the timestep; tick_facility_clock won't advance.
        base
    } else {
        base.div_f32(clock.speed.clamp(0.25, 16.0))
    };
    time.set_timestep(effective);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_advances_one_minute() {
        let mut clock = FacilityClock::default();
        let before = clock.now();
        clock.tick();
        assert_eq!(clock.now() - before, Duration::minutes(1));
    }

    #[test]
    fn test_paused_clock_freezes_now() {
        let mut clock = FacilityClock {
            paused: true,
            ..Default::default()
        };
        let before = clock.now();
        clock.tick();
        assert_eq!(clock.now(), before);
    }

    #[test]
    fn test_day_counter_rolls_after_24h() {
        let mut clock = FacilityClock::default();
        assert_eq!(clock.day(), 1);
        for _ in 0..MINUTES_PER_DAY {
            clock.tick();
        }
        assert_eq!(clock.day(), 2);
    }

    #[test]
    fn test_formatted_time() {
        let mut clock = FacilityClock::default();
        for _ in 0..90 {
            clock.tick();
        }
        // Epoch is 12:00, so 90 minutes later is 13:30.
        assert_eq!(clock.formatted(), "Day 1 13:30");
    }
}
