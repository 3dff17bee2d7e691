//! System clock and randomness implementations.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::infrastructure::ports::{ClockPort, RandomPort};

/// Real system clock.
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Thread-local RNG.
pub struct SystemRandom;

impl RandomPort for SystemRandom {
    fn gen_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    fn gen_range(&self, min: i32, max: i32) -> i32 {
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Scripted randomness for testing. Unit draws and integer draws are popped
/// from separate queues; an exhausted queue falls back to a harmless default
/// (0.99 for unit draws, the range minimum for integer draws).
#[cfg(test)]
pub struct SequenceRandom {
    units: std::sync::Mutex<std::collections::VecDeque<f64>>,
    ints: std::sync::Mutex<std::collections::VecDeque<i32>>,
}

#[cfg(test)]
impl SequenceRandom {
    pub fn new(
        units: impl IntoIterator<Item = f64>,
        ints: impl IntoIterator<Item = i32>,
    ) -> Self {
        Self {
            units: std::sync::Mutex::new(units.into_iter().collect()),
            ints: std::sync::Mutex::new(ints.into_iter().collect()),
        }
    }

    pub fn units(units: impl IntoIterator<Item = f64>) -> Self {
        Self::new(units, [])
    }
}

#[cfg(test)]
impl RandomPort for SequenceRandom {
    fn gen_unit(&self) -> f64 {
        self.units
            .lock()
            .map(|mut q| q.pop_front())
            .unwrap_or(None)
            .unwrap_or(0.99)
    }

    fn gen_range(&self, min: i32, _max: i32) -> i32 {
        self.ints
            .lock()
            .map(|mut q| q.pop_front())
            .unwrap_or(None)
            .unwrap_or(min)
    }
}
