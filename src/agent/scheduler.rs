//! Fixed-cadence tick driver
//!
//! Invokes a tick closure once per `interval`, measured from a fixed start
//! instant so that slow ticks do not accumulate drift. Ticks never overlap:
//! when a tick overruns its slot, the next one starts immediately.

use std::ops::ControlFlow;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::FeatureConfig;
use crate::error::FeatureError;

/// Runs ticks at a fixed interval on the calling thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickScheduler {
    interval: Duration,
}

impl TickScheduler {
    /// Create a scheduler ticking every `interval`
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Scheduler ticking every `config.action_interval` seconds
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if the interval is not a finite positive number.
    pub fn from_config(config: &FeatureConfig) -> Result<Self, FeatureError> {
        Duration::try_from_secs_f64(config.action_interval)
            .ok()
            .filter(|interval| !interval.is_zero())
            .map(Self::new)
            .ok_or_else(|| {
                FeatureError::InvalidConfiguration(format!(
                    "Invalid action interval: {}",
                    config.action_interval
                ))
            })
    }

    /// Tick interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Call `tick` with the tick number until it breaks or `max_ticks` ran
    ///
    /// Returns the number of ticks run, or the first error from `tick`.
    pub fn run<F>(&self, max_ticks: Option<u64>, mut tick: F) -> Result<u64, FeatureError>
    where
        F: FnMut(u64) -> Result<ControlFlow<()>, FeatureError>,
    {
        let start = Instant::now();
        let mut count = 0u64;

        while max_ticks.map_or(true, |max| count < max) {
            let flow = tick(count)?;
            count += 1;

            if flow.is_break() {
                log::debug!("Scheduler stopped by tick {}", count - 1);
                break;
            }

            let deadline = start + self.interval.saturating_mul(count.min(u32::MAX as u64) as u32);
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            } else if now - deadline > self.interval {
                log::warn!(
                    "Tick {} overran by {:?}",
                    count - 1,
                    now - deadline
                );
            }
        }

        Ok(count)
    }
}
