//! Gravity module - the cancelable repeating trigger behind automatic falling
//!
//! The scheduler never reads a clock. Its owner feeds elapsed milliseconds into
//! [`GravityScheduler::advance`] and gets back how many times the trigger fired,
//! which keeps tests free of wall-clock delays.
//!
//! At most one handle is live. Arming while armed returns the live handle
//! instead of creating a second trigger, and cancel drops both the handle and
//! any time accumulated toward the next fire.

use crate::types::GRAVITY_INTERVAL_MS;

/// Identity of one arming of the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u32);

impl TimerHandle {
    pub fn generation(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct GravityScheduler {
    interval_ms: u32,
    handle: Option<TimerHandle>,
    generation: u32,
    accumulated_ms: u32,
}

impl GravityScheduler {
    /// Interval is clamped to at least 1ms
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            handle: None,
            generation: 0,
            accumulated_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.handle
    }

    /// Arm the trigger, or return the live handle if already armed
    pub fn arm(&mut self) -> TimerHandle {
        if let Some(handle) = self.handle {
            return handle;
        }
        self.generation = self.generation.wrapping_add(1);
        self.accumulated_ms = 0;
        let handle = TimerHandle(self.generation);
        self.handle = Some(handle);
        handle
    }

    /// Cancel the live trigger; returns the handle that was canceled
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.accumulated_ms = 0;
        self.handle.take()
    }

    /// Feed elapsed time; returns the number of fires that became due
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if self.handle.is_none() {
            return 0;
        }
        let total = self.accumulated_ms.saturating_add(elapsed_ms);
        self.accumulated_ms = total % self.interval_ms;
        total / self.interval_ms
    }

    /// Time left until the next fire, if armed
    pub fn remaining_ms(&self) -> Option<u32> {
        self.handle.map(|_| self.interval_ms - self.accumulated_ms)
    }
}

impl Default for GravityScheduler {
    fn default() -> Self {
        Self::new(GRAVITY_INTERVAL_MS)
    }
}
