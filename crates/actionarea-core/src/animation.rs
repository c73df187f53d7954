//! Animation coordination.
//!
//! Visual work is split into three phases:
//! - before: runs synchronously while a [`Transaction`] is being built
//! - during: runs on the first frame of the animation driver
//! - after: runs once the driver reports completion
//!
//! Steps are plain data (`S`), not closures, so whoever owns the state
//! they touch applies them. The [`Animator`] owns at most one driver. A
//! transaction committed while a driver is in flight is appended to it
//! instead of starting a second driver.

use std::time::Duration;

/// Steps collected for the during and after phases of one transition.
#[derive(Debug)]
pub struct Transaction<S> {
    during: Vec<S>,
    after: Vec<S>,
}

impl<S> Transaction<S> {
    /// Create an empty transaction.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            during: Vec::new(),
            after: Vec::new(),
        }
    }

    /// Queue a step for the animated phase.
    pub fn during(&mut self, step: S) {
        self.during.push(step);
    }

    /// Queue a step for the completion phase.
    pub fn after(&mut self, step: S) {
        self.after.push(step);
    }

    /// Whether no step was queued.
    pub fn is_empty(&self) -> bool {
        self.during.is_empty() && self.after.is_empty()
    }

    /// All steps in execution order.
    pub fn into_steps(self) -> Vec<S> {
        let mut steps = self.during;
        steps.extend(self.after);
        steps
    }
}

impl<S> Default for Transaction<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Receives deferred visual steps from a component.
///
/// Components accept an optional coordinator; without one they apply
/// their steps synchronously.
pub trait Coordinator<S> {
    /// Queue a step for the animated phase.
    fn animate(&mut self, step: S);

    /// Queue a step for the completion phase.
    fn complete(&mut self, step: S);
}

impl<S> Coordinator<S> for Transaction<S> {
    fn animate(&mut self, step: S) {
        self.during(step);
    }

    fn complete(&mut self, step: S) {
        self.after(step);
    }
}

/// Adapts a coordinator of component steps onto a transaction of
/// controller steps.
pub struct MapCoordinator<'a, T, F> {
    inner: &'a mut Transaction<T>,
    map: F,
}

impl<'a, T, F> MapCoordinator<'a, T, F> {
    /// Wrap `inner`, converting every step with `map`.
    pub fn new(inner: &'a mut Transaction<T>, map: F) -> Self {
        Self { inner, map }
    }
}

impl<S, T, F> Coordinator<S> for MapCoordinator<'_, T, F>
where
    F: FnMut(S) -> T,
{
    fn animate(&mut self, step: S) {
        let step = (self.map)(step);
        self.inner.during(step);
    }

    fn complete(&mut self, step: S) {
        let step = (self.map)(step);
        self.inner.after(step);
    }
}

#[derive(Debug)]
struct Driver<S> {
    id: u64,
    elapsed: Duration,
    during: Vec<S>,
    after: Vec<S>,
}

/// Single-slot animation driver.
#[derive(Debug)]
pub struct Animator<S> {
    enabled: bool,
    duration: Duration,
    slot: Option<Driver<S>>,
    next_id: u64,
}

impl<S> Animator<S> {
    /// Create an animator. A disabled animator or a zero duration makes
    /// every commit synchronous.
    #[must_use]
    pub const fn new(enabled: bool, duration: Duration) -> Self {
        Self {
            enabled,
            duration,
            slot: None,
            next_id: 1,
        }
    }

    /// Whether a driver is in flight.
    pub const fn is_active(&self) -> bool {
        self.slot.is_some()
    }

    /// Whether commits are animated at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled && !self.duration.is_zero()
    }

    /// Duration of one driver.
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Hand a transaction to the driver.
    ///
    /// Returns the steps that must run right away: every step when
    /// animations are disabled, nothing otherwise.
    pub fn commit(&mut self, transaction: Transaction<S>) -> Vec<S> {
        if transaction.is_empty() {
            return Vec::new();
        }
        if !self.is_enabled() {
            return transaction.into_steps();
        }

        if let Some(driver) = self.slot.as_mut() {
            tracing::debug!(
                driver = driver.id,
                during = transaction.during.len(),
                after = transaction.after.len(),
                "appending to active animation"
            );
            driver.during.extend(transaction.during);
            driver.after.extend(transaction.after);
        } else {
            let id = self.next_id;
            self.next_id += 1;
            tracing::debug!(driver = id, "starting animation");
            self.slot = Some(Driver {
                id,
                elapsed: Duration::ZERO,
                during: transaction.during,
                after: transaction.after,
            });
        }
        Vec::new()
    }

    /// Advance the driver, returning the steps that became due.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<S> {
        let Some(driver) = self.slot.as_mut() else {
            return Vec::new();
        };

        let mut due: Vec<S> = driver.during.drain(..).collect();
        driver.elapsed += elapsed;
        if driver.elapsed >= self.duration {
            due.extend(self.take_after());
        }
        due
    }

    /// Fraction of the in-flight driver's timeline that has elapsed.
    pub fn progress(&self) -> Option<f32> {
        self.slot.as_ref().map(|driver| {
            if self.duration.is_zero() {
                1.0
            } else {
                (driver.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
            }
        })
    }

    /// Complete the in-flight driver immediately.
    pub fn finish(&mut self) -> Vec<S> {
        let Some(driver) = self.slot.as_mut() else {
            return Vec::new();
        };
        let mut due: Vec<S> = driver.during.drain(..).collect();
        due.extend(self.take_after());
        due
    }

    fn take_after(&mut self) -> Vec<S> {
        self.slot.take().map_or_else(Vec::new, |driver| {
            tracing::debug!(driver = driver.id, "animation finished");
            driver.after
        })
    }
}
