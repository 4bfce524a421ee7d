use std::time::Duration;

use instant::Instant;

/// Max times one timer may fire in a single `due` call. Anything beyond is
/// dropped so a long stall doesn't turn into a burst of catch-up work.
const MAX_CATCH_UP: u32 = 8;

/// Source of "now" for the scheduler, as time since some fixed origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Monotonic wall clock.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Hand-cranked clock for tests and headless runs.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }
}

/// Returned by `schedule`, used to cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

struct Timer<T> {
    handle: TimerHandle,
    task: T,
    interval: Duration,
    next_due: Duration,
}

/// Repeating timers that hand back their task each time they come due.
pub struct Scheduler<T> {
    timers: Vec<Timer<T>>,
    next_handle: u64,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_handle: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Fire `task` every `interval`, first at `now + interval`.
    pub fn schedule(&mut self, task: T, interval: Duration, now: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let interval = interval.max(Duration::from_millis(1));
        self.timers.push(Timer {
            handle,
            task,
            interval,
            next_due: now + interval,
        });
        handle
    }

    /// Stop a timer. Returns false if it was already gone.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Collect every task due at `now`, in scheduling order.
    pub fn due(&mut self, now: Duration) -> Vec<T> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            let mut count = 0;
            while timer.next_due <= now && count < MAX_CATCH_UP {
                fired.push(timer.task.clone());
                timer.next_due += timer.interval;
                count += 1;
            }
            if timer.next_due <= now {
                let skipped = (now - timer.next_due).as_nanos() / timer.interval.as_nanos() + 1;
                log::debug!("Timer {:?} dropped {} late firings", timer.handle, skipped);
                timer.next_due = now + timer.interval;
            }
        }
        fired
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn fires_on_interval() {
        let mut clock = ManualClock::new();
        let mut sched = Scheduler::new();
        sched.schedule("tick", 100 * MS, clock.now());

        clock.advance(99 * MS);
        assert!(sched.due(clock.now()).is_empty());
        clock.advance(MS);
        assert_eq!(sched.due(clock.now()), vec!["tick"]);
        clock.advance(250 * MS);
        assert_eq!(sched.due(clock.now()), vec!["tick", "tick"]);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut clock = ManualClock::new();
        let mut sched = Scheduler::new();
        let a = sched.schedule(1, 10 * MS, clock.now());
        sched.schedule(2, 10 * MS, clock.now());
        assert!(sched.cancel(a));
        assert!(!sched.cancel(a));

        clock.advance(10 * MS);
        assert_eq!(sched.due(clock.now()), vec![2]);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut clock = ManualClock::new();
        let mut sched = Scheduler::new();
        sched.schedule((), 10 * MS, clock.now());

        clock.advance(10_000 * MS);
        assert_eq!(sched.due(clock.now()).len(), MAX_CATCH_UP as usize);
        clock.advance(5 * MS);
        assert!(sched.due(clock.now()).is_empty());
        clock.advance(5 * MS);
        assert_eq!(sched.due(clock.now()).len(), 1);
    }
}
