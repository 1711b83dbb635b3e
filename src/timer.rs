//! Repeating tick timers with single ownership
//!
//! A timer is represented by its [`TimerGuard`]; dropping the guard cancels the
//! timer. Ticks are delivered as [`AppEvent::Tick`](crate::events::AppEvent)
//! carrying the timer id so a consumer can discard ticks from a timer it has
//! already let go of.

use crate::events::Events;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;

pub type TimerId = u64;

/// Owner of a running timer, cancels it on drop
pub struct TimerGuard {
    id: TimerId,
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerGuard {
    pub fn new(id: TimerId, cancel: impl FnOnce() + 'static) -> Self {
        Self {
            id,
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for TimerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerGuard").field("id", &self.id).finish()
    }
}

/// Starts repeating timers whose first tick lands one period after start
pub trait Scheduler {
    fn start(&mut self, period: Duration) -> TimerGuard;
}

/// Real-time scheduler backed by a tokio interval task per timer
pub struct TokioScheduler {
    events: Events,
    next_id: TimerId,
}

impl TokioScheduler {
    pub fn new(events: Events) -> Self {
        Self { events, next_id: 0 }
    }
}

impl Scheduler for TokioScheduler {
    fn start(&mut self, period: Duration) -> TimerGuard {
        self.next_id += 1;
        let id = self.next_id;
        let events = self.events.clone();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut ticks = IntervalStream::new(interval);
            while ticks.next().await.is_some() {
                if !events.tick(id) {
                    break;
                }
            }
        });

        TimerGuard::new(id, move || handle.abort())
    }
}

#[derive(Debug)]
struct VirtualTimer {
    id: TimerId,
    period: Duration,
    pending: Duration,
}

#[derive(Debug, Default)]
struct VirtualTimers {
    next_id: TimerId,
    active: Vec<VirtualTimer>,
}

/// Deterministic scheduler: time only moves when [`VirtualClock::advance`] is called
///
/// Clones share the same set of timers, so a test can hand one clone to the
/// view and keep another to drive time.
#[derive(Clone)]
pub struct VirtualClock {
    events: Events,
    timers: Rc<RefCell<VirtualTimers>>,
}

impl VirtualClock {
    pub fn new(events: Events) -> Self {
        Self {
            events,
            timers: Rc::new(RefCell::new(VirtualTimers::default())),
        }
    }

    /// Move time forward, emitting every tick that falls due. Returns the tick count.
    pub fn advance(&self, by: Duration) -> usize {
        let mut emitted = 0;
        let mut timers = self.timers.borrow_mut();
        for timer in timers.active.iter_mut() {
            if timer.period.is_zero() {
                continue;
            }
            timer.pending += by;
            while timer.pending >= timer.period {
                timer.pending -= timer.period;
                self.events.tick(timer.id);
                emitted += 1;
            }
        }
        emitted
    }

    pub fn active_timers(&self) -> usize {
        self.timers.borrow().active.len()
    }
}

impl Scheduler for VirtualClock {
    fn start(&mut self, period: Duration) -> TimerGuard {
        let id = {
            let mut timers = self.timers.borrow_mut();
            timers.next_id += 1;
            let id = timers.next_id;
            timers.active.push(VirtualTimer {
                id,
                period,
                pending: Duration::ZERO,
            });
            id
        };

        let timers = Rc::clone(&self.timers);
        TimerGuard::new(id, move || {
            timers.borrow_mut().active.retain(|t| t.id != id);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::AppEvent;

    #[test]
    fn test_virtual_clock_ticks() {
        let (events, rx) = Events::new();
        let mut clock = VirtualClock::new(events);
        let guard = clock.start(Duration::from_secs(1));

        assert_eq!(clock.advance(Duration::from_millis(2500)), 2);
        assert_eq!(clock.advance(Duration::from_millis(500)), 1);
        let ticks: Vec<_> = rx.try_iter().collect();
        assert_eq!(ticks, vec![AppEvent::Tick(guard.id()); 3]);
    }

    #[test]
    fn test_dropping_guard_cancels() {
        let (events, rx) = Events::new();
        let mut clock = VirtualClock::new(events);
        let guard = clock.start(Duration::from_secs(1));
        assert_eq!(clock.active_timers(), 1);

        drop(guard);
        assert_eq!(clock.active_timers(), 0);
        assert_eq!(clock.advance(Duration::from_secs(10)), 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_ids_are_unique() {
        let (events, _rx) = Events::new();
        let mut clock = VirtualClock::new(events);
        let a = clock.start(Duration::from_secs(1));
        let b = clock.start(Duration::from_secs(1));
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_ticks_once_per_period() {
        let (events, rx) = Events::new();
        let mut scheduler = TokioScheduler::new(events);
        let guard = scheduler.start(Duration::from_secs(1));

        for _ in 0..3 {
            assert_eq!(rx.recv_async().await, Ok(AppEvent::Tick(guard.id())));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_stops_on_drop() {
        let (events, rx) = Events::new();
        let mut scheduler = TokioScheduler::new(events);
        let guard = scheduler.start(Duration::from_secs(1));
        drop(guard);

        time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }
}
