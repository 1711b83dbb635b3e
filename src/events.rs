use crate::navigation::{Navigator, Route};
use crate::timer::TimerId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// One countdown tick from the timer with this id
    Tick(TimerId),
    Navigate(Route),
}

/// Cloneable sending half of the application event channel
#[derive(Clone)]
pub struct Events {
    tx: flume::Sender<AppEvent>,
}

impl Events {
    pub fn new() -> (Self, flume::Receiver<AppEvent>) {
        let (tx, rx) = flume::unbounded();
        (Self { tx }, rx)
    }

    /// Returns false once the receiving side is gone
    pub fn tick(&self, id: TimerId) -> bool {
        self.tx.send(AppEvent::Tick(id)).is_ok()
    }

    /// Returns false once the receiving side is gone
    pub fn request_route(&self, route: Route) -> bool {
        self.tx.send(AppEvent::Navigate(route)).is_ok()
    }
}

impl Navigator for Events {
    fn navigate(&mut self, route: Route) {
        if !self.request_route(route) {
            log::warn!("Event loop gone, dropped navigation to {}", route);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_roundtrip() {
        let (mut events, rx) = Events::new();
        assert!(events.tick(3));
        events.navigate(Route::Results);

        assert_eq!(rx.try_recv(), Ok(AppEvent::Tick(3)));
        assert_eq!(rx.try_recv(), Ok(AppEvent::Navigate(Route::Results)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_tick_after_receiver_dropped() {
        let (events, rx) = Events::new();
        drop(rx);
        assert!(!events.tick(1));
    }

    #[test]
    fn test_route_request_after_receiver_dropped() {
        let (mut events, rx) = Events::new();
        assert!(events.request_route(Route::Test));
        drop(rx);
        assert!(!events.request_route(Route::Results));
        // Logged, not a panic
        events.navigate(Route::Results);
    }
}
