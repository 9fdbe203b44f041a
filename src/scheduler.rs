use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// A fixed-period ticking task that can be cancelled and started again.
///
/// While cancelled, [`Ticker::tick`] never completes, so it can sit in a
/// `select!` without ever firing.
#[derive(Debug, Default)]
pub struct Ticker {
    interval: Option<Interval>,
}

impl Ticker {
    pub fn new() -> Self {
        Ticker { interval: None }
    }

    /// (Re)starts ticking; the first tick fires one `period` from now.
    /// Any previous schedule is discarded.
    pub fn start(&mut self, period: Duration) {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    pub fn cancel(&mut self) {
        self.interval = None;
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    pub async fn tick(&mut self) -> Instant {
        match self.interval.as_mut() {
            Some(interval) => interval.tick().await,
            None => std::future::pending().await,
        }
    }
}
