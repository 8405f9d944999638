use chrono::prelude::*;
use core::time::Duration;
use gloo::timers::callback::{Interval, Timeout};
use memorama_core::{Scheduler, Task};
use yew::html::Scope;

use crate::game::{GameView, Msg};
use crate::utils::utc_now;

/// Keeps a gloo timer alive, dropping it cancels the callback.
pub(crate) enum TimerHandle {
    Interval(#[allow(unused)] Interval),
    Timeout(#[allow(unused)] Timeout),
}

/// Schedules engine tasks on browser timers, delivering them back to the game component as messages.
pub(crate) struct BrowserScheduler {
    link: Scope<GameView>,
}

impl BrowserScheduler {
    pub(crate) fn new(link: Scope<GameView>) -> Self {
        Self { link }
    }
}

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

impl Scheduler for BrowserScheduler {
    type Handle = TimerHandle;

    fn every(&mut self, period: Duration, task: Task) -> Self::Handle {
        let link = self.link.clone();
        TimerHandle::Interval(Interval::new(millis(period), move || {
            link.send_message(Msg::Task(task))
        }))
    }

    fn after(&mut self, delay: Duration, task: Task) -> Self::Handle {
        let link = self.link.clone();
        TimerHandle::Timeout(Timeout::new(millis(delay), move || {
            link.send_message(Msg::Task(task))
        }))
    }

    fn now(&self) -> DateTime<Utc> {
        utc_now()
    }
}
