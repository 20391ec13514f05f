use chrono::{NaiveDate, NaiveDateTime};
use gloo_timers::callback::Interval;
use leptos::{create_signal, on_cleanup, ReadSignal, SignalSet};

/// Current local wall-clock time
#[must_use]
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Date whose services are requested and onto which `HHMM` times are anchored
#[must_use]
pub fn service_date() -> NaiveDate {
    local_now().date()
}

/// Hook that provides the current time, refreshed every `period_ms`
///
/// The timer is dropped when the owning component unmounts.
#[must_use]
pub fn use_now(period_ms: u32) -> ReadSignal<NaiveDateTime> {
    let (now, set_now) = create_signal(local_now());

    let interval = Interval::new(period_ms, move || {
        set_now.set(local_now());
    });

    on_cleanup(move || drop(interval));

    now
}
