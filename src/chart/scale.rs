use crate::time::{format_hhmm, from_millis, to_millis};
use chrono::NaiveDateTime;

const MINUTE_MS: f64 = 60_000.0;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;

/// Candidate spacings for time axis ticks
const TIME_TICK_INTERVALS_MS: [f64; 9] = [
    MINUTE_MS,
    5.0 * MINUTE_MS,
    15.0 * MINUTE_MS,
    30.0 * MINUTE_MS,
    HOUR_MS,
    3.0 * HOUR_MS,
    6.0 * HOUR_MS,
    12.0 * HOUR_MS,
    24.0 * HOUR_MS,
];

/// Continuous linear mapping from a domain onto a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    #[must_use]
    pub fn map(&self, value: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span.abs() < f64::EPSILON {
            return self.range.0;
        }
        let t = (value - self.domain.0) / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    #[must_use]
    pub fn invert(&self, px: f64) -> f64 {
        let span = self.range.1 - self.range.0;
        if span.abs() < f64::EPSILON {
            return self.domain.0;
        }
        let t = (px - self.range.0) / span;
        self.domain.0 + t * (self.domain.1 - self.domain.0)
    }

    /// Same range, with the domain that the given pixel positions map back to
    #[must_use]
    pub fn with_domain_from_range(&self, range_start: f64, range_end: f64) -> Self {
        Self {
            domain: (self.invert(range_start), self.invert(range_end)),
            range: self.range,
        }
    }

    /// Round tick values inside the domain, roughly `count` of them, on a
    /// 1, 2 or 5 times a power of ten step
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (start, stop) = ordered(self.domain);
        let Some(step) = nice_step(start, stop, count) else {
            return Vec::new();
        };
        steps_between(start, stop, step)
    }

    /// Tick labels with only as many decimals as the tick step needs
    #[must_use]
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let (start, stop) = ordered(self.domain);
        let Some(step) = nice_step(start, stop, count) else {
            return Vec::new();
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let decimals = (-step.log10().floor()).max(0.0) as usize;
        steps_between(start, stop, step)
            .into_iter()
            .map(|v| (v, format!("{v:.decimals$}")))
            .collect()
    }
}

fn ordered(domain: (f64, f64)) -> (f64, f64) {
    if domain.0 <= domain.1 {
        domain
    } else {
        (domain.1, domain.0)
    }
}

fn nice_step(start: f64, stop: f64, count: usize) -> Option<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() || stop <= start {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let raw = (stop - start) / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    Some(factor * power)
}

#[allow(clippy::cast_possible_truncation)]
fn steps_between(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let first = (start / step).ceil() as i64;
    let last = (stop / step).floor() as i64;
    #[allow(clippy::cast_precision_loss)]
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Time axis scale; times are mapped through epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    #[must_use]
    pub fn new(domain: (NaiveDateTime, NaiveDateTime), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new((to_millis(domain.0), to_millis(domain.1)), range),
        }
    }

    #[must_use]
    pub fn map(&self, time: NaiveDateTime) -> f64 {
        self.inner.map(to_millis(time))
    }

    #[must_use]
    pub fn invert(&self, px: f64) -> Option<NaiveDateTime> {
        from_millis(self.inner.invert(px))
    }

    #[must_use]
    pub fn domain(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((from_millis(self.inner.domain.0)?, from_millis(self.inner.domain.1)?))
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.inner.range
    }

    #[must_use]
    pub fn with_domain_from_range(&self, range_start: f64, range_end: f64) -> Self {
        Self {
            inner: self.inner.with_domain_from_range(range_start, range_end),
        }
    }

    /// Roughly `count` ticks on whole minute, hour or day boundaries
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<NaiveDateTime> {
        let (start, stop) = ordered(self.inner.domain);
        if count == 0 || !start.is_finite() || !stop.is_finite() || stop <= start {
            return Vec::new();
        }
        #[allow(clippy::cast_precision_loss)]
        let target = (stop - start) / count as f64;
        let interval = TIME_TICK_INTERVALS_MS
            .iter()
            .copied()
            .min_by(|a, b| {
                let da = (a / target).ln().abs();
                let db = (b / target).ln().abs();
                da.total_cmp(&db)
            })
            .unwrap_or(HOUR_MS);

        steps_between(start, stop, interval)
            .into_iter()
            .filter_map(from_millis)
            .collect()
    }

    #[must_use]
    pub fn tick_labels(&self, count: usize) -> Vec<(NaiveDateTime, String)> {
        self.ticks(count)
            .into_iter()
            .map(|t| (t, format_hhmm(t)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 17)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .expect("valid time")
    }

    #[test]
    fn test_linear_map_and_invert() {
        let scale = LinearScale::new((0.0, 191.0), (500.0, 20.0));
        assert_eq!(scale.map(0.0), 500.0);
        assert_eq!(scale.map(191.0), 20.0);
        assert!((scale.invert(scale.map(95.5)) - 95.5).abs() < 1e-9);
    }

    #[test]
    fn test_linear_degenerate_domain() {
        let scale = LinearScale::new((5.0, 5.0), (0.0, 100.0));
        assert_eq!(scale.map(5.0), 0.0);
    }

    #[test]
    fn test_linear_ticks_distance_axis() {
        let scale = LinearScale::new((0.0, 191.0), (500.0, 20.0));
        assert_eq!(
            scale.ticks(10),
            vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0, 120.0, 140.0, 160.0, 180.0]
        );
        assert_eq!(scale.ticks(4), vec![0.0, 50.0, 100.0, 150.0]);
    }

    #[test]
    fn test_linear_ticks_fractional_labels() {
        let scale = LinearScale::new((0.0, 1.0), (0.0, 100.0));
        let labels: Vec<_> = scale.tick_labels(5).into_iter().map(|(_, l)| l).collect();
        assert_eq!(labels, vec!["0.0", "0.2", "0.4", "0.6", "0.8", "1.0"]);
    }

    #[test]
    fn test_linear_ticks_empty_for_zero_count() {
        let scale = LinearScale::new((0.0, 191.0), (0.0, 100.0));
        assert!(scale.ticks(0).is_empty());
    }

    #[test]
    fn test_time_scale_maps_endpoints() {
        let scale = TimeScale::new((at(8, 0), at(12, 0)), (40.0, 840.0));
        assert_eq!(scale.map(at(8, 0)), 40.0);
        assert_eq!(scale.map(at(12, 0)), 840.0);
        assert_eq!(scale.map(at(10, 0)), 440.0);
        assert_eq!(scale.invert(440.0), Some(at(10, 0)));
    }

    #[test]
    fn test_time_ticks_hourly() {
        let scale = TimeScale::new((at(8, 0), at(12, 0)), (40.0, 840.0));
        assert_eq!(scale.ticks(4), vec![at(8, 0), at(9, 0), at(10, 0), at(11, 0), at(12, 0)]);
    }

    #[test]
    fn test_time_ticks_align_to_interval() {
        let scale = TimeScale::new((at(8, 7), at(9, 7)), (0.0, 400.0));
        let labels: Vec<_> = scale.tick_labels(4).into_iter().map(|(_, l)| l).collect();
        assert_eq!(labels, vec!["08:15", "08:30", "08:45", "09:00"]);
    }

    #[test]
    fn test_time_ticks_coarse_span() {
        let scale = TimeScale::new((at(0, 0), at(23, 0)), (0.0, 400.0));
        let ticks = scale.ticks(5);
        assert_eq!(ticks.first(), Some(&at(0, 0)));
        assert!(ticks.windows(2).all(|w| w[1] - w[0] == chrono::Duration::hours(6)));
    }
}
