//! Descriptive statistics over an [`ObservationSet`].
//!
//! All functions are pure and accept an empty set. Averages fall back to
//! `0.0` on empty input; extremes return `None`.

use chrono::NaiveDate;

use crate::model::{AggregateReport, DailyObservation, DayExtreme, ObservationSet, RainCheck};

/// Minimum precipitation, in millimetres, for [`had_rain_on`] to answer yes.
///
/// [`rain_day_count`] counts any precipitation above zero instead.
pub const RAIN_CHECK_THRESHOLD_MM: f64 = 0.1;

/// Mean of the daily `(min + max) / 2`.
pub fn average_temperature(set: &ObservationSet) -> f64 {
    mean(set.iter().map(|obs| obs.mean_temperature()), set.len())
}

pub fn average_humidity(set: &ObservationSet) -> f64 {
    mean(set.iter().map(|obs| obs.humidity), set.len())
}

/// Lowest daily minimum.
pub fn min_temperature(set: &ObservationSet) -> Option<f64> {
    coldest_day(set).map(|day| day.temperature)
}

/// Highest daily maximum.
pub fn max_temperature(set: &ObservationSet) -> Option<f64> {
    hottest_day(set).map(|day| day.temperature)
}

pub fn rain_day_count(set: &ObservationSet) -> usize {
    set.iter().filter(|obs| obs.precipitation > 0.0).count()
}

pub fn had_rain_on(set: &ObservationSet, date: NaiveDate) -> RainCheck {
    match set.find(date) {
        Some(obs) if obs.precipitation >= RAIN_CHECK_THRESHOLD_MM => RainCheck::Rained,
        Some(_) => RainCheck::Dry,
        None => RainCheck::NotFound,
    }
}

/// Day with the highest maximum. Ties keep the earliest day.
pub fn hottest_day(set: &ObservationSet) -> Option<DayExtreme> {
    extreme(set, |obs| obs.temperature_max, |candidate, best| candidate > best)
}

/// Day with the lowest minimum. Ties keep the earliest day.
pub fn coldest_day(set: &ObservationSet) -> Option<DayExtreme> {
    extreme(set, |obs| obs.temperature_min, |candidate, best| candidate < best)
}

pub fn aggregate(set: &ObservationSet) -> AggregateReport {
    let hottest = hottest_day(set);
    let coldest = coldest_day(set);

    AggregateReport {
        average_temperature: average_temperature(set),
        average_humidity: average_humidity(set),
        min_temperature: coldest.map(|day| day.temperature),
        max_temperature: hottest.map(|day| day.temperature),
        rain_day_count: rain_day_count(set),
        hottest_day: hottest,
        coldest_day: coldest,
    }
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

fn extreme(
    set: &ObservationSet,
    value: impl Fn(&DailyObservation) -> f64,
    replaces: impl Fn(f64, f64) -> bool,
) -> Option<DayExtreme> {
    set.iter().fold(None, |best: Option<DayExtreme>, obs| {
        let temperature = value(obs);
        match best {
            Some(current) if !replaces(temperature, current.temperature) => Some(current),
            _ => Some(DayExtreme {
                date: obs.date,
                temperature,
            }),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn obs(d: u32, min: f64, max: f64, precipitation: f64, humidity: f64) -> DailyObservation {
        DailyObservation {
            date: day(d),
            temperature_min: min,
            temperature_max: max,
            precipitation,
            humidity,
        }
    }

    fn three_days() -> ObservationSet {
        ObservationSet::new(vec![
            obs(1, 5.0, 10.0, 0.0, 80.0),
            obs(2, 2.0, 8.0, 1.5, 90.0),
            obs(3, 5.0, 10.0, 0.0, 80.0),
        ])
    }

    #[test]
    fn empty_set_has_neutral_aggregates() {
        let empty = ObservationSet::default();

        assert_eq!(average_temperature(&empty), 0.0);
        assert_eq!(average_humidity(&empty), 0.0);
        assert_eq!(min_temperature(&empty), None);
        assert_eq!(max_temperature(&empty), None);
        assert_eq!(rain_day_count(&empty), 0);
        assert_eq!(hottest_day(&empty), None);
        assert_eq!(coldest_day(&empty), None);
    }

    #[test]
    fn three_day_scenario() {
        let set = three_days();

        assert_eq!(
            coldest_day(&set),
            Some(DayExtreme { date: day(2), temperature: 2.0 })
        );
        assert_eq!(
            hottest_day(&set),
            Some(DayExtreme { date: day(1), temperature: 10.0 })
        );
        assert_eq!(rain_day_count(&set), 1);
        assert!((average_temperature(&set) - 20.0 / 3.0).abs() < 1e-9);
        assert!((average_humidity(&set) - 250.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn ties_keep_the_first_occurrence() {
        let set = ObservationSet::new(vec![
            obs(1, 5.0, 10.0, 0.0, 80.0),
            obs(2, 6.0, 9.0, 0.0, 80.0),
            obs(3, 5.0, 10.0, 0.0, 80.0),
        ]);

        assert_eq!(coldest_day(&set).unwrap().date, day(1));
        assert_eq!(hottest_day(&set).unwrap().date, day(1));
    }

    #[test]
    fn zero_degrees_is_a_real_minimum() {
        let set = ObservationSet::new(vec![obs(1, 0.0, 4.0, 0.0, 50.0)]);
        assert_eq!(min_temperature(&set), Some(0.0));
    }

    #[test]
    fn average_lies_between_extremes() {
        let set = ObservationSet::new(vec![
            obs(1, -3.5, 4.0, 0.0, 70.0),
            obs(2, 1.0, 12.5, 3.0, 60.0),
            obs(3, 6.2, 18.9, 0.0, 55.0),
            obs(4, -1.0, 2.0, 0.4, 95.0),
        ]);

        let avg = average_temperature(&set);
        assert!(min_temperature(&set).unwrap() <= avg);
        assert!(avg <= max_temperature(&set).unwrap());
    }

    #[test]
    fn rain_check_threshold_boundary() {
        let set = ObservationSet::new(vec![
            obs(1, 0.0, 1.0, 0.1, 50.0),
            obs(2, 0.0, 1.0, 0.099, 50.0),
        ]);

        assert_eq!(had_rain_on(&set, day(1)), RainCheck::Rained);
        assert_eq!(had_rain_on(&set, day(2)), RainCheck::Dry);
        assert_eq!(had_rain_on(&set, day(9)), RainCheck::NotFound);
    }

    #[test]
    fn rain_count_and_rain_check_use_different_thresholds() {
        let set = ObservationSet::new(vec![obs(1, 0.0, 1.0, 0.05, 50.0)]);

        assert_eq!(rain_day_count(&set), 1);
        assert_eq!(had_rain_on(&set, day(1)), RainCheck::Dry);
    }

    #[test]
    fn dry_fixture_has_no_rain_days() {
        let set = ObservationSet::new((1..=10).map(|d| obs(d, 1.0, 2.0, 0.0, 40.0)).collect());
        assert_eq!(rain_day_count(&set), 0);
        assert!(rain_day_count(&set) <= set.len());
    }

    #[test]
    fn aggregate_collects_every_statistic() {
        let report = aggregate(&three_days());

        assert_eq!(report.min_temperature, Some(2.0));
        assert_eq!(report.max_temperature, Some(10.0));
        assert_eq!(report.rain_day_count, 1);
        assert_eq!(report.hottest_day.unwrap().date, day(1));
        assert_eq!(report.coldest_day.unwrap().date, day(2));
    }
}
