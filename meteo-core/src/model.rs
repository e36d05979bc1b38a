use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of archived weather for the configured location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub temperature_min: f64,
    pub temperature_max: f64,
    /// Daily precipitation sum, in millimetres.
    pub precipitation: f64,
    /// Mean relative humidity, in percent.
    pub humidity: f64,
}

impl DailyObservation {
    /// The `YYYY-MM-DD` lookup key.
    pub fn canonical_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn mean_temperature(&self) -> f64 {
        (self.temperature_min + self.temperature_max) / 2.0
    }

    /// The feed does not guarantee min <= max.
    pub fn has_anomaly(&self) -> bool {
        self.temperature_min > self.temperature_max
    }
}

/// Observations in feed order (ascending date, never re-sorted).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationSet {
    observations: Vec<DailyObservation>,
}

impl ObservationSet {
    pub fn new(observations: Vec<DailyObservation>) -> Self {
        Self { observations }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DailyObservation> {
        self.observations.iter()
    }

    pub fn as_slice(&self) -> &[DailyObservation] {
        &self.observations
    }

    pub fn first(&self) -> Option<&DailyObservation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&DailyObservation> {
        self.observations.last()
    }

    /// The first `n` observations (fewer if the set is shorter).
    pub fn sample(&self, n: usize) -> &[DailyObservation] {
        &self.observations[..n.min(self.observations.len())]
    }

    /// First observation recorded for `date`.
    pub fn find(&self, date: NaiveDate) -> Option<&DailyObservation> {
        self.observations.iter().find(|obs| obs.date == date)
    }
}

impl<'a> IntoIterator for &'a ObservationSet {
    type Item = &'a DailyObservation;
    type IntoIter = std::slice::Iter<'a, DailyObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

impl FromIterator<DailyObservation> for ObservationSet {
    fn from_iter<I: IntoIterator<Item = DailyObservation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// The day holding a global temperature extreme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayExtreme {
    pub date: NaiveDate,
    pub temperature: f64,
}

/// Outcome of asking whether it rained on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RainCheck {
    Rained,
    Dry,
    /// The date is not part of the dataset.
    NotFound,
}

/// Every aggregate the engine exposes, computed in one go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub average_temperature: f64,
    pub average_humidity: f64,
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    pub rain_day_count: usize,
    pub hottest_day: Option<DayExtreme>,
    pub coldest_day: Option<DayExtreme>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(day: u32, min: f64, max: f64) -> DailyObservation {
        DailyObservation {
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            temperature_min: min,
            temperature_max: max,
            precipitation: 0.0,
            humidity: 50.0,
        }
    }

    #[test]
    fn canonical_date_is_zero_padded() {
        assert_eq!(obs(3, 1.0, 2.0).canonical_date(), "2025-01-03");
    }

    #[test]
    fn inverted_extremes_are_flagged() {
        assert!(obs(1, 9.0, 3.0).has_anomaly());
        assert!(!obs(1, 3.0, 3.0).has_anomaly());
    }

    #[test]
    fn sample_is_clamped_to_length() {
        let set: ObservationSet = (1..=3).map(|d| obs(d, 0.0, 1.0)).collect();
        assert_eq!(set.sample(2).len(), 2);
        assert_eq!(set.sample(20).len(), 3);
    }

    #[test]
    fn find_returns_first_match() {
        let mut dup = obs(2, 7.0, 8.0);
        dup.humidity = 99.0;
        let set = ObservationSet::new(vec![obs(1, 0.0, 1.0), obs(2, 0.0, 1.0), dup]);

        let found = set.find(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()).unwrap();
        assert_eq!(found.humidity, 50.0);
        assert!(set.find(NaiveDate::from_ymd_opt(2025, 1, 9).unwrap()).is_none());
    }
}
