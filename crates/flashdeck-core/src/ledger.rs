// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::rating::Grade;
use crate::types::date::Date;

/// Running review counters, persisted across sessions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub reviewed: u64,
    pub correct: u64,
    #[serde(default)]
    pub daily_reviews: BTreeMap<Date, u64>,
}

impl ReviewStats {
    /// Count a graded review.
    pub fn record(&self, grade: Grade, date: Date) -> Self {
        let mut stats = self.clone();
        stats.reviewed += 1;
        if grade.is_correct() {
            stats.correct += 1;
        }
        *stats.daily_reviews.entry(date).or_insert(0) += 1;
        stats
    }

    /// Take back a review previously counted by [`ReviewStats::record`].
    pub fn reverse(&self, grade: Grade, date: Date) -> Self {
        let mut stats = self.clone();
        stats.reviewed = stats.reviewed.saturating_sub(1);
        if grade.is_correct() {
            stats.correct = stats.correct.saturating_sub(1);
        }
        if let Some(count) = stats.daily_reviews.get_mut(&date) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                stats.daily_reviews.remove(&date);
            }
        }
        stats
    }

    /// Percentage of reviews answered correctly, rounded.
    pub fn accuracy(&self) -> u32 {
        if self.reviewed == 0 {
            0
        } else {
            ((self.correct as f64 / self.reviewed as f64) * 100.0).round() as u32
        }
    }

    pub fn reviews_on(&self, date: Date) -> u64 {
        self.daily_reviews.get(&date).copied().unwrap_or(0)
    }

    /// Reviews between two dates, inclusive.
    pub fn total_in_range(&self, from: Date, to: Date) -> u64 {
        if from > to {
            return 0;
        }
        self.daily_reviews.range(from..=to).map(|(_, n)| n).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    fn date(s: &str) -> Date {
        Date::try_from(s.to_string()).unwrap()
    }

    #[test]
    fn test_record() {
        let day = date("2024-01-01");
        let stats = ReviewStats::default()
            .record(Grade::Good, day)
            .record(Grade::Again, day)
            .record(Grade::Easy, date("2024-01-02"))
            .record(Grade::Hard, day);
        assert_eq!(stats.reviewed, 4);
        assert_eq!(stats.correct, 2);
        assert_eq!(stats.reviews_on(day), 3);
        assert_eq!(stats.reviews_on(date("2024-01-02")), 1);
        assert_eq!(stats.reviews_on(date("2024-01-03")), 0);
        assert_eq!(stats.accuracy(), 50);
    }

    #[test]
    fn test_record_does_not_touch_input() {
        let stats = ReviewStats::default();
        let _ = stats.record(Grade::Good, date("2024-01-01"));
        assert_eq!(stats, ReviewStats::default());
    }

    #[test]
    fn test_reverse_is_inverse() {
        let day = date("2024-01-01");
        let base = ReviewStats::default().record(Grade::Good, day);
        for grade in [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy] {
            for d in [day, date("2024-01-05")] {
                assert_eq!(base.record(grade, d).reverse(grade, d), base);
            }
        }
    }

    #[test]
    fn test_reverse_floors_at_zero() {
        let stats = ReviewStats::default().reverse(Grade::Good, date("2024-01-01"));
        assert_eq!(stats, ReviewStats::default());
    }

    #[test]
    fn test_accuracy_rounds() {
        let day = date("2024-01-01");
        let stats = ReviewStats::default()
            .record(Grade::Good, day)
            .record(Grade::Good, day)
            .record(Grade::Again, day);
        assert_eq!(stats.accuracy(), 67);
        assert_eq!(ReviewStats::default().accuracy(), 0);
    }

    #[test]
    fn test_total_in_range() {
        let stats = ReviewStats::default()
            .record(Grade::Good, date("2024-01-01"))
            .record(Grade::Good, date("2024-01-03"))
            .record(Grade::Good, date("2024-01-03"))
            .record(Grade::Good, date("2024-01-09"));
        assert_eq!(stats.total_in_range(date("2024-01-01"), date("2024-01-07")), 3);
        assert_eq!(stats.total_in_range(date("2024-01-02"), date("2024-01-09")), 3);
        assert_eq!(stats.total_in_range(date("2024-01-09"), date("2024-01-01")), 0);
    }

    #[test]
    fn test_json_shape() -> Fallible<()> {
        let stats = ReviewStats::default().record(Grade::Easy, date("2024-01-01"));
        let json = serde_json::to_string(&stats)?;
        assert_eq!(
            json,
            r#"{"reviewed":1,"correct":1,"dailyReviews":{"2024-01-01":1}}"#
        );
        let parsed: ReviewStats = serde_json::from_str(r#"{"reviewed":2,"correct":0}"#)?;
        assert_eq!(parsed.reviewed, 2);
        assert!(parsed.daily_reviews.is_empty());
        Ok(())
    }
}
