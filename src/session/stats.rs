use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::content::card::Category;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Correct,
    Incorrect,
    Skipped,
}

/// Counters for one study-mode run. Lives in memory only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionStats {
    pub cards_viewed: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub skipped: usize,
    pub current_streak: usize,
    pub best_streak: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub started_at: Option<DateTime<Utc>>,
    started: Option<Instant>,
    finished: Option<Instant>,
}

impl SessionStats {
    /// Fresh counters with the clock running.
    pub fn started() -> Self {
        Self {
            started_at: Some(Utc::now()),
            started: Some(Instant::now()),
            ..Self::default()
        }
    }

    pub fn stop(&mut self) {
        if self.started.is_some() && self.finished.is_none() {
            self.finished = Some(Instant::now());
        }
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some() && self.finished.is_none()
    }

    pub fn record(&mut self, outcome: Outcome, category: Category) {
        self.cards_viewed += 1;
        *self.by_category.entry(category).or_insert(0) += 1;
        match outcome {
            Outcome::Correct => {
                self.correct += 1;
                self.current_streak += 1;
                self.best_streak = self.best_streak.max(self.current_streak);
            }
            Outcome::Incorrect => {
                self.incorrect += 1;
                self.current_streak = 0;
            }
            Outcome::Skipped => self.skipped += 1,
        }
    }

    pub fn answered(&self) -> usize {
        self.correct + self.incorrect
    }

    /// Percentage of rated cards marked correct. Skips count as rated.
    pub fn accuracy(&self) -> f64 {
        let rated = self.correct + self.incorrect + self.skipped;
        if rated == 0 {
            return 0.0;
        }
        self.correct as f64 / rated as f64 * 100.0
    }

    pub fn elapsed(&self) -> Duration {
        match (self.started, self.finished) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        }
    }

    /// Seconds per recorded card.
    pub fn pace_secs(&self) -> f64 {
        if self.cards_viewed == 0 {
            return 0.0;
        }
        self.elapsed().as_secs_f64() / self.cards_viewed as f64
    }
}

/// `mm:ss`, or `h:mm:ss` past an hour.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (h, m, s) = (secs / 3600, (secs / 60) % 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_correct_one_incorrect() {
        let mut stats = SessionStats::started();
        for _ in 0..3 {
            stats.record(Outcome::Correct, Category::Permutation);
        }
        stats.record(Outcome::Incorrect, Category::Combination);

        assert_eq!(stats.cards_viewed, 4);
        assert_eq!(stats.correct, 3);
        assert_eq!(stats.incorrect, 1);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.best_streak, 3);
        assert!((stats.accuracy() - 75.0).abs() < f64::EPSILON);
        assert_eq!(stats.by_category[&Category::Permutation], 3);
    }

    #[test]
    fn skip_keeps_streak() {
        let mut stats = SessionStats::started();
        stats.record(Outcome::Correct, Category::General);
        stats.record(Outcome::Skipped, Category::General);
        stats.record(Outcome::Correct, Category::General);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.answered(), 2);
    }

    #[test]
    fn skips_lower_accuracy() {
        let mut stats = SessionStats::started();
        stats.record(Outcome::Correct, Category::General);
        stats.record(Outcome::Skipped, Category::General);
        assert!((stats.accuracy() - 50.0).abs() < f64::EPSILON);

        stats.record(Outcome::Incorrect, Category::General);
        stats.record(Outcome::Skipped, Category::General);
        assert!((stats.accuracy() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn accuracy_without_answers_is_zero() {
        assert_eq!(SessionStats::default().accuracy(), 0.0);
        assert_eq!(SessionStats::default().elapsed(), Duration::ZERO);
    }

    #[test]
    fn elapsed_freezes_after_stop() {
        let mut stats = SessionStats::started();
        assert!(stats.is_running());
        stats.stop();
        assert!(!stats.is_running());
        let frozen = stats.elapsed();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(stats.elapsed(), frozen);
    }

    #[test]
    fn elapsed_formatting() {
        assert_eq!(format_elapsed(Duration::from_secs(65)), "01:05");
        assert_eq!(format_elapsed(Duration::from_secs(3725)), "1:02:05");
    }
}
