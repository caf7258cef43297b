use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::content::{LoadError, Question};

#[derive(Clone, Debug, PartialEq)]
pub enum QuizPhase {
    Uninitialized,
    Loaded,
    Failed(LoadError),
}

/// Result of submitting an answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub chosen: usize,
    pub correct: usize,
    pub is_correct: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuizTally {
    pub correct: usize,
    pub incorrect: usize,
    pub skipped: usize,
}

impl QuizTally {
    pub fn answered(&self) -> usize {
        self.correct + self.incorrect
    }

    /// Percent correct over every question answered or skipped.
    pub fn accuracy(&self) -> f64 {
        let seen = self.answered() + self.skipped;
        if seen == 0 {
            return 0.0;
        }
        self.correct as f64 / seen as f64 * 100.0
    }
}

pub struct QuizSession {
    phase: QuizPhase,
    questions: Vec<Question>,
    position: usize,
    selected: Option<usize>,
    feedback: Option<Feedback>,
    tally: QuizTally,
    rng: SmallRng,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            phase: QuizPhase::Uninitialized,
            questions: Vec::new(),
            position: 0,
            selected: None,
            feedback: None,
            tally: QuizTally::default(),
            rng,
        }
    }

    pub fn load(&mut self, questions: Vec<Question>) {
        log::debug!("quiz loaded with {} questions", questions.len());
        self.questions = questions;
        self.phase = QuizPhase::Loaded;
        self.position = 0;
        self.selected = None;
        self.feedback = None;
        self.tally = QuizTally::default();
    }

    pub fn load_failed(&mut self, error: LoadError) {
        log::debug!("quiz failed: {error}");
        self.phase = QuizPhase::Failed(error);
        self.questions.clear();
        self.position = 0;
        self.selected = None;
        self.feedback = None;
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current(&self) -> Option<&Question> {
        match self.phase {
            QuizPhase::Loaded => self.questions.get(self.position),
            _ => None,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn tally(&self) -> QuizTally {
        self.tally
    }

    fn is_open(&self) -> bool {
        self.current().is_some() && self.feedback.is_none()
    }

    pub fn select(&mut self, option: usize) -> bool {
        let Some(count) = self.current().map(|q| q.options.len()) else {
            return false;
        };
        if self.feedback.is_some() || option >= count {
            return false;
        }
        self.selected = Some(option);
        true
    }

    pub fn select_next_option(&mut self) {
        if let Some(count) = self.current().map(|q| q.options.len()) {
            let next = self.selected.map_or(0, |s| (s + 1) % count);
            self.select(next);
        }
    }

    pub fn select_previous_option(&mut self) {
        if let Some(count) = self.current().map(|q| q.options.len()) {
            let prev = self.selected.map_or(count - 1, |s| (s + count - 1) % count);
            self.select(prev);
        }
    }

    /// Grade the selected option. `None` when nothing is selected or the
    /// question was already answered.
    pub fn submit(&mut self) -> Option<Feedback> {
        if !self.is_open() {
            return None;
        }
        let chosen = self.selected?;
        let question = self.current()?;
        let feedback = Feedback {
            chosen,
            correct: question.correct_answer,
            is_correct: question.is_correct(chosen),
        };
        if feedback.is_correct {
            self.tally.correct += 1;
        } else {
            self.tally.incorrect += 1;
        }
        self.feedback = Some(feedback);
        Some(feedback)
    }

    fn move_to(&mut self, position: usize) {
        self.position = position;
        self.selected = None;
        self.feedback = None;
    }

    pub fn next(&mut self) {
        if self.current().is_some() && self.position + 1 < self.questions.len() {
            self.move_to(self.position + 1);
        }
    }

    pub fn previous(&mut self) {
        if self.current().is_some() && self.position > 0 {
            self.move_to(self.position - 1);
        }
    }

    pub fn random(&mut self) {
        if self.current().is_some() {
            let pick = self.rng.gen_range(0..self.questions.len());
            self.move_to(pick);
        }
    }

    /// Count a skip and move on: forward, or to a random question at the end.
    pub fn skip(&mut self) {
        if !self.is_open() {
            return;
        }
        self.tally.skipped += 1;
        if self.position + 1 < self.questions.len() {
            self.next();
        } else {
            self.random();
        }
    }

    pub fn is_last(&self) -> bool {
        self.position + 1 >= self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::card::Difficulty;

    fn question(text: &str, correct: usize) -> Question {
        Question {
            source_exam: "ENEM".to_string(),
            year: Some(2020),
            difficulty: Difficulty::Basic,
            question: text.to_string(),
            options: vec!["6".into(), "12".into(), "24".into(), "120".into()],
            correct_answer: correct,
            explanation: None,
        }
    }

    fn loaded() -> QuizSession {
        let mut quiz = QuizSession::with_seed(11);
        quiz.load(vec![question("q1", 2), question("q2", 0), question("q3", 3)]);
        quiz
    }

    #[test]
    fn submit_requires_selection() {
        let mut quiz = loaded();
        assert_eq!(quiz.submit(), None);
        assert!(quiz.select(2));
        let feedback = quiz.submit().unwrap();
        assert!(feedback.is_correct);
        assert_eq!(quiz.tally().correct, 1);
    }

    #[test]
    fn answered_question_is_locked() {
        let mut quiz = loaded();
        quiz.select(1);
        let feedback = quiz.submit().unwrap();
        assert_eq!(
            feedback,
            Feedback {
                chosen: 1,
                correct: 2,
                is_correct: false
            }
        );
        assert!(!quiz.select(2));
        assert_eq!(quiz.submit(), None);
        quiz.skip();
        assert_eq!(quiz.tally(), QuizTally { correct: 0, incorrect: 1, skipped: 0 });
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut quiz = loaded();
        assert!(!quiz.select(4));
        assert_eq!(quiz.selected(), None);
    }

    #[test]
    fn navigation_is_clamped() {
        let mut quiz = loaded();
        quiz.previous();
        assert_eq!(quiz.position(), 0);
        quiz.next();
        quiz.next();
        quiz.next();
        assert_eq!(quiz.position(), 2);
        assert!(quiz.is_last());
    }

    #[test]
    fn moving_clears_answer_state() {
        let mut quiz = loaded();
        quiz.select(0);
        quiz.submit();
        quiz.next();
        assert_eq!(quiz.selected(), None);
        assert_eq!(quiz.feedback(), None);
    }

    #[test]
    fn option_cycling_wraps() {
        let mut quiz = loaded();
        quiz.select_previous_option();
        assert_eq!(quiz.selected(), Some(3));
        quiz.select_next_option();
        assert_eq!(quiz.selected(), Some(0));
    }

    #[test]
    fn skip_advances_and_counts() {
        let mut quiz = loaded();
        quiz.skip();
        assert_eq!(quiz.position(), 1);
        assert_eq!(quiz.tally().skipped, 1);
        quiz.next();
        quiz.skip();
        assert_eq!(quiz.tally().skipped, 2);
        assert!(quiz.position() < 3);
    }

    #[test]
    fn skipped_questions_count_against_accuracy() {
        let mut quiz = loaded();
        quiz.select(2);
        quiz.submit();
        quiz.next();
        quiz.skip();
        let tally = quiz.tally();
        assert_eq!(tally.answered(), 1);
        assert!((tally.accuracy() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn failed_quiz_ignores_navigation() {
        let mut quiz = QuizSession::with_seed(1);
        quiz.load_failed(LoadError::Network("timeout".to_string()));
        quiz.next();
        quiz.skip();
        quiz.select_next_option();
        assert_eq!(quiz.current(), None);
        assert_eq!(quiz.tally(), QuizTally::default());
        assert!(matches!(quiz.phase(), QuizPhase::Failed(_)));
    }
}
