pub mod quiz;
pub mod stats;
pub mod study;

pub use quiz::{Feedback, QuizPhase, QuizSession, QuizTally};
pub use stats::{Outcome, SessionStats};
pub use study::{CardView, Change, Phase, StudySession, StudyView};
