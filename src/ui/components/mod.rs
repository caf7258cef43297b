pub mod filter_panel;
pub mod flashcard;
pub mod progress_bar;
pub mod quiz_panel;
pub mod stats_panel;
