pub mod annotate;
pub mod classify;
pub mod filter;

pub use filter::{CardFilter, FilterUpdate, Selection, apply_filter, filter_indices};
