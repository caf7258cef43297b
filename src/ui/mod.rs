pub mod components;
pub mod layout;
pub mod math;
pub mod theme;

use combicards::content::{Category, Difficulty};
use rust_i18n::t;

pub fn category_label(category: Category) -> String {
    match category {
        Category::Permutation => t!("category.permutation"),
        Category::Arrangement => t!("category.arrangement"),
        Category::Combination => t!("category.combination"),
        Category::Principles => t!("category.principles"),
        Category::General => t!("category.general"),
    }
    .into_owned()
}

pub fn difficulty_label(difficulty: Difficulty) -> String {
    match difficulty {
        Difficulty::Basic => t!("difficulty.basic"),
        Difficulty::Intermediate => t!("difficulty.intermediate"),
        Difficulty::Advanced => t!("difficulty.advanced"),
    }
    .into_owned()
}
