use criterion::{Criterion, black_box, criterion_group, criterion_main};

use combicards::content::{Card, Category, ContentStore, DatasetSource};
use combicards::engine::filter::{CardFilter, FilterUpdate, Selection, apply_filter, filter_indices};

/// The bundled deck repeated until it holds at least `count` cards.
fn make_deck(count: usize) -> Vec<Card> {
    let base = ContentStore::new(DatasetSource::Bundled)
        .load_cards()
        .unwrap_or_default();
    if base.is_empty() {
        return base;
    }
    base.iter().cycle().take(count).cloned().collect()
}

fn bench_pass_through(c: &mut Criterion) {
    let deck = make_deck(3000);
    let filter = CardFilter::default();

    c.bench_function("filter_indices pass-through (3000 cards)", |b| {
        b.iter(|| filter_indices(black_box(&deck), black_box(&filter)))
    });
}

fn bench_category_and_search(c: &mut Criterion) {
    let deck = make_deck(3000);
    let filter = CardFilter::default()
        .merge(FilterUpdate::category(Selection::Only(Category::Combination)))
        .merge(FilterUpdate::search("escolher"));

    c.bench_function("apply_filter category + search (3000 cards)", |b| {
        b.iter(|| apply_filter(black_box(&deck), black_box(&filter)).len())
    });
}

fn bench_tags(c: &mut Criterion) {
    let deck = make_deck(3000);
    let filter = CardFilter::default().merge(FilterUpdate::tags(["fatorial", "exemplo-pratico"]));

    c.bench_function("filter_indices two tags (3000 cards)", |b| {
        b.iter(|| filter_indices(black_box(&deck), black_box(&filter)))
    });
}

criterion_group!(benches, bench_pass_through, bench_category_and_search, bench_tags);
criterion_main!(benches);
