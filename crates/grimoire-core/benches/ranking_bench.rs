use criterion::{criterion_group, criterion_main, Criterion};
use grimoire_core::{
    find_by_category, rank_all, rank_spellbooks, Spell, Spellbook, KNOWN_CATEGORIES,
};

fn mk_spellbook(index: usize) -> Spellbook {
    let spells = (0..20)
        .map(|spell_index| {
            let bucket = u16::try_from((index * 31 + spell_index * 7) % 100).unwrap_or(0);
            Spell::new(
                format!("spell_{index}_{spell_index}"),
                f32::from(bucket) / 100.0,
                KNOWN_CATEGORIES[(index + spell_index) % KNOWN_CATEGORIES.len()],
            )
        })
        .collect();
    Spellbook::new(format!("book_{index}"), "bench", 200, 1, spells)
}

fn bench_rank_all(c: &mut Criterion) {
    let spellbooks = (0..100).map(mk_spellbook).collect::<Vec<_>>();

    c.bench_function("rank_all_2000_spells_student", |b| {
        b.iter(|| {
            let ranked = rank_all(&spellbooks, "Student");
            if ranked.is_empty() {
                panic!("ranking benchmark produced no spells");
            }
        });
    });

    c.bench_function("rank_spellbooks_100_books", |b| {
        b.iter(|| rank_spellbooks(&spellbooks).len());
    });
}

fn bench_find_by_category(c: &mut Criterion) {
    let spellbooks = (0..100).map(mk_spellbook).collect::<Vec<_>>();

    c.bench_function("find_by_category_2000_spells", |b| {
        b.iter(|| find_by_category(&spellbooks, "fire", "Professor").len());
    });
}

criterion_group!(ranking_benches, bench_rank_all, bench_find_by_category);
criterion_main!(ranking_benches);
