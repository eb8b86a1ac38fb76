use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pgscan::{CheckConfig, Checker, LineStore, ParagraphIndex, Wordlist};

const PARAGRAPH: &str = "\u{201C}It was the wind,\u{201D} she said, and went to the door-way.
Morgan stood at the door way ,hut nothing came; he waited
a long time. \u{2018}Odd,\u{2019} he thought, and the night went on.";

fn synthetic_book(paragraphs: usize) -> LineStore {
    let text = vec![PARAGRAPH; paragraphs].join("\n\n");
    LineStore::from_text(&text)
}

fn bench_check(c: &mut Criterion) {
    // WHY: rule evaluation dominates; the book is sized so one iteration stays under a second
    let lines = synthetic_book(500);
    let wordlist = Wordlist::from_words(["the", "he", "she", "said", "went", "door", "wind", "night"]);
    let checker = Checker::new(CheckConfig::default()).expect("Rules should compile");

    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);

    group.bench_function("check_500_paragraphs", |b| {
        b.iter(|| black_box(checker.check(black_box(&lines), &wordlist)));
    });

    group.bench_function("paragraph_index", |b| {
        b.iter(|| black_box(ParagraphIndex::build(black_box(lines.lines()))));
    });

    group.bench_function("checker_construction", |b| {
        b.iter(|| black_box(Checker::new(CheckConfig::default())))
    });

    group.finish();
}

criterion_group!(benches, bench_check);
criterion_main!(benches);
