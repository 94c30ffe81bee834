//! Render engine throughput benchmarks
//!
//! Measures rendering of synthetic multi-book trees with varying:
//! - Book counts (1, 10, 66)
//! - Note density (plain verses vs. a footnote and cross reference per verse)
//!
//! Run benchmarks: `cargo bench --bench render_throughput`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use vellum::{Marker, MarkerKind, RenderConfig, Renderer};

const CHAPTERS_PER_BOOK: i32 = 20;
const VERSES_PER_CHAPTER: i32 = 25;

/// Build a tree of `books` books; every verse carries notes when `with_notes`
fn generate_tree(books: usize, with_notes: bool) -> Marker {
    let mut contents = Vec::new();
    for b in 0..books {
        let title = format!("Book {}", b + 1);
        contents.push(Marker::book_id(format!("B{b:02}")));
        contents.push(Marker::header(title.clone()));
        contents.push(Marker::short_toc_title(title.clone()));
        contents.push(Marker::major_title(title.clone(), 1));

        for c in 1..=CHAPTERS_PER_BOOK {
            let mut chapter = Marker::chapter(c);
            for v in 1..=VERSES_PER_CHAPTER {
                let mut verse = Marker::verse(v.to_string())
                    .push(Marker::text(format!("{title} {c}:{v} text of the verse ")));
                if with_notes {
                    verse = verse
                        .push(
                            Marker::footnote("+").push(
                                Marker::new(MarkerKind::FootnoteText)
                                    .push(Marker::text("A translation note")),
                            ),
                        )
                        .push(
                            Marker::cross_ref("+").push(
                                Marker::new(MarkerKind::CrossRefText)
                                    .push(Marker::text("Compare elsewhere")),
                            ),
                        );
                }
                chapter = chapter.push(verse);
            }
            contents.push(chapter);
        }
    }
    Marker::document(contents)
}

fn benchmark_book_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_books");
    let renderer = Renderer::default();

    for books in [1, 10, 66] {
        let tree = generate_tree(books, false);
        let verses = books as u64 * (CHAPTERS_PER_BOOK * VERSES_PER_CHAPTER) as u64;
        group.throughput(Throughput::Elements(verses));

        group.bench_with_input(BenchmarkId::new("books", books), &tree, |b, tree| {
            b.iter(|| renderer.render(black_box(tree)).expect("Failed to render"));
        });
    }

    group.finish();
}

fn benchmark_note_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_notes");
    let config = RenderConfig {
        render_table_of_contents: true,
        ..Default::default()
    };
    let renderer = Renderer::new(config).expect("Invalid config");

    for with_notes in [false, true] {
        let tree = generate_tree(10, with_notes);
        let label = if with_notes { "with_notes" } else { "plain" };

        group.bench_with_input(BenchmarkId::new("mode", label), &tree, |b, tree| {
            b.iter(|| renderer.render(black_box(tree)).expect("Failed to render"));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_book_count, benchmark_note_density);
criterion_main!(benches);
