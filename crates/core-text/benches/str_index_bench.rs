use core_text::Str;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_index_conversion(c: &mut Criterion) {
    let line = "größere Äpfel und 😀 Kirschen: ".repeat(8);
    let s = Str::new(&line);
    let len = s.char_len();
    c.bench_function("index_chars_to_bytes_sweep", |b| {
        b.iter(|| {
            for n in 0..len {
                black_box(s.index_chars_to_bytes(black_box(n)));
            }
        })
    });
    c.bench_function("search_keyword_miss", |b| {
        let kws = ["absent", "missing"];
        b.iter(|| black_box(s.search_keyword(black_box(&kws), 0)))
    });
}

criterion_group!(benches, bench_index_conversion);
criterion_main!(benches);
