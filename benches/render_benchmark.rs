//! Benchmarks for the markdown renderer.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cues::{format_inline, render};

fn sample_document() -> String {
    let section = "\
## Section

A paragraph with **bold**, *italic*, `code`, and [a link](http://example.com)
spread over two source lines.

- first item
- second item

1. step one
2. step two

> A quoted remark.

| flag | meaning |
| ---- | ------- |
| -v | verbose |
| -q | quiet |

```sh
cues add \"Review PR #247\" --due \"today 18:00\" --priority high
```

***

";
    let mut doc = String::from("---\ntitle: Benchmark\norder: 1\n---\n\n# Benchmark\n\n");
    for _ in 0..50 {
        doc.push_str(section);
    }
    doc
}

fn bench_render(c: &mut Criterion) {
    let doc = sample_document();
    c.bench_function("render_document", |b| b.iter(|| render(black_box(&doc))));
}

fn bench_format_inline(c: &mut Criterion) {
    let line = "**bold** and *italic* and `code` and [x](http://y)";
    c.bench_function("format_inline", |b| b.iter(|| format_inline(black_box(line))));
}

criterion_group!(benches, bench_render, bench_format_inline);
criterion_main!(benches);
