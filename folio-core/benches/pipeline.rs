//! Pipeline benchmarks

use criterion::{criterion_group, criterion_main, Criterion};
use folio_core::{
    BilingualPairer, DocumentStyle, LayoutAssembler, LayoutOptions, Lexicon, MarkdownDecoder,
    PageFurnitureSpec,
};

fn sample_report() -> String {
    let mut markdown = String::new();
    for quarter in 1..=40 {
        markdown.push_str(&format!("# 苹果公司第{}季度\n\n", quarter));
        markdown.push_str("创纪录的收入达到历史新高，同比增长显著。\n\n");
        markdown.push_str("## 产品表现\n\n- 美洲\n- 欧洲\n- 亚太地区\n\n");
        markdown.push_str("蒂姆·库克表示：*我们将继续投资于创新和变革性工具*。\n\n");
    }
    markdown
}

fn pipeline_benchmark(c: &mut Criterion) {
    let markdown = sample_report();
    let decoder = MarkdownDecoder::new();
    let lexicon = Lexicon::financial();
    let style = DocumentStyle::default();
    let spec = PageFurnitureSpec::new("LLMQuant Financial Report", "February 2024");

    c.bench_function("parse", |b| {
        b.iter(|| decoder.parse(std::hint::black_box(&markdown)))
    });

    let blocks = decoder.parse(&markdown);
    c.bench_function("pair", |b| {
        b.iter(|| BilingualPairer::new(&lexicon).pair_all(std::hint::black_box(&blocks)))
    });

    let entries = BilingualPairer::new(&lexicon).pair_all(&blocks);
    let assembler = LayoutAssembler::new(LayoutOptions::extended(), &style);
    c.bench_function("assemble", |b| {
        b.iter(|| assembler.assemble(std::hint::black_box(&entries), &spec))
    });
}

criterion_group!(benches, pipeline_benchmark);
criterion_main!(benches);
