use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use prose_dict::Dictionary;
use prose_linter::rules::{ReadabilityRule, SpellingRule};
use prose_linter::{Pipeline, PipelineConfig};
use std::sync::Arc;

// Sample paragraph with findings for most rules: passive clauses, an
// insensitive term, a missing apostrophe, article mismatches, a doubled
// word, and a double-spaced sentence boundary.
const SAMPLE_PARAGRAPH: &str = "\
The committee was convened by the chairman on the first of May. We dont \
expect a immediate answer, but the the schedule has been arranged so that \
every objection is heard.  Some members take a hour to respond, and the \
minutes were written by the secretary without further comment.\n";

// Small Hunspell-style pair for the spelling benchmarks
const AFF: &str = "SFX S Y 1\nSFX S 0 s .\n";
const DIC: &str = "16
the
quick
brown
fox/S
jump/S
over
lazy
dog/S
and
cat/S
nap/S
a
an
in
on
sun
";

const SPELLING_TEXT: &str = "the quick brown fox jumps over the lazy dog and teh cat naps";

fn sample_document(paragraphs: usize) -> String {
    SAMPLE_PARAGRAPH.repeat(paragraphs)
}

fn default_pipeline() -> Pipeline {
    Pipeline::from_config(&PipelineConfig::default(), None).expect("default config is valid")
}

/// Pipeline construction from configuration
fn bench_pipeline_construction(c: &mut Criterion) {
    c.bench_function("pipeline_construction", |b| {
        b.iter(|| {
            // Measure: validate config and instantiate every rule
            black_box(Pipeline::from_config(&PipelineConfig::default(), None))
        });
    });
}

/// Full pipeline over one paragraph
fn bench_sequential_paragraph(c: &mut Criterion) {
    let pipeline = default_pipeline();

    c.bench_function("sequential_paragraph", |b| {
        b.iter(|| black_box(pipeline.run(black_box(SAMPLE_PARAGRAPH))));
    });
}

/// Full pipeline over a document-sized input, sequential runner
fn bench_sequential_document(c: &mut Criterion) {
    let pipeline = default_pipeline();
    let document = sample_document(100);

    c.bench_function("sequential_document", |b| {
        b.iter(|| black_box(pipeline.run(black_box(&document))));
    });
}

/// Full pipeline over the same document on the worker pool
fn bench_parallel_document(c: &mut Criterion) {
    let pipeline = default_pipeline();
    let document = sample_document(100);

    c.bench_function("parallel_document", |b| {
        b.iter(|| black_box(pipeline.run_parallel(black_box(&document))));
    });
}

/// The readability formulas alone, the heaviest per-sentence arithmetic
fn bench_readability_only(c: &mut Criterion) {
    let mut pipeline = Pipeline::new();
    pipeline.register(Arc::new(ReadabilityRule), None);
    let document = sample_document(100);

    c.bench_function("readability_only", |b| {
        b.iter(|| black_box(pipeline.run(black_box(&document))));
    });
}

/// Dictionary parsing and affix expansion
fn bench_dictionary_load(c: &mut Criterion) {
    c.bench_function("dictionary_load", |b| {
        b.iter(|| {
            // Measure: parse both files and expand affix rules
            black_box(Dictionary::from_strs(black_box(AFF), black_box(DIC)))
        });
    });
}

/// Spelling lookups including one miss that ranks suggestions
fn bench_spelling_with_dictionary(c: &mut Criterion) {
    let dictionary =
        Arc::new(Dictionary::from_strs(AFF, DIC).expect("benchmark dictionary parses"));

    c.bench_function("spelling_with_dictionary", |b| {
        b.iter_batched(
            || {
                // Setup: fresh pipeline sharing the loaded dictionary
                let mut pipeline = Pipeline::new();
                pipeline.register(Arc::new(SpellingRule::new(Some(dictionary.clone()))), None);
                pipeline
            },
            |pipeline| {
                // Measure: one full spelling pass
                black_box(pipeline.run(SPELLING_TEXT))
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_pipeline_construction,
    bench_sequential_paragraph,
    bench_sequential_document,
    bench_parallel_document,
    bench_readability_only,
    bench_dictionary_load,
    bench_spelling_with_dictionary,
);

criterion_main!(benches);
