use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use otp_core::{
    OtpConfig, RawSelection, RenderState, SelectionDirection, ValueStore, normalize,
};

const MAX_LENGTH: usize = 6;

fn caret_walk() -> Vec<RawSelection> {
    // Walk the caret from the end to the start and back again.
    (0..=MAX_LENGTH)
        .rev()
        .chain(0..=MAX_LENGTH)
        .map(RawSelection::caret)
        .collect()
}

fn bench_normalize_walk(c: &mut Criterion) {
    let walk = caret_walk();
    c.bench_function("bench_normalize_walk", |b| {
        b.iter(|| {
            let mut prev = RawSelection::NONE;
            for raw in &walk {
                let out = normalize(black_box(*raw), prev, MAX_LENGTH, MAX_LENGTH);
                prev = out.selection;
            }
            black_box(prev);
        });
    });
}

fn bench_render_state(c: &mut Criterion) {
    let mirror = RawSelection::new(2, 3, SelectionDirection::Backward);
    c.bench_function("bench_render_state", |b| {
        b.iter(|| {
            let state = RenderState::derive(black_box("123456"), mirror, MAX_LENGTH, true, false);
            black_box(state.slots.len());
        });
    });
}

fn bench_commit_typing(c: &mut Criterion) {
    let opts = match OtpConfig::new(MAX_LENGTH).build() {
        Ok(opts) => opts,
        Err(err) => panic!("bench config: {err}"),
    };
    c.bench_function("bench_commit_typing", |b| {
        b.iter_batched(
            || ValueStore::uncontrolled("", MAX_LENGTH),
            |mut store| {
                let mut value = String::new();
                for ch in "1234567".chars() {
                    value.push(ch);
                    store.commit(&value, &opts.pattern, false, &mut |_| {});
                }
                black_box(store.value().len());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_normalize_walk,
    bench_render_state,
    bench_commit_typing
);
criterion_main!(benches);
