//! Benchmark for VM throughput on a self-replicating program using relative addressing.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use intcode_vm::Interpreter;

const QUINE: [i64; 16] = [109, 1, 204, -1, 1001, 100, 1, 100, 1008, 100, 16, 101, 1006, 101, 0, 99];

fn test_quine(c: &mut Criterion) {
    let mut group = c.benchmark_group("intcode_vm");

    group.sample_size(500);
    group.bench_function(BenchmarkId::from_parameter("quine"), |b| {
        let vm = Interpreter::load(&QUINE);
        b.iter(|| {
            let mut vm = vm.clone();
            let outputs = vm.run_until_input_or_halt().expect("vm error");
            assert_eq!(outputs, QUINE);
        });
    });

    group.finish();
}

criterion_group!(benches, test_quine);
criterion_main!(benches);
