use commandeer::grammar::{
    ArgSpec, ArgType, CommandSpec, ConverterRegistry, SubCommandSpec, match_sub_command,
};
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::sync::Arc;

// Benchmarks for the match-and-convert hot path. Dispatch overhead on top
// of this is registry lookup plus permission checks, both O(1)-ish.

fn spec_with_sub_commands(count: usize) -> Arc<CommandSpec> {
    let mut spec = CommandSpec::new("shop");
    for index in 0..count {
        spec = spec.sub_command(SubCommandSpec::new(vec![
            ArgSpec::literal(format!("sub{index}")),
            ArgSpec::required("amount", ArgType::Integer),
        ]));
    }
    Arc::new(spec)
}

fn matching_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("matcher");
    group.throughput(Throughput::Elements(1));

    let spec = spec_with_sub_commands(8);
    let tokens = ["sub7", "42"];
    group.bench_function("match_last_of_eight", |b| {
        b.iter(|| match_sub_command(spec.sub_commands(), &tokens))
    });

    let miss = ["nosuch", "42"];
    group.bench_function("no_match_of_eight", |b| {
        b.iter(|| match_sub_command(spec.sub_commands(), &miss))
    });

    group.finish();
}

fn conversion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(1));

    let registry = ConverterRegistry::default();
    let spec = Arc::new(
        CommandSpec::new("mute").sub_command(SubCommandSpec::new(vec![
            ArgSpec::literal("for"),
            ArgSpec::required("duration", ArgType::Duration),
            ArgSpec::required("silent", ArgType::Boolean),
        ])),
    );
    let tokens = ["for", "1d:12h:30m", "true"];

    group.bench_function("convert_three_args", |b| {
        b.iter(|| registry.convert(spec.clone(), 0, &tokens).unwrap())
    });

    group.finish();
}

criterion_group!(benches, matching_benchmark, conversion_benchmark);
criterion_main!(benches);
