//! DAP Performance Benchmarks (AC14, AC15)
//!
//! Performance benchmarks for DAP adapter operations
//!
//! Specification: docs/DAP_IMPLEMENTATION_SPECIFICATION.md#performance-specifications

use criterion::{criterion_group, criterion_main, Criterion, BenchmarkId};
use std::time::Duration;

/// Benchmark breakpoint operations (AC14)
/// Target: <50ms breakpoint verification
fn benchmark_breakpoint_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("breakpoint_operations");
    group.measurement_time(Duration::from_secs(10));

    // TODO: Load Perl source file fixtures (small, medium, large)
    // TODO: Benchmark setBreakpoints request handling
    // TODO: Benchmark AST-based validation
    // TODO: Benchmark path canonicalization
    // TODO: Target: <50ms per operation

    group.bench_function("set_breakpoints_small", |b| {
        b.iter(|| {
            // TODO: Set breakpoints in small file (100 lines)
            // panic!("Benchmark not yet implemented");
        });
    });

    group.bench_function("set_breakpoints_medium", |b| {
        b.iter(|| {
            // TODO: Set breakpoints in medium file (1000 lines)
            // panic!("Benchmark not yet implemented");
        });
    });

    group.bench_function("set_breakpoints_large", |b| {
        b.iter(|| {
            // TODO: Set breakpoints in large file (10K+ lines)
            // panic!("Benchmark not yet implemented");
        });
    });

    group.finish();
}

/// Benchmark stepping operations (AC15)
/// Target: <100ms p95 latency for step/continue
fn benchmark_stepping_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("stepping_operations");
    group.measurement_time(Duration::from_secs(10));

    // TODO: Start DAP session with breakpoint
    // TODO: Benchmark continue request
    // TODO: Benchmark next request (step over)
    // TODO: Benchmark stepIn request
    // TODO: Benchmark stepOut request
    // TODO: Target: <100ms p95 latency

    group.bench_function("continue", |b| {
        b.iter(|| {
            // TODO: Send continue request, measure latency
            // panic!("Benchmark not yet implemented");
        });
    });

    group.bench_function("next", |b| {
        b.iter(|| {
            // TODO: Send next request, measure latency
            // panic!("Benchmark not yet implemented");
        });
    });

    group.bench_function("step_in", |b| {
        b.iter(|| {
            // TODO: Send stepIn request, measure latency
            // panic!("Benchmark not yet implemented");
        });
    });

    group.bench_function("step_out", |b| {
        b.iter(|| {
            // TODO: Send stepOut request, measure latency
            // panic!("Benchmark not yet implemented");
        });
    });

    group.finish();
}

/// Benchmark variable expansion (AC15)
/// Target: <200ms initial scope retrieval, <100ms per child expansion
fn benchmark_variable_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("variable_expansion");
    group.measurement_time(Duration::from_secs(10));

    // TODO: Trigger breakpoint with local variables
    // TODO: Benchmark scopes request
    // TODO: Benchmark variables request
    // TODO: Benchmark child expansion (arrays, hashes)
    // TODO: Target: <200ms initial, <100ms per child

    group.bench_function("scopes_retrieval", |b| {
        b.iter(|| {
            // TODO: Send scopes request, measure latency
            // panic!("Benchmark not yet implemented");
        });
    });

    group.bench_function("variables_initial", |b| {
        b.iter(|| {
            // TODO: Send variables request (top-level), measure latency
            // panic!("Benchmark not yet implemented");
        });
    });

    group.bench_function("variables_child_expansion", |b| {
        b.iter(|| {
            // TODO: Expand child variables (array elements), measure latency
            // panic!("Benchmark not yet implemented");
        });
    });

    group.finish();
}

/// Benchmark incremental parsing with breakpoints (AC15)
/// Target: <1ms incremental breakpoint updates
fn benchmark_incremental_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("incremental_parsing");
    group.measurement_time(Duration::from_secs(10));

    // TODO: Set breakpoints in source file
    // TODO: Apply text edits
    // TODO: Benchmark incremental parsing latency
    // TODO: Benchmark breakpoint re-validation latency
    // TODO: Target: <1ms total update

    group.bench_function("incremental_update", |b| {
        b.iter(|| {
            // TODO: Apply text edit, trigger incremental parsing
            // panic!("Benchmark not yet implemented");
        });
    });

    group.bench_function("breakpoint_revalidation", |b| {
        b.iter(|| {
            // TODO: Re-validate breakpoints after edit
            // panic!("Benchmark not yet implemented");
        });
    });

    group.finish();
}

/// Benchmark memory overhead (AC15)
/// Target: <1MB adapter state, <5MB Perl shim process
fn benchmark_memory_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("memory_overhead");
    group.measurement_time(Duration::from_secs(10));

    // TODO: Create DAP session
    // TODO: Measure adapter memory usage
    // TODO: Spawn Perl shim process
    // TODO: Measure shim process memory
    // TODO: Target: <1MB adapter, <5MB shim

    group.bench_function("adapter_state_memory", |b| {
        b.iter(|| {
            // TODO: Measure adapter memory usage
            // panic!("Benchmark not yet implemented");
        });
    });

    group.bench_function("perl_shim_memory", |b| {
        b.iter(|| {
            // TODO: Measure Perl shim process memory
            // panic!("Benchmark not yet implemented");
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_breakpoint_operations,
    benchmark_stepping_operations,
    benchmark_variable_expansion,
    benchmark_incremental_parsing,
    benchmark_memory_overhead
);
criterion_main!(benches);
