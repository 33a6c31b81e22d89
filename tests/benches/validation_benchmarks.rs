//! # Polyalgo-Chain Validation Benchmarks
//!
//! | Operation | Expectation |
//! |-----------|-------------|
//! | classify | branch-free, nanoseconds |
//! | required target | bounded walk over the averaging window |
//! | proof-of-work check | one compact decode and a 256-bit compare |
//! | Argon2d header hash | dominated by the 4 MiB memory fill |
//! | full header validation | all of the above plus the identity hash |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pa_01_chain_params::{NetworkProfile, RuleRevision};
use pa_02_proof_of_work::{
    check_proof_of_work, classify, next_target, DifficultyEngine, NativePowHasher, PowHasher,
};
use pa_04_header_validation::HeaderValidator;
use pa_tests::fixtures::{FixedHasher, ScenarioChain};
use rand::Rng;
use shared_types::{CompactTarget, HashPrimitive, Lane, NetworkId, H256, HEADER_SIZE};
use std::time::Duration;

const BITS: CompactTarget = CompactTarget(0x1d00_ffff);

fn main_profile() -> NetworkProfile {
    NetworkProfile::build(NetworkId::Main).expect("main profile")
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("pa-02-classify");
    let versions: Vec<i32> = (0..1024).map(|_| rand::thread_rng().gen()).collect();

    group.throughput(Throughput::Elements(versions.len() as u64));
    group.bench_function("classify_1024", |b| {
        b.iter(|| {
            let mut lanes = [0u32; 5];
            for version in &versions {
                lanes[classify(black_box(*version)).index()] += 1;
            }
            black_box(lanes)
        })
    });
    group.finish();
}

fn bench_next_target(c: &mut Criterion) {
    let profile = main_profile();
    let mut group = c.benchmark_group("pa-02-difficulty");

    for rounds in [500u32, 2_000] {
        let mut chain = ScenarioChain::new();
        chain.push_rounds(rounds, 1_420_000_000, 33, BITS);

        for revision in [RuleRevision::Current, RuleRevision::Legacy] {
            group.bench_with_input(
                BenchmarkId::new(format!("{revision:?}"), rounds * 5),
                &chain,
                |b, chain| {
                    b.iter(|| {
                        next_target(
                            &chain.arena,
                            chain.tip,
                            black_box(Lane::Slot3),
                            &profile.params,
                            revision,
                        )
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_check_proof_of_work(c: &mut Criterion) {
    let profile = main_profile();
    let mut rng = rand::thread_rng();
    let hashes: Vec<H256> = (0..256).map(|_| H256(rng.gen())).collect();

    let mut group = c.benchmark_group("pa-02-verifier");
    group.throughput(Throughput::Elements(hashes.len() as u64));
    group.bench_function("check_proof_of_work_256", |b| {
        b.iter(|| {
            hashes
                .iter()
                .filter(|hash| check_proof_of_work(hash, Lane::Slot1, BITS, &profile.params))
                .count()
        })
    });
    group.finish();
}

fn bench_argon2d(c: &mut Criterion) {
    let hasher = NativePowHasher::new();
    let header = [0x5au8; HEADER_SIZE];

    let mut group = c.benchmark_group("pa-02-argon2d");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);
    group.bench_function("argon2d_header", |b| {
        b.iter(|| hasher.digest(HashPrimitive::Argon2d, black_box(&header)))
    });
    group.finish();
}

fn bench_validate_header(c: &mut Criterion) {
    let profile = main_profile();
    let mut chain = ScenarioChain::new();
    chain.push_rounds(450, 1_420_000_000, 33, BITS);
    let lane = Lane::Slot4;
    let bits =
        DifficultyEngine::new(&profile.params).required_target(&chain.arena, chain.tip, lane);
    let header = chain.child_header(lane, bits);
    let validator = HeaderValidator::new(&profile, FixedHasher(H256::zero()), true);

    let mut group = c.benchmark_group("pa-04-header-validation");
    group.bench_function("validate_header", |b| {
        b.iter(|| validator.validate(&chain.arena, chain.tip, black_box(&header)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_classify,
    bench_next_target,
    bench_check_proof_of_work,
    bench_argon2d,
    bench_validate_header
);
criterion_main!(benches);
