use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use lexcheck::{
    AuthorityLevel, CanonResolver, ConflictDetector, Modality, Norm, TemporalNormalizer,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Builds `subjects * versions` norms: each subject/action group spans
/// every version with alternating modalities, so detection does realistic
/// pairwise work inside every group.
fn make_norms(subjects: usize, versions: usize) -> Vec<Norm> {
    let mut norms = Vec::with_capacity(subjects * versions);
    for s in 0..subjects {
        for v in 0..versions {
            let modality = match v % 3 {
                0 => Modality::Obligation,
                1 => Modality::Permission,
                _ => Modality::Prohibition,
            };
            let norm = Norm::builder()
                .modality(modality)
                .subject(format!("operators of system {s}"))
                .action(format!("report incidents for system {s}"))
                .source_id(format!("src_{s}_{v}"))
                .version_id(format!("v{v}"))
                .authority_level(AuthorityLevel::Regulation)
                .enactment_date(date(2020 + i32::try_from(v).unwrap(), 1, 1))
                .effective_start(date(2020 + i32::try_from(v).unwrap(), 6, 1))
                .build()
                .unwrap();
            norms.push(norm);
        }
    }
    TemporalNormalizer::new().normalize_norms(norms)
}

fn bench_detect(c: &mut Criterion) {
    let norms = make_norms(64, 4);

    let mut group = c.benchmark_group("detect");
    group.throughput(Throughput::Elements(norms.len() as u64));
    group.bench_function("detect/64_groups_x_4_versions", |b| {
        let detector = ConflictDetector::new();
        b.iter(|| detector.detect(&norms));
    });
    group.finish();
}

fn bench_detect_and_resolve(c: &mut Criterion) {
    let norms = make_norms(64, 4);

    c.bench_function("detect_resolve/64_groups_x_4_versions", |b| {
        let detector = ConflictDetector::new();
        let resolver = CanonResolver::new();
        b.iter(|| resolver.resolve_all(detector.detect(&norms)));
    });
}

criterion_group!(benches, bench_detect, bench_detect_and_resolve);
criterion_main!(benches);
