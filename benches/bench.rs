// Criterion benchmarks for Reloop Algo

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use reloop_algo::core::{Matcher, distance::haversine_distance, volume::volume_compatibility, scoring::score_listing};
use reloop_algo::models::{Listing, MatchQuery, RecyclerProfile, ScoringParams};

fn create_listing(id: usize, lat: f64, lon: f64) -> Listing {
    Listing {
        id: format!("listing_{}", id),
        title: format!("Listing {}", id),
        waste_type: if id % 3 == 0 { "Metal Scraps" } else { "Plastic Polymers" }.to_string(),
        volume: format!("{} tons", 10 + id % 200),
        latitude: lat,
        longitude: lon,
        producer_id: format!("producer_{}", id % 25),
        description: None,
        is_active: true,
        created_at: None,
    }
}

fn create_profile() -> RecyclerProfile {
    RecyclerProfile {
        recycler_id: "recycler_1".to_string(),
        company_name: "Columbus Metal Recovery".to_string(),
        waste_types: vec!["Metal Scraps".to_string()],
        latitude: 40.0,
        longitude: -83.0,
        capacity: "150 tons".to_string(),
        process_efficiency: 30.0,
        certifications: vec!["ISO14001".to_string(), "EPA".to_string()],
    }
}

fn create_query(limit: usize) -> MatchQuery {
    MatchQuery {
        waste_type: None,
        min_match_score: None,
        bounding_box: None,
        exclude_listing_ids: vec![],
        limit,
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(40.0),
                black_box(-83.0),
                black_box(41.4993),
                black_box(-81.6944),
            )
        });
    });
}

fn bench_volume_compatibility(c: &mut Criterion) {
    c.bench_function("volume_compatibility", |b| {
        b.iter(|| volume_compatibility(black_box("120 tons"), black_box("100 tons")));
    });
}

fn bench_score_listing(c: &mut Criterion) {
    let listing = create_listing(0, 40.1, -83.1);
    let profile = create_profile();
    let params = ScoringParams::default();

    c.bench_function("score_listing", |b| {
        b.iter(|| score_listing(black_box(&listing), black_box(&profile), black_box(&params)));
    });
}

fn bench_recommend(c: &mut Criterion) {
    let matcher = Matcher::with_default_params();
    let profile = create_profile();

    let mut group = c.benchmark_group("recommend");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<Listing> = (0..*candidate_count)
            .map(|i| {
                let lat_offset = (i as f64 * 0.001) % 0.5;
                let lon_offset = (i as f64 * 0.001) % 0.5;
                create_listing(i, 40.0 + lat_offset, -83.0 + lon_offset)
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("recommend", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    matcher.recommend(
                        black_box(&profile),
                        black_box(candidates.clone()),
                        black_box(&create_query(20)),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_volume_compatibility,
    bench_score_listing,
    bench_recommend
);
criterion_main!(benches);
