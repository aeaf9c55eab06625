use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::people::domain::PersonInput;
use service::people::repository::{mock::MockPeopleRepository, JsonFilePeopleRepository};
use service::people::service::PeopleService;

fn input() -> PersonInput {
    PersonInput {
        name: Some("Bench".into()),
        email: Some("bench@example.com".into()),
        affiliation: Some("Lab".into()),
        role: Some("reviewer".into()),
    }
}

fn bench_add_person(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let mem = PeopleService::new(Arc::new(MockPeopleRepository::default()));
    c.bench_function("people_add_in_memory", |b| {
        b.to_async(&rt).iter(|| async { mem.add_person(input()).await.unwrap() });
    });

    // every add rewrites the whole file, so cost grows with the list
    let path = std::env::temp_dir().join(format!("people_bench_{}.json", std::process::id()));
    let file = PeopleService::new(Arc::new(JsonFilePeopleRepository::new(&path)));
    c.bench_function("people_add_json_file", |b| {
        b.to_async(&rt).iter(|| async { file.add_person(input()).await.unwrap() });
    });
    let _ = std::fs::remove_file(&path);
}

criterion_group!(benches, bench_add_person);
criterion_main!(benches);
