//! # Ledger Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | `record_donation` (audit + broadcast included) | < 100µs |
//! | `aggregate` over a month of entries | < 5ms |
//! | `list_active` with a donor filter | < 5ms |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use console_runtime::{ConsoleConfig, ParishConsole};
use pc_03_transactions::{RecordDonationRequest, TransactionFilter};
use rust_decimal::Decimal;
use shared_types::{Actor, Role, UserId};
use std::time::Duration;
use tokio::runtime::Runtime;

const CATEGORIES: [&str; 4] = ["Offerings", "Tithes", "Mass Intentions", "Other"];

fn donation(i: usize) -> RecordDonationRequest {
    RecordDonationRequest {
        donor: Some(format!("Donor {}", i % 50)),
        amount: Decimal::from(100 + (i % 20) * 50),
        category: CATEGORIES[i % CATEGORIES.len()].to_string(),
        payment_method: "cash".to_string(),
        ..Default::default()
    }
}

fn seeded_console(rt: &Runtime, entries: usize) -> ParishConsole {
    let console = ParishConsole::new(ConsoleConfig::default()).unwrap();
    let secretary = Actor::new(UserId::new(), "Maria Santos", Role::Secretary);
    rt.block_on(async {
        for i in 0..entries {
            console
                .transactions
                .record_donation(&secretary, donation(i))
                .await
                .unwrap();
        }
    });
    console
}

fn bench_record_donation(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let console = ParishConsole::new(ConsoleConfig::default()).unwrap();
    let secretary = Actor::new(UserId::new(), "Maria Santos", Role::Secretary);

    let mut group = c.benchmark_group("pc-03-record");
    group.measurement_time(Duration::from_secs(5));
    let mut i = 0usize;
    group.bench_function("record_donation", |b| {
        b.iter(|| {
            i += 1;
            rt.block_on(console.transactions.record_donation(&secretary, donation(i)))
                .unwrap()
        })
    });
    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("pc-03-aggregate");

    for size in [100, 1_000, 5_000] {
        let console = seeded_console(&rt, size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("aggregate_all", size), &size, |b, _| {
            b.iter(|| {
                black_box(
                    rt.block_on(console.transactions.aggregate(&TransactionFilter::new()))
                        .unwrap(),
                )
            })
        });

        let by_donor = TransactionFilter::new().donor("donor 7");
        group.bench_with_input(BenchmarkId::new("list_by_donor", size), &size, |b, _| {
            b.iter(|| black_box(rt.block_on(console.transactions.list_active(&by_donor)).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_record_donation, bench_aggregate);
criterion_main!(benches);
