use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use supplytrack_core::Entity;
use supplytrack_infra::EntityStore;
use supplytrack_inventory::NewInventoryItem;
use supplytrack_transfers::{NewTransfer, TransferFilter, TransferStatus, TransferType};

fn seeded_store(items: usize, transfers_per_item: usize) -> EntityStore {
    let store = EntityStore::new();
    for i in 0..items {
        let sku = format!("SKU-{i}");
        store
            .create_inventory_item(NewInventoryItem::new(sku.clone(), "Widget", 1_000))
            .unwrap();
        for n in 0..transfers_per_item {
            let t = store
                .create_transfer(NewTransfer::new(TransferType::Outgoing, sku.clone(), 1))
                .unwrap();
            if n % 2 == 0 {
                store.set_transfer_status(t.id(), TransferStatus::Completed).unwrap();
            }
        }
    }
    store
}

fn bench_transfer_completion(c: &mut Criterion) {
    let store = seeded_store(1, 0);

    c.bench_function("transfer_create_and_complete", |b| {
        b.iter(|| {
            let t = store
                .create_transfer(NewTransfer::new(TransferType::Incoming, "SKU-0", 1))
                .unwrap();
            black_box(store.set_transfer_status(t.id(), TransferStatus::Completed).unwrap());
        })
    });
}

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics_scan");

    for items in [10usize, 100, 1_000] {
        let store = seeded_store(items, 10);
        group.throughput(Throughput::Elements((items * 10) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(items), &store, |b, store| {
            b.iter(|| black_box(store.statistics().unwrap()))
        });
    }

    group.finish();
}

fn bench_filtered_listing(c: &mut Criterion) {
    let store = seeded_store(100, 10);
    let filter = TransferFilter {
        status: Some(TransferStatus::Pending),
        transfer_type: None,
    };

    c.bench_function("list_pending_transfers", |b| {
        b.iter(|| black_box(store.list_transfers(filter).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_transfer_completion,
    bench_statistics,
    bench_filtered_listing
);
criterion_main!(benches);
