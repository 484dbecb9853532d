use criterion::{criterion_group, criterion_main, Criterion};
use slot_queue_pool::QueueLibrary;

fn leaked_buffer(slots: usize) -> &'static mut [u8] {
    vec![0u8; slots * 8].leak()
}

fn bench_enqueue_dequeue(c: &mut Criterion) {
    let mut group = c.benchmark_group("fifo");

    group.bench_function("single_queue_enqueue_dequeue", |b| {
        let mut lib = QueueLibrary::new();
        lib.init_queues(leaked_buffer(256)).unwrap();
        let handle = lib.create_queue();
        b.iter(|| {
            lib.enqueue_byte(handle, 7);
            lib.dequeue_byte(handle);
        });
    });

    group.bench_function("64_queues_round_robin", |b| {
        let mut lib = QueueLibrary::new();
        lib.init_queues(leaked_buffer(1344)).unwrap();
        let handles: Vec<_> = (0..64).map(|_| lib.create_queue()).collect();
        b.iter(|| {
            for &h in &handles {
                lib.enqueue_byte(h, 1);
            }
            for &h in &handles {
                lib.dequeue_byte(h);
            }
        });
    });

    group.bench_function("create_destroy", |b| {
        let mut lib = QueueLibrary::new();
        lib.init_queues(leaked_buffer(256)).unwrap();
        b.iter(|| {
            let h = lib.create_queue();
            lib.destroy_queue(h);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_enqueue_dequeue);
criterion_main!(benches);
