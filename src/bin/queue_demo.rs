//! Small CLI that drives a pool of queues under a pseudo-random workload, printing a summary
//! of the capacity metrics and the final state. Useful for eyeballing the allocator's
//! behavior under load without writing a test.

use clap::Parser;
use slot_queue_pool::{create_queue, dequeue_byte, destroy_queue, enqueue_byte, init_queues};

#[derive(Parser, Debug)]
#[command(name = "queue-demo", about = "Exercises the in-buffer FIFO queue pool")]
struct Args {
    /// Number of 8-byte slots to back the pool with.
    #[arg(long, default_value_t = 256)]
    slots: usize,

    /// Number of queues to create.
    #[arg(long, default_value_t = 16)]
    queues: usize,

    /// Number of enqueue/dequeue operations to perform per queue.
    #[arg(long, default_value_t = 200)]
    ops: usize,

    /// Seed for the pseudo-random operation order.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn on_out_of_memory() -> ! {
    eprintln!("queue-demo: out of memory, stopping");
    std::process::exit(1);
}

fn on_illegal_operation() -> ! {
    eprintln!("queue-demo: illegal operation, stopping");
    std::process::exit(1);
}

fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    let buffer: &'static mut [u8] = vec![0u8; args.slots * 8].leak();
    let metrics = init_queues(buffer).unwrap_or_else(|e| {
        eprintln!("queue-demo: {e}");
        std::process::exit(1);
    });
    println!("{metrics:#?}");

    slot_queue_pool::set_out_of_memory_callback(on_out_of_memory);
    slot_queue_pool::set_illegal_operation_callback(on_illegal_operation);

    let rng = fastrand::Rng::with_seed(args.seed);
    let handles: Vec<_> = (0..args.queues).map(|_| create_queue()).collect();
    let mut pending: Vec<Vec<u8>> = vec![Vec::new(); handles.len()];

    for step in 0..args.ops {
        for (i, &handle) in handles.iter().enumerate() {
            if pending[i].is_empty() || rng.bool() {
                let byte = rng.u8(..);
                enqueue_byte(handle, byte);
                pending[i].push(byte);
            } else {
                let expected = pending[i].remove(0);
                let got = dequeue_byte(handle);
                assert_eq!(got, expected, "queue {i} diverged at step {step}");
            }
        }
    }

    for handle in handles {
        destroy_queue(handle);
    }
    println!("workload complete: {} queues, {} ops each", args.queues, args.ops);
}
