use clap::Parser;
use linear_hash::Builder;
use linear_hash::LinearHashTable;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    #[arg(short = 't', long = "threshold", default_value_t = 6)]
    threshold: u8,

    /// Remove every n-th key after filling, leaving tombstones behind.
    #[arg(short = 'r', long = "remove_every", default_value_t = 0)]
    remove_every: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!(
        "Creating LinearHashTable with capacity {} and threshold {}",
        args.target_capacity, args.threshold
    );

    let mut table: LinearHashTable<u64> = Builder::new()
        .capacity(args.target_capacity)
        .threshold(args.threshold)
        .build()?;

    println!("Filling table with string keys...");

    let start_capacity = table.capacity();
    let num_values = start_capacity;
    for i in 0..num_values {
        let value = i as u64;
        table.insert(format!("key_{value:016X}"), value)?;
    }

    println!("Inserted {} values into table", table.len());
    if table.capacity() != start_capacity {
        println!(
            "Table grew from {} to {} buckets",
            start_capacity,
            table.capacity()
        );
    }

    if args.remove_every > 0 {
        let mut removed = 0;
        for i in (0..num_values).step_by(args.remove_every) {
            if table.remove(format!("key_{:016X}", i as u64)).is_some() {
                removed += 1;
            }
        }
        println!("Removed {removed} values, {} remain", table.len());
    }

    println!(
        "Final load factor: {:.2}% (load {}/10)",
        (table.len() as f64 / table.capacity() as f64) * 100.0,
        table.load()
    );

    table.print_probe_histogram();
    table.debug_stats().print();

    Ok(())
}
