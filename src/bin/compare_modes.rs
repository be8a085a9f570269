use fastx_kit::seqio::{
    BoundaryMode, InputMode, ReadOptions, Record, load_records_from_path,
    load_records_with_options,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};

const DEFAULT_CHUNK_SIZES: [usize; 4] = [4096, 65536, 1 << 20, 1 << 24];

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <fasta_path> [chunk_size...]", args[0]);
        eprintln!("\nExamples:");
        eprintln!("  {} dme.fa", args[0]);
        eprintln!("  {} dme.fa 17 4096 1048576", args[0]);
        std::process::exit(1);
    }

    let path = PathBuf::from(&args[1]);
    let mut chunk_sizes: Vec<usize> = args[2..]
        .iter()
        .filter_map(|s| s.parse().ok())
        .filter(|&n| n > 0)
        .collect();
    if chunk_sizes.is_empty() {
        chunk_sizes = DEFAULT_CHUNK_SIZES.to_vec();
    }

    if !path.exists() {
        eprintln!("File does not exist: {:?}", path);
        std::process::exit(1);
    }

    println!("════════════════════════════════════════════════════════");
    println!("FASTA Stream vs Mmap Loading Comparison");
    println!("════════════════════════════════════════════════════════");
    println!("File: {}", path.display());
    println!("Chunk sizes: {:?}", chunk_sizes);
    println!("════════════════════════════════════════════════════════\n");

    println!("Running Mmap mode...");
    let start = Instant::now();
    let reference = match load_records_from_path(&path, InputMode::Mmap) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Failed to load records: {}", e);
            std::process::exit(1);
        }
    };
    let mmap_time = start.elapsed();
    report("Mmap", &reference, mmap_time);

    let mut mismatches = 0;
    for &chunk_size in &chunk_sizes {
        for boundary in [BoundaryMode::CarryOver, BoundaryMode::Legacy] {
            let label = format!("Stream chunk={chunk_size} {boundary:?}");
            println!("\nRunning {label}...");
            let start = Instant::now();
            let options = ReadOptions::new(chunk_size, boundary);
            let records = match load_records_with_options(&path, InputMode::Stream, options) {
                Ok(records) => records,
                Err(e) => {
                    eprintln!("Stream loading failed: {}", e);
                    std::process::exit(1);
                }
            };
            let elapsed = start.elapsed();
            report(&label, &records, elapsed);
            println!(
                "  Relative to Mmap: {:.2}x",
                elapsed.as_secs_f64() / mmap_time.as_secs_f64().max(f64::EPSILON)
            );

            let details = differences(&reference, &records);
            if details.is_empty() {
                println!("  Consistent with Mmap");
            } else if boundary == BoundaryMode::Legacy {
                // legacy mode is expected to drift whenever a header straddles a chunk
                println!("  Legacy drift ({} difference(s)):", details.len());
                for detail in details {
                    println!("{}", detail);
                }
            } else {
                println!("  Found {} mismatch(es):", details.len());
                for detail in details {
                    println!("{}", detail);
                }
                mismatches += 1;
            }
        }
    }

    println!("\n════════════════════════════════════════════════════════");
    if mismatches > 0 {
        println!("{} carry-over run(s) disagreed with Mmap", mismatches);
        std::process::exit(1);
    }
    println!("Test completed!");
    println!("════════════════════════════════════════════════════════");
}

fn report(label: &str, records: &[Record], elapsed: Duration) {
    let bases: usize = records.iter().map(Record::len).sum();
    println!("  {label}: {} records, {} bases in {:?}", records.len(), bases, elapsed);
}

fn differences(expected: &[Record], actual: &[Record]) -> Vec<String> {
    let mut details = Vec::new();
    if expected.len() != actual.len() {
        details.push(format!(
            "    Record count mismatch: Mmap={}, Stream={}",
            expected.len(),
            actual.len()
        ));
    }
    for (i, (lhs, rhs)) in expected.iter().zip(actual.iter()).enumerate() {
        if lhs != rhs {
            details.push(format!("    Record #{} differs: {:?} vs {:?}", i + 1, lhs, rhs));
            if details.len() >= 10 {
                details.push("    ... (additional mismatches omitted)".to_string());
                break;
            }
        }
    }
    details
}
