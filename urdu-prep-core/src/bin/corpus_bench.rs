//! Corpus Benchmarking Tool
//!
//! Measures throughput of the analysis stages on a large Urdu text file, one
//! sentence or paragraph per line (for example a previously cleaned corpus).
//!
//! ## What It Benchmarks
//!
//! 1. **Normalization**: diacritic/joiner removal, letterform and punctuation folding
//! 2. **Segmentation**: splitting lines on the Urdu full stop
//! 3. **Windowing**: rendering every sliding window of sentences
//!
//! ## Usage
//!
//! ```bash
//! ./target/release/corpus_bench /path/to/corpus.txt [group_size]
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Segment ===
//! --------------------------------
//! Mode        : Segment
//! Elapsed     : 0.081 s
//! Throughput  : 1.204 GiB/s
//! Items       : 2_804_113
//! Items/sec   : 34_618_679
//! --------------------------------
//! ```

use std::env;
use std::fs;
use std::time::{Duration, Instant};

use urdu_prep_core::analyzer::{windows, SentenceSegmenter, TextNormalizer};
use urdu_prep_core::types::DEFAULT_GROUP_SIZE;

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: corpus_bench <path> [group_size]");
        std::process::exit(1);
    }

    let path = &args[1];
    let group_size = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .filter(|&n: &usize| n > 0)
        .unwrap_or(DEFAULT_GROUP_SIZE);

    println!("Loading file...");
    let input = fs::read_to_string(path)?;
    let lines: Vec<&str> = input.lines().collect();

    println!("File size:  {}", fmt_bytes(input.len() as u64));
    println!("Lines:      {}", fmt_count(lines.len() as u64));
    println!("Group size: {}\n", group_size);

    bench_normalize(&input, &lines);
    bench_segment(&input, &lines);
    bench_windows(&input, &lines, group_size);

    Ok(())
}

fn bench_normalize(input: &str, lines: &[&str]) {
    let normalizer = TextNormalizer::default();
    let mut out = String::new();

    println!("=== Normalize ===");

    let mut run = || {
        let mut kept = 0u64;
        for line in lines {
            normalizer.normalize_into(line, &mut out);
            kept += u64::from(!out.is_empty());
        }
        std::hint::black_box(kept)
    };

    warmup(|| {
        run();
    });

    let mut kept = 0u64;
    let elapsed = measure(|| kept = run());

    print_perf("Normalize", input.len(), elapsed, kept);
}

fn bench_segment(input: &str, lines: &[&str]) {
    let segmenter = SentenceSegmenter::default();

    println!("=== Segment ===");

    let run = || {
        let mut n = 0u64;
        for line in lines {
            segmenter.segment_line(line, |_| n += 1);
        }
        std::hint::black_box(n)
    };

    warmup(|| {
        run();
    });

    let mut sentences = 0u64;
    let elapsed = measure(|| sentences = run());

    print_perf("Segment", input.len(), elapsed, sentences);
}

fn bench_windows(input: &str, lines: &[&str], group_size: usize) {
    let sentences = SentenceSegmenter::default().segment(lines.iter().copied());
    let mut rendered = String::new();

    println!("=== Windows (rendered) ===");

    let mut run = || {
        let mut n = 0u64;
        for w in windows(&sentences, group_size) {
            use std::fmt::Write;
            rendered.clear();
            let _ = write!(rendered, "{}", w);
            n += 1;
        }
        std::hint::black_box(n)
    };

    warmup(|| {
        run();
    });

    let mut count = 0u64;
    let elapsed = measure(|| count = run());

    print_perf("Windows", input.len(), elapsed, count);
}

fn warmup<F: FnMut()>(mut f: F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(mut f: F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, input_bytes: usize, elapsed: Duration, items: u64) {
    let secs = elapsed.as_secs_f64();
    let gib = input_bytes as f64 / (1024.0 * 1024.0 * 1024.0);

    println!("--------------------------------");
    println!("Mode        : {}", label);
    println!("Elapsed     : {:.3} s", secs);
    println!("Throughput  : {:.3} GiB/s", gib / secs);

    if items > 0 {
        println!("Items       : {}", fmt_count(items));
        println!("Items/sec   : {}", fmt_count((items as f64 / secs) as u64));
    }

    println!("--------------------------------\n");
}

fn fmt_bytes(b: u64) -> String {
    if b >= 1024 * 1024 * 1024 {
        format!("{:.2} GiB", b as f64 / (1024.0 * 1024.0 * 1024.0))
    } else if b >= 1024 * 1024 {
        format!("{:.2} MiB", b as f64 / (1024.0 * 1024.0))
    } else if b >= 1024 {
        format!("{:.2} KiB", b as f64 / 1024.0)
    } else {
        format!("{} B", b)
    }
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
