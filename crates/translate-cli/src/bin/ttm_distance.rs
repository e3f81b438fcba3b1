// ttm-distance: Print the edit distance and match quality of string pairs.
//
// Reads tab-separated pairs from stdin (one per line) and prints the
// code point edit distance and the quality score of each pair.
//
// Usage:
//   ttm-distance [OPTIONS] [A B]
//
// Options:
//   -q, --quality   Also print the quality score
//   -h, --help      Print help

use std::io::{self, BufRead, Write};

use translate_ttm::{levenshtein, quality};

fn main() {
    translate_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if translate_cli::wants_help(&args) {
        println!("ttm-distance: Edit distance between strings.");
        println!();
        println!("Usage: ttm-distance [OPTIONS] [A B]");
        println!();
        println!("If A and B are given, compares them.");
        println!("Otherwise reads tab-separated pairs from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -q, --quality   Also print the quality score");
        println!("  -h, --help      Print this help");
        return;
    }

    let show_quality = args.iter().any(|a| a == "-q" || a == "--quality");
    let strings: Vec<&String> = args.iter().filter(|a| !a.starts_with('-')).collect();

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let mut compare = |a: &str, b: &str| {
        let len_a = a.chars().count();
        let len_b = b.chars().count();
        let distance = levenshtein(a, b, len_a, len_b);
        if show_quality {
            let _ = writeln!(out, "{distance}\t{:.4}", quality(len_a, len_b, distance));
        } else {
            let _ = writeln!(out, "{distance}");
        }
    };

    match strings.as_slice() {
        [] => {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(l) => l,
                    Err(e) => {
                        eprintln!("error reading stdin: {e}");
                        break;
                    }
                };
                if line.is_empty() {
                    continue;
                }
                // A line without a tab compares against the empty string.
                let (a, b) = line.split_once('\t').unwrap_or((line.as_str(), ""));
                compare(a, b);
            }
        }
        [a, b] => compare(a.as_str(), b.as_str()),
        _ => translate_cli::fatal("expected exactly two strings"),
    }
}
