// group-state: Evaluate message group workflow states from statistics.
//
// Reads tab-separated statistics rows from stdin (one per line):
//   GROUP LANG TOTAL TRANSLATED FUZZY PROOFREAD
// applies the rows in order and prints the state of each row's pair right
// after that row ("-" while no state is set).
//
// Usage:
//   group-state [-c CONFIG] [OPTIONS] [ROW]
//
// Options:
//   -c, --config PATH   Group state configuration (JSON)
//       --actor NAME    Identity recorded for changes (default: FuzzyBot)
//       --json          Print applied changes as JSON
//   -b, --breakdown     Also print percentages: proofread, translated,
//                       fuzzy, untranslated
//   -h, --help          Print help

use std::io::{self, BufRead, Write};

use translate_cli::{StatsRow, apply_rows, parse_row};
use translate_states::{ConfiguredGroups, InMemoryStateStore};

fn main() {
    translate_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config_path, args) = translate_cli::parse_config_path(&args);

    if translate_cli::wants_help(&args) {
        println!("group-state: Evaluate message group workflow states.");
        println!();
        println!("Usage: group-state [-c CONFIG] [OPTIONS] [ROW]");
        println!();
        println!("A row is: GROUP LANG TOTAL TRANSLATED FUZZY PROOFREAD");
        println!();
        println!("If a row is given as arguments, evaluates it.");
        println!("Otherwise reads tab-separated rows from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -c, --config PATH   Group state configuration (JSON)");
        println!("      --actor NAME    Identity recorded for changes (default: FuzzyBot)");
        println!("      --json          Print applied changes as JSON");
        println!("  -b, --breakdown     Also print the percentage breakdown");
        println!("  -h, --help          Print this help");
        println!();
        println!("Configuration search order:");
        println!("  --config, ${},", translate_cli::CONFIG_ENV);
        println!("  ~/.config/translate/states.json, ./states.json");
        return;
    }

    let (actor, args) = translate_cli::take_option(&args, "", "--actor")
        .unwrap_or_else(|e| translate_cli::fatal(&e));
    let json = args.iter().any(|a| a == "--json");
    let breakdown = args.iter().any(|a| a == "-b" || a == "--breakdown");
    let positional: Vec<&str> = args
        .iter()
        .filter(|a| !a.starts_with('-'))
        .map(String::as_str)
        .collect();

    let groups: ConfiguredGroups = translate_cli::load_states(config_path.as_deref())
        .unwrap_or_else(|e| translate_cli::fatal(&e));

    let mut rows: Vec<StatsRow> = Vec::new();
    if positional.is_empty() {
        let stdin = io::stdin();
        for (number, line) in stdin.lock().lines().enumerate() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            let row = parse_row(&fields)
                .unwrap_or_else(|e| translate_cli::fatal(&format!("line {}: {e}", number + 1)));
            rows.push(row);
        }
    } else {
        rows.push(parse_row(&positional).unwrap_or_else(|e| translate_cli::fatal(&e)));
    }

    let mut store = InMemoryStateStore::new();
    let states = apply_rows(&groups, &rows, actor.as_deref(), &mut store)
        .unwrap_or_else(|e| translate_cli::fatal(&e.to_string()));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if json {
        match serde_json::to_string_pretty(store.history()) {
            Ok(s) => {
                let _ = writeln!(out, "{s}");
            }
            Err(e) => translate_cli::fatal(&e.to_string()),
        }
        return;
    }

    for (row, state) in rows.iter().zip(&states) {
        let StatsRow { group, language, stats } = row;
        let state = state.as_deref().unwrap_or("-");
        if breakdown {
            let b = stats.breakdown();
            let _ = writeln!(
                out,
                "{group}\t{language}\t{state}\t{:.1}\t{:.1}\t{:.1}\t{:.1}",
                b.proofread, b.translated, b.fuzzy, b.untranslated
            );
        } else {
            let _ = writeln!(out, "{group}\t{language}\t{state}");
        }
    }
}
