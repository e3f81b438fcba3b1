// ttm-suggest: Suggest translations from a translation memory file.
//
// Loads a tab-separated memory (context, source, target per line), then
// prints the best matching translations for each text from the arguments
// or from stdin (one per line).
//
// Usage:
//   ttm-suggest -m MEMORY [OPTIONS] [TEXT...]
//
// Options:
//   -m, --memory FILE       Tab-separated translation memory
//   -s, --services FILE     Services configuration (JSON)
//       --service NAME      Service to use (default: configured default);
//                           a frozen service still loads MEMORY
//       --from LANG         Source language (default: en)
//       --to LANG           Target language (default: fi)
//   -t, --threshold Q       Minimum quality (default: 0.75)
//   -n, --limit N           Maximum number of suggestions (default: 5)
//       --json              Print suggestions as JSON
//   -h, --help              Print help

use std::io::{self, BufRead, Write};
use std::path::Path;

use translate_ttm::{MemoryTtmServer, QueryOptions, TtmServer};

fn option(args: Vec<String>, short: &str, long: &str) -> (Option<String>, Vec<String>) {
    translate_cli::take_option(&args, short, long).unwrap_or_else(|e| translate_cli::fatal(&e))
}

fn main() {
    translate_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if translate_cli::wants_help(&args) {
        println!("ttm-suggest: Suggest translations from a translation memory.");
        println!();
        println!("Usage: ttm-suggest -m MEMORY [OPTIONS] [TEXT...]");
        println!();
        println!("MEMORY has one translation per line: CONTEXT<TAB>SOURCE<TAB>TARGET.");
        println!("If TEXT arguments are given, suggests for each text.");
        println!("Otherwise reads texts from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -m, --memory FILE     Tab-separated translation memory");
        println!("  -s, --services FILE   Services configuration (JSON)");
        println!("      --service NAME    Service to use (default: configured default)");
        println!("      --from LANG       Source language (default: en)");
        println!("      --to LANG         Target language (default: fi)");
        println!("  -t, --threshold Q     Minimum quality (default: 0.75)");
        println!("  -n, --limit N         Maximum number of suggestions (default: 5)");
        println!("      --json            Print suggestions as JSON");
        println!("  -h, --help            Print this help");
        println!();
        println!("With --services, threshold and limit come from the service configuration.");
        return;
    }

    let (memory, args) = option(args, "-m", "--memory");
    let (services, args) = option(args, "-s", "--services");
    let (service, args) = option(args, "", "--service");
    let (from, args) = option(args, "", "--from");
    let (to, args) = option(args, "", "--to");
    let (threshold, args) = option(args, "-t", "--threshold");
    let (limit, args) = option(args, "-n", "--limit");
    let json = args.iter().any(|a| a == "--json");
    let texts: Vec<&String> = args.iter().filter(|a| !a.starts_with('-')).collect();

    let from = from.unwrap_or_else(|| "en".to_string());
    let to = to.unwrap_or_else(|| "fi".to_string());
    let memory = memory.unwrap_or_else(|| translate_cli::fatal("--memory is required"));

    let mut server: Box<dyn TtmServer> = match services {
        Some(path) => {
            let config = translate_cli::read_file(Path::new(&path))
                .unwrap_or_else(|e| translate_cli::fatal(&e));
            translate_cli::open_service(&config, service.as_deref())
                .unwrap_or_else(|e| translate_cli::fatal(&e.to_string()))
        }
        None => {
            let mut options = QueryOptions::default();
            if let Some(t) = threshold {
                options.threshold = t
                    .parse()
                    .unwrap_or_else(|_| translate_cli::fatal("invalid number for --threshold"));
            }
            if let Some(n) = limit {
                options.limit = n
                    .parse()
                    .unwrap_or_else(|_| translate_cli::fatal("invalid number for --limit"));
            }
            Box::new(MemoryTtmServer::new("cli").with_options(options))
        }
    };

    let contents =
        translate_cli::read_file(Path::new(&memory)).unwrap_or_else(|e| translate_cli::fatal(&e));
    if let Err(e) = translate_cli::load_memory(server.as_mut(), &contents, &from, &to) {
        translate_cli::fatal(&format!("{memory}: {e}"));
    }

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let mut suggest = |text: &str| {
        let suggestions = server
            .query(&from, &to, text)
            .unwrap_or_else(|e| translate_cli::fatal(&e.to_string()));
        if json {
            match serde_json::to_string(&suggestions) {
                Ok(s) => {
                    let _ = writeln!(out, "{s}");
                }
                Err(e) => translate_cli::fatal(&e.to_string()),
            }
        } else if suggestions.is_empty() {
            let _ = writeln!(out, "{text}: (no suggestions)");
        } else {
            let _ = writeln!(out, "{text}:");
            for s in &suggestions {
                let source = &s.metadata().source;
                let _ = writeln!(out, "  {:.3}  {}  ({source})", s.quality(), s.text());
            }
        }
    };

    if texts.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            suggest(text);
        }
    } else {
        for text in &texts {
            suggest(text.as_str());
        }
    }
}
