// translate-cli: shared utilities for CLI tools.

use std::path::{Path, PathBuf};
use std::process;

use tracing_subscriber::EnvFilter;
use translate_core::StatSnapshot;
use translate_states::{
    ConfiguredGroups, GroupRegistry, InMemoryStateStore, MessageHandle, StateStore, StatesUpdater,
    StatsTable, UpdateError,
};
use translate_ttm::{ServicesConfig, TtmEntry, TtmError, TtmServer, TtmServerFactory};

/// Group state configuration file name.
const STATES_JSON: &str = "states.json";

/// Environment variable naming the group state configuration file.
pub const CONFIG_ENV: &str = "TRANSLATE_STATES_CONFIG";

/// Install a stderr log subscriber filtered by `RUST_LOG` (default `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when running under a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Search for the group state configuration and load it.
///
/// Search order:
/// 1. `config_path` argument (if provided)
/// 2. `TRANSLATE_STATES_CONFIG` environment variable
/// 3. `~/.config/translate/states.json`
/// 4. `states.json` in the current working directory
pub fn load_states(config_path: Option<&str>) -> Result<ConfiguredGroups, String> {
    let search_paths = build_search_paths(config_path);

    for path in &search_paths {
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading group state configuration");
            return ConfiguredGroups::from_path(path).map_err(|e| e.to_string());
        }
    }

    Err(format!(
        "could not find a group state configuration in any of the search paths:\n{}",
        search_paths
            .iter()
            .map(|p| format!("  - {}", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    ))
}

/// Build the list of files to try for the group state configuration.
fn build_search_paths(config_path: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(p) = config_path {
        paths.push(PathBuf::from(p));
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        paths.push(PathBuf::from(env_path));
    }

    if let Some(home) = home_dir() {
        paths.push(home.join(".config").join("translate").join(STATES_JSON));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(STATES_JSON));
    }

    paths
}

/// Get the user's home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Read a whole file, with the path in the error message.
pub fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))
}

/// Extract a `--long=VALUE`, `--long VALUE` or `-s VALUE` option.
///
/// Returns `(value, remaining_args)`. The last occurrence wins. An empty
/// `short` means the option has no short form.
pub fn take_option(
    args: &[String],
    short: &str,
    long: &str,
) -> Result<(Option<String>, Vec<String>), String> {
    let mut value = None;
    let mut remaining = Vec::new();
    let prefix = format!("{long}=");
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix(&prefix) {
            value = Some(val.to_string());
        } else if arg == long || (!short.is_empty() && arg == short) {
            match iter.next() {
                Some(val) => value = Some(val.clone()),
                None => return Err(format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    Ok((value, remaining))
}

/// Parse a `--config=PATH` or `-c PATH` argument from command line args.
pub fn parse_config_path(args: &[String]) -> (Option<String>, Vec<String>) {
    take_option(args, "-c", "--config").unwrap_or_else(|e| fatal(&e))
}

/// Build the service `name` (or the default one) from a services
/// configuration, for loading a memory file and querying it.
///
/// A frozen service is built unfrozen: the memory file is its only write.
pub fn open_service(
    services_json: &str,
    name: Option<&str>,
) -> Result<Box<dyn TtmServer>, TtmError> {
    let mut config = ServicesConfig::from_json(services_json)?;
    let name = match name {
        Some(name) => name.to_string(),
        None => config.default.clone().ok_or(TtmError::NoDefault)?,
    };
    if let Some(service) = config.services.get_mut(&name) {
        if service.frozen {
            tracing::info!(service = %name, "loading memory into frozen service");
            service.frozen = false;
        }
    }
    let factory = TtmServerFactory::new(config);
    factory.create(&name)?.ok_or_else(|| TtmError::UnsupportedType {
        kind: factory
            .config()
            .services
            .get(&name)
            .and_then(|c| c.kind.clone())
            .unwrap_or_default(),
        name,
    })
}

/// Store every `CONTEXT<TAB>SOURCE<TAB>TARGET` line of `contents` as a
/// `from` to `to` translation. Returns the number of stored lines.
pub fn load_memory(
    server: &mut dyn TtmServer,
    contents: &str,
    from: &str,
    to: &str,
) -> Result<usize, String> {
    let name = server.name().to_string();
    let Some(writer) = server.writer() else {
        return Err(format!("service {name} is not writable"));
    };
    let mut stored = 0;
    for (number, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.splitn(3, '\t');
        let (Some(context), Some(source), Some(target)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(format!("line {}: expected three tab-separated fields", number + 1));
        };
        writer
            .update(TtmEntry {
                context: context.to_string(),
                source_language: from.to_string(),
                source: source.to_string(),
                target_language: to.to_string(),
                target: target.to_string(),
            })
            .map_err(|e| format!("line {}: {e}", number + 1))?;
        stored += 1;
    }
    Ok(stored)
}

/// One input row of `group-state`: statistics of a (group, language) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRow {
    pub group: String,
    pub language: String,
    pub stats: StatSnapshot,
}

fn count(name: &str, value: &str) -> Result<u64, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("invalid {name} count: {value}"))
}

/// Parse `GROUP LANG TOTAL TRANSLATED FUZZY PROOFREAD`.
pub fn parse_row(fields: &[&str]) -> Result<StatsRow, String> {
    let [group, language, total, translated, fuzzy, proofread] = fields else {
        return Err(format!("expected 6 fields, got {}", fields.len()));
    };
    let stats = StatSnapshot::new(
        count("total", total)?,
        count("translated", translated)?,
        count("fuzzy", fuzzy)?,
        count("proofread", proofread)?,
    )
    .map_err(|e| e.to_string())?;
    Ok(StatsRow {
        group: group.to_string(),
        language: language.to_string(),
        stats,
    })
}

/// Apply rows in input order, each one as a fresh statistics update.
///
/// Returns the state of each row's pair right after that row was applied
/// (`None` when no state has been set), in input order.
pub fn apply_rows(
    groups: &ConfiguredGroups,
    rows: &[StatsRow],
    actor: Option<&str>,
    store: &mut InMemoryStateStore,
) -> Result<Vec<Option<String>>, UpdateError> {
    let mut table = StatsTable::new();
    let mut states = Vec::with_capacity(rows.len());
    for row in rows {
        if groups.transitions(&row.group).is_none() {
            tracing::warn!(group = %row.group, "group has no state configuration");
        }
        table.set(row.group.as_str(), row.language.as_str(), row.stats);

        let mut updater = StatesUpdater::new(groups, &table);
        if let Some(actor) = actor {
            updater = updater.with_actor(actor);
        }
        let key = format!("{}/{}", row.group, row.language);
        let handle = MessageHandle::new(key, row.language.as_str(), [row.group.as_str()]);
        updater.run(&handle, store)?;
        states.push(store.current_state(&row.group, &row.language));
    }
    Ok(states)
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
