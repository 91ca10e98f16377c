use crate::config::LinkConfig;
use crate::error::Result;
use crate::mapping::PathMapping;
use crate::prompt::{Prompter, collect};
use crate::render::{count_link_blocks, render, write_script};
use crate::scan::discover;
use crate::util::{validate_logical, validate_target};
use notify::{EventKind, RecursiveMode};
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Discover, collect missing targets, persist and render
///
/// Nothing is written until every prompt is answered, so an interrupted run
/// leaves the previous mapping file untouched.
pub fn configure_command<P: Prompter>(
    config: &LinkConfig,
    prompter: &mut P,
) -> Result<PathMapping> {
    debug!("Starting configure command");
    debug!("Config: {:?}", config);

    let discovery = discover(config)?;
    let existing = PathMapping::load(&config.mapping_file)?;
    let mapping = collect(existing.clone(), &discovery, prompter)?;

    if mapping != existing || !config.mapping_file.exists() {
        mapping.persist(&config.mapping_file)?;
    } else {
        info!("Mapping unchanged");
    }

    render_once(config, &mapping)?;
    Ok(mapping)
}

/// Print discovered paths and whether each is mapped
pub fn scan_command<W: Write>(config: &LinkConfig, out: &mut W) -> Result<()> {
    let discovery = discover(config)?;
    let mapping = PathMapping::load(&config.mapping_file)?;

    for logical in discovery.paths() {
        match mapping.find_ignore_case(logical).and_then(|key| mapping.get(key)) {
            Some(target) => writeln!(out, "{logical} -> {target}")?,
            None => writeln!(out, "{logical} (unmapped)")?,
        }
        for source in discovery.sources(logical) {
            let shown = source.strip_prefix(&config.project_dir).unwrap_or(source.as_path());
            writeln!(out, "    found in {}", shown.display())?;
        }
    }
    Ok(())
}

/// Print the saved mapping in order
pub fn list_command<W: Write>(config: &LinkConfig, out: &mut W) -> Result<()> {
    let mapping = PathMapping::load(&config.mapping_file)?;
    if mapping.is_empty() {
        writeln!(out, "No mappings in {}", config.mapping_file.display())?;
        return Ok(());
    }
    for (logical, target) in mapping.iter() {
        writeln!(out, "{logical} -> {target}")?;
    }
    Ok(())
}

/// Add or update one entry, then persist and render
pub fn set_command(config: &LinkConfig, logical: &str, target: &str) -> Result<PathMapping> {
    let logical = validate_logical(logical)?;
    let target = validate_target(&logical, target)?;

    let mut mapping = PathMapping::load(&config.mapping_file)?;
    let logical = match mapping.find_ignore_case(&logical) {
        Some(existing) => existing.to_string(),
        None => logical,
    };
    match mapping.insert(logical.clone(), target.clone()) {
        Some(previous) if previous != target => {
            info!("Updated {}: {} -> {}", logical, previous, target)
        }
        Some(_) => info!("{} already maps to {}", logical, target),
        None => info!("Added {} -> {}", logical, target),
    }

    mapping.persist(&config.mapping_file)?;
    render_once(config, &mapping)?;
    Ok(mapping)
}

/// Regenerate the script, optionally following mapping edits
pub fn render_command(config: &LinkConfig, watch: bool) -> Result<()> {
    let mapping = PathMapping::load(&config.mapping_file)?;
    render_once(config, &mapping)?;

    if watch {
        info!("Entering watch mode...");
        watch_and_render(config)?;
    }
    Ok(())
}

fn render_once(config: &LinkConfig, mapping: &PathMapping) -> Result<()> {
    let script = render(mapping, config.target_project_root.as_deref());
    write_script(&script, &config.script_file)?;

    if count_link_blocks(&script) > 0 {
        warn!(
            "Running {} deletes any existing directory at each source path before linking it",
            config.script_file.display()
        );
    }
    Ok(())
}

/// Watch the mapping file and re-render on change
fn watch_and_render(config: &LinkConfig) -> Result<()> {
    use notify::{Config, RecommendedWatcher, Watcher};
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    let (tx, rx) = mpsc::channel();

    let mut watcher = RecommendedWatcher::new(
        move |res| {
            if let Err(e) = tx.send(res) {
                error!("Failed to send watch event: {}", e);
            }
        },
        Config::default(),
    )?;

    let watched_dir = match config.mapping_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    watcher.watch(&watched_dir, RecursiveMode::NonRecursive)?;
    debug!("Watching {:?} for changes to {:?}", watched_dir, config.mapping_file);

    let mut pending = false;
    let mut last_event_time = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(Ok(event)) => match event.kind {
                EventKind::Create(_) | EventKind::Modify(_) => {
                    if event
                        .paths
                        .iter()
                        .any(|path| is_same_file_name(path, &config.mapping_file))
                    {
                        pending = true;
                        last_event_time = Instant::now();
                    }
                }
                _ => {}
            },
            Ok(Err(e)) => {
                warn!("Watch error: {}", e);
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if pending && last_event_time.elapsed() >= Duration::from_millis(200) {
                    pending = false;
                    info!("Mapping changed, re-rendering");

                    match PathMapping::load(&config.mapping_file)
                        .and_then(|mapping| render_once(config, &mapping))
                    {
                        Ok(()) => debug!("Re-render completed successfully"),
                        Err(e) => error!("Re-render failed: {}", e),
                    }
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                error!("Watch channel disconnected");
                break;
            }
        }
    }

    Ok(())
}

fn is_same_file_name(event_path: &Path, mapping_file: &Path) -> bool {
    event_path.file_name().is_some() && event_path.file_name() == mapping_file.file_name()
}
