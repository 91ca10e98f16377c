// End-to-end tests for the configure flow
use pathlink::commands::{configure_command, list_command, scan_command, set_command};
use pathlink::config::LinkConfig;
use pathlink::error::{LinkError, Result};
use pathlink::mapping::PathMapping;
use pathlink::prompt::{Prompter, collect};
use pathlink::render::count_link_blocks;
use pathlink::scan::Discovery;
use std::collections::VecDeque;
use std::path::Path;

/// Answers from a fixed list, recording every question
#[derive(Default)]
struct ScriptedPrompter {
    answers: VecDeque<String>,
    questions: Vec<String>,
    rejections: usize,
}

impl ScriptedPrompter {
    fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        self.questions.push(question.to_string());
        Ok(self.answers.pop_front())
    }

    fn reject(&mut self, _message: &str) -> Result<()> {
        self.rejections += 1;
        Ok(())
    }
}

fn project(well_known: &[&str]) -> (tempfile::TempDir, LinkConfig) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("scripts")).unwrap();
    let mut config = LinkConfig::new(dir.path());
    config.well_known = well_known.iter().map(|p| p.to_string()).collect();
    config.validate().unwrap();
    (dir, config)
}

fn read_script(path: &Path) -> String {
    let bytes = std::fs::read(path).unwrap();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn test_first_run_scenario() {
    let (_dir, config) = project(&["outputs/cultivos", "outputs/muestreos"]);
    let mut prompter = ScriptedPrompter::new(&["/data/cultivos", "/data/muestreos"]);

    let mapping = configure_command(&config, &mut prompter).unwrap();

    let expected: PathMapping = [
        ("outputs/cultivos", "/data/cultivos"),
        ("outputs/muestreos", "/data/muestreos"),
    ]
    .into_iter()
    .collect();
    assert_eq!(mapping, expected);
    assert_eq!(PathMapping::load(&config.mapping_file).unwrap(), expected);

    let script = read_script(&config.script_file);
    assert_eq!(count_link_blocks(&script), 2);
    assert!(script.contains("'outputs\\cultivos'"));
    assert!(script.contains("'/data/cultivos'"));
    assert!(script.contains("'outputs\\muestreos'"));
    assert!(script.contains("'/data/muestreos'"));
}

#[test]
fn test_second_run_prompts_for_nothing() {
    let (_dir, config) = project(&["outputs/cultivos"]);
    let mut first = ScriptedPrompter::new(&["/data/cultivos"]);
    configure_command(&config, &mut first).unwrap();
    let saved = std::fs::read_to_string(&config.mapping_file).unwrap();

    let mut second = ScriptedPrompter::new(&[]);
    let mapping = configure_command(&config, &mut second).unwrap();

    assert!(second.questions.is_empty());
    assert_eq!(mapping.get("outputs/cultivos"), Some("/data/cultivos"));
    assert_eq!(std::fs::read_to_string(&config.mapping_file).unwrap(), saved);
}

#[test]
fn test_rescan_appends_new_paths_only() {
    let (dir, config) = project(&["outputs/cultivos"]);
    configure_command(&config, &mut ScriptedPrompter::new(&["C:\\Sync\\cultivos"])).unwrap();

    std::fs::write(
        dir.path().join("scripts/kmz.py"),
        "OUT = 'outputs\\\\kmz'\n",
    )
    .unwrap();

    let mut prompter = ScriptedPrompter::new(&["C:\\Sync\\kmz"]);
    let mapping = configure_command(&config, &mut prompter).unwrap();

    assert_eq!(prompter.questions.len(), 1);
    assert!(prompter.questions[0].contains("outputs/kmz"));
    let entries: Vec<_> = mapping.iter().collect();
    assert_eq!(
        entries,
        vec![
            ("outputs/cultivos", "C:\\Sync\\cultivos"),
            ("outputs/kmz", "C:\\Sync\\kmz")
        ]
    );
}

#[test]
fn test_collect_is_idempotent_for_mapped_paths() {
    let existing: PathMapping = [("outputs/a", "/a"), ("outputs/b", "/b")].into_iter().collect();
    let mut discovered = Discovery::new();
    discovered.insert("outputs/b", None);
    discovered.insert("outputs\\a\\", None);

    let mut prompter = ScriptedPrompter::new(&[]);
    let merged = collect(existing.clone(), &discovered, &mut prompter).unwrap();

    assert_eq!(merged, existing);
    assert!(prompter.questions.is_empty());
}

#[test]
fn test_blank_target_is_reprompted() {
    let (_dir, config) = project(&["outputs/cultivos"]);
    let mut prompter = ScriptedPrompter::new(&["", "  ", "\"D:\\OneDrive\\cultivos\""]);

    let mapping = configure_command(&config, &mut prompter).unwrap();

    assert_eq!(prompter.questions.len(), 3);
    assert_eq!(prompter.rejections, 2);
    assert_eq!(mapping.get("outputs/cultivos"), Some("D:\\OneDrive\\cultivos"));
}

#[test]
fn test_interrupted_run_keeps_previous_mapping() {
    let (_dir, config) = project(&["outputs/cultivos"]);
    configure_command(&config, &mut ScriptedPrompter::new(&["/data/cultivos"])).unwrap();
    let saved = std::fs::read_to_string(&config.mapping_file).unwrap();

    let mut config = config;
    config.well_known.push("outputs/muestreos".to_string());
    config.well_known.push("outputs/kmz".to_string());

    // Input closes after the first new path
    let result = configure_command(&config, &mut ScriptedPrompter::new(&["/data/muestreos"]));

    assert!(matches!(result, Err(LinkError::PromptAborted(p)) if p == "outputs/kmz"));
    assert_eq!(std::fs::read_to_string(&config.mapping_file).unwrap(), saved);
}

#[test]
fn test_set_updates_in_place() {
    let (_dir, config) = project(&[]);
    set_command(&config, "outputs/a", "/a").unwrap();
    set_command(&config, "outputs\\b\\", "/b").unwrap();
    let mapping = set_command(&config, "./outputs/a", "/a2").unwrap();

    let entries: Vec<_> = mapping.iter().collect();
    assert_eq!(entries, vec![("outputs/a", "/a2"), ("outputs/b", "/b")]);
    assert_eq!(count_link_blocks(&read_script(&config.script_file)), 2);
}

#[test]
fn test_set_rejects_invalid_input() {
    let (_dir, config) = project(&[]);
    assert!(matches!(
        set_command(&config, "outputs/a", "relative"),
        Err(LinkError::InvalidTarget { .. })
    ));
    assert!(matches!(
        set_command(&config, "../outside", "/x"),
        Err(LinkError::InvalidLogical(_))
    ));
    assert!(!config.mapping_file.exists());
}

#[test]
fn test_case_variants_share_one_mapping() {
    let (dir, config) = project(&["outputs/kmz"]);
    std::fs::write(dir.path().join("scripts/k.py"), "K = \"outputs/KMZ\"\n").unwrap();
    set_command(&config, "outputs/Kmz", "/data/kmz").unwrap();

    let mut prompter = ScriptedPrompter::new(&[]);
    let mapping = configure_command(&config, &mut prompter).unwrap();
    assert!(prompter.questions.is_empty());
    assert_eq!(mapping.len(), 1);

    let mapping = set_command(&config, "OUTPUTS/kmz", "/data/kmz2").unwrap();
    let entries: Vec<_> = mapping.iter().collect();
    assert_eq!(entries, vec![("outputs/Kmz", "/data/kmz2")]);

    let mut out = Vec::new();
    scan_command(&config, &mut out).unwrap();
    let scanned = String::from_utf8(out).unwrap();
    assert!(scanned.contains("outputs/kmz -> /data/kmz2"));
    assert!(!scanned.contains("unmapped"));
}

#[test]
fn test_scan_and_list_output() {
    let (dir, config) = project(&["outputs/cultivos"]);
    std::fs::write(dir.path().join("scripts/m.py"), "M = \"outputs/muestreos\"\n").unwrap();
    set_command(&config, "outputs/cultivos", "/data/cultivos").unwrap();

    let mut out = Vec::new();
    scan_command(&config, &mut out).unwrap();
    let scanned = String::from_utf8(out).unwrap();
    assert!(scanned.contains("outputs/cultivos -> /data/cultivos"));
    assert!(scanned.contains("outputs/muestreos (unmapped)"));
    assert!(scanned.contains("found in scripts"));

    let mut out = Vec::new();
    list_command(&config, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "outputs/cultivos -> /data/cultivos\n");
}
