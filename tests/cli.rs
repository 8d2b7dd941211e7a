//! The `relgraph` binary, run as a subprocess

use std::process::{Command, Output};

use relgraph::hash_color::Palette;

fn relgraph(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_relgraph"))
        .args(args)
        .output()
        .expect("failed to run relgraph")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "relgraph failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn color_is_stable_across_processes() {
    let first = stdout(&relgraph(&["color", "Player"]));
    let second = stdout(&relgraph(&["color", "Player"]));
    assert_eq!(first, second);

    let expected = Palette::Light.color_for_key("Player").to_hex();
    let prefix = format!("Player\t{expected}\t");
    assert!(first.starts_with(&prefix), "{first}");
}

#[test]
fn dark_palette_differs_from_light() {
    let light = stdout(&relgraph(&["color", "Player"]));
    let dark = stdout(&relgraph(&["color", "Player", "--dark"]));
    assert_ne!(light, dark);
}

#[test]
fn render_prints_layers() {
    let out = stdout(&relgraph(&["render", "--label", "Goblin", "--unexplored"]));
    let layers: Vec<&str> = out
        .lines()
        .map(|l| l.split_whitespace().next().unwrap_or(""))
        .collect();
    assert_eq!(layers, ["aura", "outline", "fill", "label"]);
    assert!(out.contains("\"Goblin\""));
}

#[test]
fn render_json_is_tagged_by_layer() {
    let out = stdout(&relgraph(&[
        "render", "--label", "Keep", "--shape", "circle", "--target", "--json",
    ]));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let layers: Vec<&str> = value["primitives"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["layer"].as_str().unwrap())
        .collect();
    // not unexplored, so no aura; circles never get a shadow
    assert_eq!(layers, ["outline", "fill"]);
}

#[test]
fn render_reads_settings_and_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("look.yaml");
    std::fs::write(&config, "widget_type: circle\n").unwrap();
    let svg = dir.path().join("out.svg");

    let out = stdout(&relgraph(&[
        "render",
        "--label",
        "Orb",
        "--config",
        config.to_str().unwrap(),
        "--svg",
        svg.to_str().unwrap(),
    ]));
    assert!(out.contains("disc("));

    let written = std::fs::read_to_string(&svg).unwrap();
    assert!(written.contains("<circle class=\"outline\""));
}

#[test]
fn missing_settings_file_fails() {
    let config = "/nonexistent/look.yaml";
    let output = relgraph(&["render", "--label", "x", "--config", config]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load settings"));
}

#[test]
fn legend_lists_entries() {
    let out = stdout(&relgraph(&["legend", "--title", "Relations", "owns", "likes"]));
    assert_eq!(out.lines().count(), 2 + 2 * 3);
    assert!(out.contains("\"owns\""));
    assert!(out.contains(&Palette::Light.color_for_key("likes").to_hex()));
}
