//! CLI Smoke Tests
//!
//! Integration tests for the carta CLI commands:
//! - `render`: Composite a message onto a background
//! - `layout`: Print the planned layout as JSON
//!
//! Tests cover both success cases and failure cases (bad input, missing fonts).

use std::path::PathBuf;
use std::process::{Command, Output};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{Rgba, RgbaImage};

fn carta() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_carta"));
    cmd.env_remove("CARTA_FONT")
        .env_remove("CARTA_MODE")
        .env_remove("CARTA_FONT_CACHE");
    cmd
}

/// Create a temporary file path
fn temp_output(ext: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("carta_test_{}_{}.{}", std::process::id(), id, ext));
    path
}

fn write_background(width: u32, height: u32) -> PathBuf {
    let path = temp_output("png");
    RgbaImage::from_pixel(width, height, Rgba([40, 90, 160, 255]))
        .save(&path)
        .unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// Layout Command Tests
// ============================================================================

#[test]
fn test_layout_prints_json() {
    let output = carta()
        .args(["layout", "-W", "800", "-H", "600", "Line one\n\nLine two"])
        .output()
        .expect("Failed to execute carta layout");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");

    assert_eq!(json["mode"], "simple");
    assert_eq!(json["plan"]["image_width"], 800);
    let lines = json["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1]["text"], "");
}

#[test]
fn test_layout_mode_flag() {
    let output = carta()
        .args(["layout", "-W", "400", "-H", "300", "--mode", "enhanced", "Hi"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["mode"], "enhanced");
    assert_eq!(json["lines"][0]["x"], 200.0);
}

#[test]
fn test_layout_zero_width_fails() {
    let output = carta()
        .args(["layout", "-W", "0", "-H", "600", "Hello"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid image dimensions"));
}

#[test]
fn test_layout_message_file() {
    let message = temp_output("txt");
    std::fs::write(&message, "Season's greetings").unwrap();

    let output = carta()
        .args(["layout", "-W", "640", "-H", "480", "--message-file"])
        .arg(&message)
        .output()
        .unwrap();
    let _ = std::fs::remove_file(&message);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["lines"][0]["text"], "Season's greetings");
}

// ============================================================================
// Render Command Tests
// ============================================================================

#[test]
fn test_render_help() {
    let output = carta().args(["render", "--help"]).output().unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).contains("Background image"));
}

#[test]
fn test_render_writes_png() {
    let background = write_background(320, 240);
    let out_path = temp_output("png");

    let output = carta()
        .arg("render")
        .arg(&background)
        .arg("Merry Christmas")
        .arg("-o")
        .arg(&out_path)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let card = image::open(&out_path).expect("output should be a PNG").to_rgba8();
    assert_eq!(card.dimensions(), (320, 240));
    assert_eq!(card.get_pixel(0, 0).0, [40, 90, 160, 255]);
    assert_ne!(card.get_pixel(0, 239).0, [40, 90, 160, 255]);

    let _ = std::fs::remove_file(&background);
    let _ = std::fs::remove_file(&out_path);
}

#[test]
fn test_render_logs_config_and_output() {
    let background = write_background(160, 120);
    let out_path = temp_output("png");

    // --quiet drops the plain summary; RUST_LOG still enables the log records
    let output = carta()
        .env("RUST_LOG", "debug")
        .arg("render")
        .arg(&background)
        .arg("Hello")
        .arg("--quiet")
        .arg("-o")
        .arg(&out_path)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let log = stderr(&output);
    assert!(log.contains("Resolved card config"), "stderr: {log}");
    assert!(log.contains(&format!("Wrote {} (", out_path.display())), "stderr: {log}");

    let _ = std::fs::remove_file(&background);
    let _ = std::fs::remove_file(&out_path);
}

#[test]
fn test_render_bad_font_still_succeeds() {
    let background = write_background(200, 150);
    let out_path = temp_output("png");

    let output = carta()
        .arg("render")
        .arg(&background)
        .arg("Hello")
        .args(["--font", "/invalid/path.ttf", "-o"])
        .arg(&out_path)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("fallback"));
    assert!(out_path.exists());

    let _ = std::fs::remove_file(&background);
    let _ = std::fs::remove_file(&out_path);
}

#[test]
fn test_render_data_url_roundtrip() {
    let background = write_background(64, 48);
    let bytes = std::fs::read(&background).unwrap();
    let _ = std::fs::remove_file(&background);
    let url = format!("data:image/png;base64,{}", STANDARD.encode(bytes));

    let output = carta()
        .args(["render", &url, "Hi", "--data-url", "--quiet"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let printed = stdout(&output);
    assert!(printed.trim().starts_with("data:image/png;base64,"));
}

#[test]
fn test_render_missing_background_fails() {
    let output = carta()
        .args(["render", "/no/such/background.png", "Hello"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("background"));
}

#[test]
fn test_render_malformed_data_url_fails() {
    let output = carta()
        .args(["render", "data:image/png;base64", "Hello"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("data URL"));
}
