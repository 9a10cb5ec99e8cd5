//! Script Interpreter Integration Tests
//!
//! End-to-end runs of command scripts against a catalog.

use std::path::Path;

use mediacat::media::{ProbeError, StreamInfo, VideoProbe};
use mediacat::{Catalog, Inspector, Interpreter, MediaKind};
use tempfile::TempDir;

/// Probe that sees a 640x360 picture stream in every file
struct PictureProbe;

impl VideoProbe for PictureProbe {
    fn name(&self) -> &str {
        "picture"
    }

    fn probe(&self, _path: &Path) -> Result<StreamInfo, ProbeError> {
        Ok(StreamInfo {
            width: Some(640),
            height: Some(360),
            fps: Some(25.0),
            ..Default::default()
        })
    }
}

fn run(script: &str) -> (Catalog, String) {
    let catalog = Catalog::new(Inspector::with_probe(PictureProbe));
    let mut interpreter = Interpreter::new(catalog, Vec::new());
    interpreter.run_script(script).unwrap();
    let (catalog, out) = interpreter.into_parts();
    (catalog, String::from_utf8(out).unwrap())
}

fn media_dir() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("a.mp3"), b"audio bytes").unwrap();
    std::fs::write(temp.path().join("b.mp4"), b"video bytes").unwrap();
    temp
}

#[test]
fn test_add_print_remove_print() {
    let temp = media_dir();
    let a = temp.path().join("a.mp3");
    let b = temp.path().join("b.mp4");
    let script = format!(
        "ADD {}\nADD {}\nPRINT\nREM type == audio\nPRINT\n",
        a.display(),
        b.display()
    );

    let (catalog, out) = run(&script);

    assert!(out.contains("added: a.mp3"));
    assert!(out.contains("added: b.mp4"));

    let (before, after) = out.split_once("removed: 1").unwrap();
    assert!(before.contains("Container contents (files: 2)"));
    assert!(before.contains("1. Audio: a.mp3"));
    assert!(before.contains("2. Video: b.mp4 | Resolution: 640x360 | Frame rate: 25.00 fps"));
    assert!(after.contains("Container contents (files: 1)"));
    assert!(after.contains("1. Video: b.mp4"));
    assert!(!after.contains("a.mp3"));

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.entries()[0].kind(), MediaKind::Video);
}

#[test]
fn test_comments_prose_and_case() {
    let temp = media_dir();
    let script = format!(
        "# catalog session\n\nThis line is prose and is ignored\nadd {}\nPrint\n",
        temp.path().join("a.mp3").display()
    );

    let (catalog, out) = run(&script);
    assert_eq!(catalog.len(), 1);
    assert!(out.starts_with("added: a.mp3\n"));
    assert!(out.contains("1. Audio: a.mp3"));
    assert!(!out.contains("error"));
}

#[test]
fn test_missing_arguments_warn_and_continue() {
    let temp = media_dir();
    let script = format!(
        "ADD\nREM\nADD {}\nPRINT\n",
        temp.path().join("a.mp3").display()
    );

    let (catalog, out) = run(&script);
    assert!(out.contains("line 1: ADD requires an argument"));
    assert!(out.contains("line 2: REM requires an argument"));
    assert!(out.contains("added: a.mp3"));
    assert_eq!(catalog.len(), 1);
}

#[test]
fn test_recoverable_errors_do_not_stop_the_script() {
    let temp = media_dir();
    let notes = temp.path().join("notes.txt");
    std::fs::write(&notes, b"plain text").unwrap();

    let script = format!(
        "ADD {}\nADD {}\nREM nonsense\nADD {}\nPRINT\n",
        notes.display(),
        temp.path().join("missing.wav").display(),
        temp.path().join("b.mp4").display()
    );

    let (catalog, out) = run(&script);
    assert!(out.contains("error: unsupported file format"));
    assert!(out.contains("error: file not found"));
    assert!(out.contains("error: condition not recognized: nonsense\nremoved: 0"));
    assert!(out.contains("added: b.mp4"));
    assert_eq!(catalog.len(), 1);
}

#[test]
fn test_print_on_empty_catalog() {
    let (_, out) = run("PRINT\n");
    assert_eq!(out, "container is empty\n");
}

#[test]
fn test_run_file_reads_script_from_disk() {
    let temp = media_dir();
    let script_path = temp.path().join("commands.txt");
    std::fs::write(
        &script_path,
        format!("ADD {}\nPRINT\n", temp.path().join("b.mp4").display()),
    )
    .unwrap();

    let catalog = Catalog::new(Inspector::with_probe(PictureProbe));
    let mut interpreter = Interpreter::new(catalog, Vec::new());
    interpreter.run_file(&script_path).unwrap();
    assert_eq!(interpreter.catalog().len(), 1);

    assert!(interpreter
        .run_file(&temp.path().join("absent.txt"))
        .is_err());
}
