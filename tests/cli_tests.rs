//! 命令行：退出码、错误输出格式、相对路径与默认目录

use std::{
    fs,
    path::Path,
    process::{Command, Output},
};

use tempfile::TempDir;

const HOME: &str = r#"<svg width="24" height="24" viewBox="0 0 24 24"><path d="M10 20v-6h4v6h5v-8h3L12 3 2 12h3v8z"/></svg>"#;

fn icongen(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_icongen"))
        .args(args)
        .current_dir(cwd)
        .env("ICONGEN_LOG", "off")
        .output()
        .unwrap()
}

fn stderr_lines(out: &Output) -> Vec<String> {
    String::from_utf8_lossy(&out.stderr)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("icons")).unwrap();
    fs::create_dir_all(tmp.path().join("out")).unwrap();
    tmp
}

#[test]
fn relative_arguments_generate_both_files() {
    let tmp = workspace();
    fs::write(tmp.path().join("icons").join("home.svg"), HOME).unwrap();

    let out = icongen(tmp.path(), &["icons", "out"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("✅"));
    assert!(stderr_lines(&out).is_empty());

    let module = fs::read_to_string(tmp.path().join("out").join("icons.ts")).unwrap();
    assert!(module.contains("export const Home ="));
    assert!(tmp.path().join("out").join("icons.test.tsx").is_file());
}

#[test]
fn arguments_default_to_working_directory() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("home.svg"), HOME).unwrap();

    let out = icongen(tmp.path(), &[]);
    assert_eq!(out.status.code(), Some(0));
    let module = fs::read_to_string(tmp.path().join("icons.ts")).unwrap();
    assert!(module.contains("export const Home ="));
    assert!(tmp.path().join("icons.test.tsx").is_file());
}

#[test]
fn missing_source_prints_one_line() {
    let tmp = workspace();
    let out = icongen(tmp.path(), &["missing", "out"]);

    assert_eq!(out.status.code(), Some(1));
    let lines = stderr_lines(&out);
    assert_eq!(lines.len(), 1, "{lines:?}");
    assert!(lines[0].starts_with("❌ 源目录不存在: "));
    assert!(lines[0].ends_with("missing"));
}

#[test]
fn missing_destination_prints_one_line() {
    let tmp = workspace();
    fs::write(tmp.path().join("icons").join("home.svg"), HOME).unwrap();
    let out = icongen(tmp.path(), &["icons", "nowhere"]);

    assert_eq!(out.status.code(), Some(1));
    let lines = stderr_lines(&out);
    assert_eq!(lines.len(), 1, "{lines:?}");
    assert!(lines[0].starts_with("❌ 目标目录不存在: "));
    assert!(lines[0].ends_with("nowhere"));
    assert!(!tmp.path().join("out").join("icons.ts").exists());
}

#[test]
fn malformed_icon_prints_error_chain() {
    let tmp = workspace();
    fs::write(tmp.path().join("icons").join("home.svg"), HOME).unwrap();
    fs::write(tmp.path().join("icons").join("broken.svg"), "<svg><path d='M0 0'></svg>").unwrap();

    let out = icongen(tmp.path(), &["icons", "out"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    // 外层信息后紧跟底层原因
    let prefix = "❌ 转换图标 Broken 失败: ";
    assert!(stderr.starts_with(prefix), "{stderr}");
    assert!(stderr.trim_end().len() > prefix.len());
    assert!(!tmp.path().join("out").join("icons.ts").exists());
    assert!(!tmp.path().join("out").join("icons.test.tsx").exists());
}
