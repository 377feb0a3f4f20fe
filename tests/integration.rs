//! End-to-end scenarios driven over piped stdin/stdout, one process per
//! test. Each test gets its own database file so runs never collide.

use std::env;
use std::io::Write;
use std::process::{Command, Stdio};
use std::str;

fn tdb_exe() -> Command {
    let target_dir = env::current_exe()
        .ok()
        .map(|mut path| {
            path.pop();
            if path.ends_with("deps") {
                path.pop();
            }
            path
        })
        .expect("this should only be used where a `current_exe` can be set");
    let tdb_exe = target_dir.join(format!("tdb{}", env::consts::EXE_SUFFIX));
    Command::new(tdb_exe)
}

fn run(db_path: &std::path::Path, input: Vec<String>) -> Vec<String> {
    let mut process = tdb_exe()
        .arg(db_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("unable to start the process");

    let stdin = process.stdin.as_mut().expect("unable to pipe stdin");
    for line in input {
        stdin
            .write_all(format!("{line}\n").as_bytes())
            .unwrap_or_else(|_| panic!("unable to write command `{line}`"));
    }

    let output = process.wait_with_output().expect("unable to get output");
    str::from_utf8(&output.stdout)
        .expect("could not decode process output")
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn s1_insert_and_select_preserve_order() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let output = run(
        tmp.path(),
        vec![
            "insert 3 carol carol@example.com".to_string(),
            "insert 1 alice alice@example.com".to_string(),
            "insert 2 bob bob@example.com".to_string(),
            "select".to_string(),
            ".exit".to_string(),
        ],
    );

    assert_eq!(
        output,
        vec![
            "tdb > Executed.".to_string(),
            "tdb > Executed.".to_string(),
            "tdb > Executed.".to_string(),
            "tdb > (1, alice, alice@example.com)".to_string(),
            "(2, bob, bob@example.com)".to_string(),
            "(3, carol, carol@example.com)".to_string(),
            "Executed.".to_string(),
            "tdb > ".to_string(),
        ]
    );
}

#[test]
fn s2_duplicate_key_is_rejected() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let output = run(
        tmp.path(),
        vec![
            "insert 1 alice alice@example.com".to_string(),
            "insert 1 alice2 alice2@example.com".to_string(),
            "select".to_string(),
            ".exit".to_string(),
        ],
    );

    assert_eq!(
        output,
        vec![
            "tdb > Executed.".to_string(),
            "tdb > Error: Duplicate key.".to_string(),
            "tdb > (1, alice, alice@example.com)".to_string(),
            "Executed.".to_string(),
            "tdb > ".to_string(),
        ]
    );
}

#[test]
fn s3_thirteenth_insert_succeeds_fourteenth_reports_table_full() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let mut input: Vec<String> = (0..14)
        .map(|i| format!("insert {i} user{i} person{i}@example.com"))
        .collect();
    input.push(".exit".to_string());

    let output = run(tmp.path(), input);
    let fourteenth = &output[13];
    assert_eq!(fourteenth, "tdb > Error: Table is full.");
}

#[test]
fn s4_persists_across_close_and_reopen() {
    let tmp = tempfile::NamedTempFile::new().unwrap();

    let first = run(
        tmp.path(),
        vec![
            "insert 1 alice alice@example.com".to_string(),
            ".exit".to_string(),
        ],
    );
    assert_eq!(first, vec!["tdb > Executed.".to_string(), "tdb > ".to_string()]);

    let second = run(
        tmp.path(),
        vec!["select".to_string(), ".exit".to_string()],
    );
    assert_eq!(
        second,
        vec![
            "tdb > (1, alice, alice@example.com)".to_string(),
            "Executed.".to_string(),
            "tdb > ".to_string(),
        ]
    );
}

#[test]
fn s5_constants_reports_exact_layout() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let output = run(tmp.path(), vec![".constants".to_string(), ".exit".to_string()]);

    assert_eq!(
        output,
        vec![
            "tdb > Constants:".to_string(),
            "ROW_SIZE: 293".to_string(),
            "COMMON_NODE_HEADER_SIZE: 6".to_string(),
            "LEAF_NODE_HEADER_SIZE: 10".to_string(),
            "LEAF_NODE_CELL_SIZE: 297".to_string(),
            "LEAF_NODE_SPACE_FOR_CELLS: 4086".to_string(),
            "LEAF_NODE_MAX_CELLS: 13".to_string(),
            "tdb > ".to_string(),
        ]
    );
}

#[test]
fn s6_malformed_file_length_is_a_fatal_error() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), vec![0u8; 100]).unwrap();

    let mut process = tdb_exe()
        .arg(tmp.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("unable to start the process");
    drop(process.stdin.take());

    let output = process.wait_with_output().expect("unable to get output");
    assert!(!output.status.success());
    let stderr = str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("Db file is not a whole number of pages"));
}

#[test]
fn allows_maximum_length_fields_rejects_overlong() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let username = "a".repeat(32);
    let email = "a".repeat(255);
    let output = run(
        tmp.path(),
        vec![
            format!("insert 1 {username} {email}"),
            "select".to_string(),
            ".exit".to_string(),
        ],
    );
    assert_eq!(
        output,
        vec![
            "tdb > Executed.".to_string(),
            format!("tdb > ({}, {username}, {email})", 1),
            "Executed.".to_string(),
            "tdb > ".to_string(),
        ]
    );

    let tmp2 = tempfile::NamedTempFile::new().unwrap();
    let overlong_username = "a".repeat(33);
    let output = run(
        tmp2.path(),
        vec![
            format!("insert 1 {overlong_username} {email}"),
            ".exit".to_string(),
        ],
    );
    assert_eq!(
        output,
        vec!["tdb > String is too long.".to_string(), "tdb > ".to_string()]
    );
}

#[test]
fn negative_id_is_rejected() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let output = run(
        tmp.path(),
        vec![
            "insert -1 alice alice@example.com".to_string(),
            ".exit".to_string(),
        ],
    );
    assert_eq!(
        output,
        vec!["tdb > ID must be positive.".to_string(), "tdb > ".to_string()]
    );
}

#[test]
fn id_beyond_u32_range_is_a_syntax_error() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let output = run(
        tmp.path(),
        vec![
            "insert 4294967296 alice alice@example.com".to_string(),
            ".exit".to_string(),
        ],
    );
    assert_eq!(
        output,
        vec![
            "tdb > Syntax error. Failed to parse statement.".to_string(),
            "tdb > ".to_string(),
        ]
    );
}

#[test]
fn missing_database_filename_is_fatal() {
    let mut process = tdb_exe()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("unable to start the process");
    drop(process.stdin.take());

    let output = process.wait_with_output().expect("unable to get output");
    assert!(!output.status.success());
    let stderr = str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("A database filename is required."));
}
