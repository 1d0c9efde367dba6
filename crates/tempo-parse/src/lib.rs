//! Text-file loaders for the three Tempo input vectors.
//!
//! Each input file is line-oriented with comma-separated fields and
//! surrounding whitespace stripped per field:
//!
//! | File | Record | Fields |
//! |------|--------|--------|
//! | processes | [`ProcessSpec`] | `pid, burst, arrival, priority` |
//! | resources | [`ResourceSpec`] | `name, count` |
//! | actions | [`ActionSpec`] | `pid, type, resource, cycle` |
//!
//! Blank lines are ignored. Any malformed line fails the whole load with
//! an error naming the path and line. The `*_from_str` forms parse from
//! memory so loaders are testable without touching the filesystem.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;

pub use error::{LoadError, LoadErrorKind};

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tempo_core::{ActionSpec, ProcessSpec, ResourceSpec, SyncOp};

/// Load a process vector from a file of `pid, burst, arrival, priority`
/// lines.
pub fn load_processes(path: impl AsRef<Path>) -> Result<Vec<ProcessSpec>, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| LoadError::from(e).with_path(path.into()))?;
    processes_from_str(&text).map_err(|e| e.with_path(path.into()))
}

/// Load a resource vector from a file of `name, count` lines.
pub fn load_resources(path: impl AsRef<Path>) -> Result<Vec<ResourceSpec>, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| LoadError::from(e).with_path(path.into()))?;
    resources_from_str(&text).map_err(|e| e.with_path(path.into()))
}

/// Load an action script from a file of `pid, type, resource, cycle`
/// lines.
pub fn load_actions(path: impl AsRef<Path>) -> Result<Vec<ActionSpec>, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| LoadError::from(e).with_path(path.into()))?;
    actions_from_str(&text).map_err(|e| e.with_path(path.into()))
}

/// Parse a process vector from in-memory text.
pub fn processes_from_str(text: &str) -> Result<Vec<ProcessSpec>, LoadError> {
    records(text, 4, |line_no, content, fields| {
        Ok(ProcessSpec {
            pid: fields[0].to_string(),
            burst: parse_int(line_no, content, fields[1])?,
            arrival: parse_int(line_no, content, fields[2])?,
            priority: parse_int(line_no, content, fields[3])?,
        })
    })
}

/// Parse a resource vector from in-memory text.
pub fn resources_from_str(text: &str) -> Result<Vec<ResourceSpec>, LoadError> {
    records(text, 2, |line_no, content, fields| {
        Ok(ResourceSpec {
            name: fields[0].to_string(),
            capacity: parse_int(line_no, content, fields[1])?,
        })
    })
}

/// Parse an action script from in-memory text.
pub fn actions_from_str(text: &str) -> Result<Vec<ActionSpec>, LoadError> {
    records(text, 4, |line_no, content, fields| {
        let op = SyncOp::from_token(fields[1]).ok_or_else(|| {
            LoadError::new(LoadErrorKind::UnknownOp {
                line_no,
                content: content.to_string(),
                token: fields[1].to_string(),
            })
        })?;
        Ok(ActionSpec {
            pid: fields[0].to_string(),
            op,
            resource: fields[2].to_string(),
            cycle: parse_int(line_no, content, fields[3])?,
        })
    })
}

/// Shared line loop: skip blanks, split on commas, enforce the field
/// count, hand the trimmed fields to the record builder.
fn records<T>(
    text: &str,
    expected: usize,
    build: impl Fn(usize, &str, &[&str]) -> Result<T, LoadError>,
) -> Result<Vec<T>, LoadError> {
    let mut out = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != expected {
            return Err(LoadError::new(LoadErrorKind::FieldCount {
                line_no,
                content: line.to_string(),
                expected,
                found: fields.len(),
            }));
        }
        out.push(build(line_no, line, &fields)?);
    }
    Ok(out)
}

fn parse_int<N: FromStr>(line_no: usize, content: &str, value: &str) -> Result<N, LoadError> {
    value.parse().map_err(|_| {
        LoadError::new(LoadErrorKind::InvalidInt {
            line_no,
            content: content.to_string(),
            value: value.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_processes_with_whitespace_and_blanks() {
        let text = "P1, 5, 0, 2\n\n  P2 ,3,1, 1 \n";
        let procs = processes_from_str(text).unwrap();
        assert_eq!(procs.len(), 2);
        assert_eq!(
            procs[0],
            ProcessSpec {
                pid: "P1".into(),
                burst: 5,
                arrival: 0,
                priority: 2,
            }
        );
        assert_eq!(procs[1].pid, "P2");
        assert_eq!(procs[1].priority, 1);
    }

    #[test]
    fn negative_priority_is_accepted() {
        let procs = processes_from_str("P1, 5, 0, -3").unwrap();
        assert_eq!(procs[0].priority, -3);
    }

    #[test]
    fn process_field_count_is_exact() {
        let err = processes_from_str("P1, 5, 0").unwrap_err();
        match err.kind() {
            LoadErrorKind::FieldCount {
                line_no,
                expected,
                found,
                ..
            } => {
                assert_eq!((*line_no, *expected, *found), (1, 4, 3));
            }
            other => panic!("expected FieldCount, got {other:?}"),
        }
    }

    #[test]
    fn bad_integer_names_line_and_value() {
        let err = processes_from_str("P1, 5, 0, 1\nP2, many, 0, 1").unwrap_err();
        match err.kind() {
            LoadErrorKind::InvalidInt { line_no, value, .. } => {
                assert_eq!(*line_no, 2);
                assert_eq!(value, "many");
            }
            other => panic!("expected InvalidInt, got {other:?}"),
        }
    }

    #[test]
    fn parses_resources() {
        let resources = resources_from_str("M, 1\nS, 3\n").unwrap();
        assert_eq!(resources.len(), 2);
        assert!(resources[0].is_mutex());
        assert_eq!(resources[1].capacity, 3);
    }

    #[test]
    fn parses_actions_with_all_six_ops() {
        let text = "\
P1, READ, S, 0
P1, WRITE, S, 1
P1, ACQUIRE, M, 2
P1, RELEASE, M, 3
P1, WAIT, S, 4
P1, SIGNAL, S, 5";
        let actions = actions_from_str(text).unwrap();
        assert_eq!(actions.len(), 6);
        assert_eq!(actions[2].op, SyncOp::Acquire);
        assert_eq!(actions[5].cycle, 5);
    }

    #[test]
    fn unknown_action_type_fails_the_load() {
        let err = actions_from_str("P1, LOCK, M, 0").unwrap_err();
        match err.kind() {
            LoadErrorKind::UnknownOp { token, .. } => assert_eq!(token, "LOCK"),
            other => panic!("expected UnknownOp, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_yields_empty_vectors() {
        assert!(processes_from_str("").unwrap().is_empty());
        assert!(resources_from_str("\n\n").unwrap().is_empty());
        assert!(actions_from_str("  \n").unwrap().is_empty());
    }

    #[test]
    fn load_from_path_reports_the_path_on_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "P1, 5, zero, 0").unwrap();
        let err = load_processes(file.path()).unwrap_err();
        assert_eq!(err.path(), Some(&file.path().to_path_buf()));
        let msg = format!("{err}");
        assert!(msg.contains("zero"));
        assert!(msg.contains("line 1"));
    }

    #[test]
    fn load_from_path_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "P1, 5, 0, 2").unwrap();
        writeln!(file, "P2, 3, 1, 1").unwrap();
        let procs = load_processes(file.path()).unwrap();
        assert_eq!(procs.len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_resources("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err.kind(), LoadErrorKind::Io(_)));
        assert!(err.path().is_some());
    }
}
