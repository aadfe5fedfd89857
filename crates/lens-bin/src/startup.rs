//! Command-line file targets and the initial editor state.

use std::path::{Path, PathBuf};

use core_state::{EditorState, TextBuffer};
use tracing::info;

/// A file to open, optionally with the line to start on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub path: PathBuf,
    pub line: Option<usize>,
}

/// `file/N` names `file` opened at line `N`, unless the parent is an
/// existing directory, in which case the argument is a plain path.
pub fn parse_target(arg: &Path) -> Target {
    let whole = Target {
        path: arg.to_path_buf(),
        line: None,
    };
    let (Some(parent), Some(name)) = (arg.parent(), arg.file_name()) else {
        return whole;
    };
    if parent.as_os_str().is_empty() || parent.is_dir() {
        return whole;
    }
    let digits: String = name
        .to_string_lossy()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    match digits.parse::<usize>() {
        Ok(line) => Target {
            path: parent.to_path_buf(),
            line: Some(line),
        },
        Err(_) => whole,
    }
}

pub fn resolve_targets(args: &[PathBuf], default_file: &Path) -> Vec<Target> {
    if args.is_empty() {
        return vec![Target {
            path: default_file.to_path_buf(),
            line: None,
        }];
    }
    args.iter().map(|a| parse_target(a)).collect()
}

/// Load every target into one buffer. Returns the state and the absolute
/// line to start on: the first target that names a line, offset by the
/// lines of the files before it.
pub fn open(targets: &[Target]) -> (EditorState, Option<usize>) {
    let paths: Vec<&Path> = targets.iter().map(|t| t.path.as_path()).collect();
    let buffer = TextBuffer::open(&paths);
    let start = targets
        .iter()
        .zip(buffer.files())
        .scan(0usize, |offset, (target, (_, count))| {
            let base = *offset;
            *offset += count;
            Some(target.line.map(|l| base + l))
        })
        .flatten()
        .next();
    info!(
        target: "runtime",
        files = buffer.file_count(),
        lines = buffer.line_count(),
        new_file = buffer.is_new_file(),
        start_line = start,
        "buffer_opened"
    );
    (EditorState::new(buffer), start)
}
