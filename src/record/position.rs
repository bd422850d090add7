//! Call-site position strings (`dir/file.rs:42`).

use backtrace::{Backtrace, BacktraceFrame};
use std::panic::Location;

/// Turns a call site into the `pos` text of a record.
///
/// Every logging entry point is `#[track_caller]`, so `caller` is already
/// the first frame outside the logging layer (and outside any wrapper that
/// is itself `#[track_caller]`). `depth` is the extra offset requested via
/// `depth`/`depthf`, for suppliers that walk the stack themselves.
pub trait PositionSupplier: Send + Sync {
    fn position(&self, caller: &'static Location<'static>, depth: usize) -> String;
}

/// Default supplier: the last directory and file name of the caller plus its line.
///
/// A non-zero `depth` walks the stack from the caller's frame outwards, so a
/// wrapper that is not `#[track_caller]` can report its own caller. When the
/// frames carry no line information the caller itself is reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallerLocation;

impl PositionSupplier for CallerLocation {
    fn position(&self, caller: &'static Location<'static>, depth: usize) -> String {
        if depth > 0
            && let Some(position) = frame_above(caller, depth)
        {
            return position;
        }
        format!("{}:{}", short_path(caller.file()), caller.line())
    }
}

/// The source position `depth` frames outside the frame that contains `caller`.
fn frame_above(caller: &Location<'_>, depth: usize) -> Option<String> {
    let trace = Backtrace::new();
    let sites: Vec<_> = trace
        .frames()
        .iter()
        .flat_map(BacktraceFrame::symbols)
        .filter_map(|symbol| Some((symbol.filename()?, symbol.lineno()?)))
        .collect();
    let start = sites
        .iter()
        .position(|(file, line)| *line == caller.line() && file.ends_with(caller.file()))?;
    let (file, line) = sites.get(start + depth)?;
    Some(format!("{}:{line}", short_path(&file.to_string_lossy())))
}

/// Keeps only the parent directory and file name: `src/logger/mod.rs` → `logger/mod.rs`.
fn short_path(file: &str) -> &str {
    let is_sep = |c: char| c == '/' || c == '\\';
    let Some(last) = file.rfind(is_sep) else {
        return file;
    };
    file[..last]
        .rfind(is_sep)
        .map_or(file, |parent| &file[parent + 1..])
}
