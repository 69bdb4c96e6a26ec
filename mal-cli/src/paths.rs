// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Source and report file names

use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

/// Where a report is written
#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) enum ReportTarget {
    Stdout,
    File(PathBuf),
}

impl Display for ReportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportTarget::Stdout => f.write_str("stdout"),
            ReportTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// `path`, with ".mal" appended unless it already has that extension, ignoring case
pub(crate) fn source_path(path: &Path) -> PathBuf {
    if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mal"))
    {
        path.to_path_buf()
    } else {
        let mut with_ext = path.as_os_str().to_os_string();
        with_ext.push(".mal");
        PathBuf::from(with_ext)
    }
}

/// The default report file for the program at `source`
pub(crate) fn report_path(source: &Path) -> PathBuf {
    source.with_extension("log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_appended() {
        assert_eq!(source_path(Path::new("prog")), Path::new("prog.mal"));
        assert_eq!(source_path(Path::new("dir/prog.txt")), Path::new("dir/prog.txt.mal"));
        assert_eq!(source_path(Path::new("prog.")), Path::new("prog..mal"));
    }

    #[test]
    fn extension_kept() {
        assert_eq!(source_path(Path::new("prog.mal")), Path::new("prog.mal"));
        assert_eq!(source_path(Path::new("PROG.MAL")), Path::new("PROG.MAL"));
        assert_eq!(source_path(Path::new("a/b.Mal")), Path::new("a/b.Mal"));
    }

    #[test]
    fn report_paths() {
        assert_eq!(report_path(Path::new("prog.mal")), Path::new("prog.log"));
        assert_eq!(report_path(Path::new("dir/PROG.MAL")), Path::new("dir/PROG.log"));
        assert_eq!(
            ReportTarget::File(PathBuf::from("prog.log")).to_string(),
            "prog.log"
        );
        assert_eq!(ReportTarget::Stdout.to_string(), "stdout");
    }
}
