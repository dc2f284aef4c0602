//! Log file location, ANSI stripping and timestamps.
use std::fs;
use std::path::{Path, PathBuf};

/// Remove ANSI escape sequences.
///
/// CSI sequences (`ESC [` up to a final byte in `@`..=`~`) are dropped whole;
/// any other escape drops `ESC` and the character after it.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some((plain, escape)) = rest.split_once('\x1b') {
        out.push_str(plain);
        rest = if let Some(csi) = escape.strip_prefix('[') {
            csi.char_indices()
                .find(|(_, c)| ('@'..='~').contains(c))
                .and_then(|(i, c)| csi.get(i + c.len_utf8()..))
                .unwrap_or("")
        } else {
            let mut chars = escape.chars();
            chars.next();
            chars.as_str()
        };
    }
    out.push_str(rest);
    out
}

/// Return `$XDG_CACHE_HOME/dotlink/` (or `~/.cache/dotlink/`).
///
/// The directory is not created; writers create it on demand.
#[must_use]
pub fn cache_dir() -> Option<PathBuf> {
    let base = match std::env::var_os("XDG_CACHE_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(|home| PathBuf::from(home).join(".cache"))?,
    };
    Some(base.join("dotlink"))
}

/// `<dir>/<command>.log`, creating `dir` if needed.
pub(super) fn log_file_in(dir: &Path, command: &str) -> Option<PathBuf> {
    fs::create_dir_all(dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// The log file for `command` under [`cache_dir`].
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    log_file_in(&cache_dir()?, command)
}

/// Current UTC time rendered with a `chrono` format string.
pub(super) fn utc_now(format: &str) -> String {
    chrono::Utc::now().format(format).to_string()
}
