use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::IntoAppError;
use std::io::ErrorKind;

/// Make `s` safe to use as one component of a file name.
///
/// Path separators, whitespace, and shell-sensitive punctuation become `_`. A blank string becomes
/// `na` so the component never disappears from the name.
#[must_use]
pub fn sanitize_filename(s: &str) -> String {
    let s = s.trim();
    if s.is_empty() {
        return "na".to_string();
    }

    s.chars()
        .map(|c| match c {
            '/' | '\\' | ' ' | ':' | ';' | '"' | '\'' | '\n' | '\r' | '\t' => '_',
            c => c,
        })
        .collect()
}

/// File name of the summary of one test case.
#[must_use]
pub fn summary_file_name(run_id: &str, test_case: &str) -> String {
    format!("sli-summary.v3.{}.{}.json", sanitize_filename(run_id), sanitize_filename(test_case))
}

/// A path for `file_name` inside `dir` that does not exist yet.
///
/// On collision `-1`, `-2`, and so on are appended to the full name.
pub fn next_summary_path(dir: &Utf8Path, file_name: &str) -> Result<Utf8PathBuf> {
    let base = dir.join(file_name);
    let mut path = base.clone();
    let mut attempt = 0_u32;

    loop {
        match path.symlink_metadata() {
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(path),
            Err(e) => return Err(e).into_app_err_with(|| format!("unable to check '{path}'")),
            Ok(_) => {
                attempt += 1;
                path = Utf8PathBuf::from(format!("{base}-{attempt}"));
            }
        }
    }
}
