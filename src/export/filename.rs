// src/export/filename.rs

const FILENAME_SUFFIX: &str = "_job_details.yaml";

fn is_kept(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Reduce a string to `[A-Za-z0-9_-]`.
///
/// Whitespace between two kept characters becomes one underscore; whitespace
/// touching a stripped character goes away with it, so `"Acme, Inc.!"`
/// gives `AcmeInc` while `"Senior SWE"` gives `Senior_SWE`.
pub fn sanitize(part: &str) -> String {
    let chars: Vec<char> = part.trim().chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            let run_start = i;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            let before = run_start.checked_sub(1).map(|j| chars[j]);
            let after = chars.get(i).copied();
            if before.is_some_and(is_kept) && after.is_some_and(is_kept) {
                out.push('_');
            }
            continue;
        }

        if is_kept(c) {
            out.push(c);
        }
        i += 1;
    }

    out
}

pub fn export_filename(company: &str, title: &str) -> String {
    format!("{}_{}{}", sanitize(company), sanitize(title), FILENAME_SUFFIX)
}
