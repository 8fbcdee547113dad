//! ConvertToAscii transformation: IDN labels to punycode.

use super::is_comment;

pub(super) fn convert_to_ascii(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| {
            if line.is_ascii() || is_comment(line.trim_start()) {
                line
            } else {
                convert_line(&line)
            }
        })
        .collect()
}

/// Characters that can appear inside a domain run.
fn is_domain_char(c: char) -> bool {
    !c.is_ascii() || c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')
}

fn convert_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut run = String::new();

    for c in line.chars() {
        if is_domain_char(c) {
            run.push(c);
        } else {
            flush_run(&mut out, &mut run);
            out.push(c);
        }
    }
    flush_run(&mut out, &mut run);
    out
}

fn flush_run(out: &mut String, run: &mut String) {
    if run.is_empty() {
        return;
    }
    if run.is_ascii() {
        out.push_str(run);
    } else {
        match idna::domain_to_ascii(run) {
            Ok(ascii) => out.push_str(&ascii),
            Err(e) => {
                log::debug!("punycode conversion failed for {:?}: {}", run, e);
                out.push_str(run);
            }
        }
    }
    run.clear();
}
