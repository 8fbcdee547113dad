//! RemoveModifiers transformation.

/// Modifiers a DNS-level blocker understands.
const DNS_MODIFIERS: &[&str] = &[
    "important",
    "badfilter",
    "client",
    "ctag",
    "denyallow",
    "dnsrewrite",
    "dnstype",
];

/// Whether a modifier (possibly `~`-negated or `name=value`) is DNS-supported.
pub(super) fn is_dns_modifier(modifier: &str) -> bool {
    let name = modifier.split('=').next().unwrap_or(modifier);
    let name = name.strip_prefix('~').unwrap_or(name);
    DNS_MODIFIERS.contains(&name)
}

/// Whether a rule is a `/regex/` rule (after any `@@` prefix).
pub(super) fn is_regex_rule(rule: &str) -> bool {
    let body = rule.strip_prefix("@@").unwrap_or(rule);
    body.len() > 1 && body.starts_with('/') && body.ends_with('/')
}

/// Split a rule into its pattern and the `$modifiers` segment.
///
/// Returns `None` for rules without a `$` separator and for regex rules,
/// where `$` may be part of the expression.
pub(super) fn split_modifiers(rule: &str) -> Option<(&str, &str)> {
    if is_regex_rule(rule) {
        return None;
    }
    let idx = rule.rfind('$')?;
    Some((&rule[..idx], &rule[idx + 1..]))
}

pub(super) fn remove_modifiers(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| strip_unsupported(&line))
        .collect()
}

fn strip_unsupported(line: &str) -> String {
    let trimmed = line.trim();
    if trimmed.is_empty() || super::is_comment(trimmed) {
        return line.to_string();
    }

    let Some((pattern, modifiers)) = split_modifiers(line) else {
        return line.to_string();
    };

    let kept: Vec<&str> = modifiers
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty() && is_dns_modifier(m))
        .collect();

    if kept.is_empty() {
        pattern.to_string()
    } else {
        format!("{}${}", pattern, kept.join(","))
    }
}
