//! Validate and ValidateAllowIp transformations.
//!
//! Validation only ever drops lines, it never rewrites them. The drop
//! criteria are a documented policy: cosmetic/scripting rules, rules with
//! non-DNS modifiers, and rules targeting localhost or broadcast hosts are
//! removed; `ValidateAllowIp` additionally permits bare IP-literal rules
//! that plain `Validate` rejects.

use std::net::IpAddr;

use super::compress::split_hosts_line;
use super::is_comment;
use super::modifiers::{is_dns_modifier, is_regex_rule, split_modifiers};

/// Markers of cosmetic and scripting rules a DNS blocker cannot honor.
const COSMETIC_MARKERS: &[&str] = &["#@#", "#?#", "#$#", "#%#", "##", "$$"];

/// Hosts a blocklist must never target.
const DANGEROUS_HOSTS: &[&str] = &[
    "localhost",
    "localhost.localdomain",
    "broadcasthost",
    "127.0.0.1",
    "0.0.0.0",
    "255.255.255.255",
    "::1",
    "::",
];

pub(super) fn validate(lines: Vec<String>, allow_ip: bool) -> Vec<String> {
    lines
        .into_iter()
        .filter(|line| {
            let keep = is_valid(line, allow_ip);
            if !keep {
                log::debug!("dropping invalid rule: {}", line);
            }
            keep
        })
        .collect()
}

fn is_valid(line: &str, allow_ip: bool) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || is_comment(trimmed) {
        return true;
    }

    if COSMETIC_MARKERS.iter().any(|m| trimmed.contains(m)) {
        return false;
    }

    // Hosts-syntax lines stand or fall on the hostnames they map.
    if let Some(hosts) = split_hosts_line(trimmed) {
        return hosts.iter().all(|host| !is_dangerous_host(host));
    }

    if is_regex_rule(trimmed) {
        return true;
    }

    let body = trimmed.strip_prefix("@@").unwrap_or(trimmed);
    let (pattern, modifiers) = match split_modifiers(body) {
        Some((p, m)) => (p, Some(m)),
        None => (body, None),
    };

    if let Some(modifiers) = modifiers {
        let all_supported = modifiers
            .split(',')
            .map(str::trim)
            .all(|m| !m.is_empty() && is_dns_modifier(m));
        if !all_supported {
            return false;
        }
    }

    let host = extract_host(pattern);
    if is_dangerous_host(host) {
        return false;
    }
    if !allow_ip && host.parse::<IpAddr>().is_ok() {
        return false;
    }

    true
}

/// Extract the host portion of an adblock pattern.
fn extract_host(pattern: &str) -> &str {
    let host = pattern.strip_prefix("||").unwrap_or(pattern);
    let host = host.strip_prefix('|').unwrap_or(host);
    let host = host.strip_suffix('|').unwrap_or(host);
    let end = host
        .find(|c| matches!(c, '^' | '/' | '*'))
        .unwrap_or(host.len());
    &host[..end]
}

fn is_dangerous_host(host: &str) -> bool {
    DANGEROUS_HOSTS.iter().any(|d| host.eq_ignore_ascii_case(d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transformation;

    fn validate(items: &[&str]) -> Vec<String> {
        Transformation::Validate.apply(items.iter().map(|s| s.to_string()).collect())
    }

    fn validate_allow_ip(items: &[&str]) -> Vec<String> {
        Transformation::ValidateAllowIp.apply(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_keeps_plain_domain_rules() {
        let input = &["||ads.example^", "@@||good.example^", "0.0.0.0 ads.example"];
        assert_eq!(validate(input), input.to_vec());
    }

    #[test]
    fn test_drops_cosmetic_rules() {
        assert!(validate(&["example.com##.banner"]).is_empty());
        assert!(validate(&["example.com#@#.banner"]).is_empty());
        assert!(validate(&["example.com#%#window.ads = false"]).is_empty());
        assert!(validate(&["$$script[data-src]"]).is_empty());
    }

    #[test]
    fn test_drops_unsupported_modifiers() {
        assert!(validate(&["||ads.example^$popup"]).is_empty());
        assert!(validate(&["||ads.example^$third-party"]).is_empty());
        assert_eq!(
            validate(&["||ads.example^$important"]),
            vec!["||ads.example^$important"]
        );
    }

    #[test]
    fn test_drops_localhost_targets() {
        assert!(validate(&["||localhost^"]).is_empty());
        assert!(validate(&["127.0.0.1 localhost"]).is_empty());
        assert!(validate(&["||127.0.0.1^"]).is_empty());
    }

    #[test]
    fn test_hosts_line_with_real_domain_is_kept() {
        assert_eq!(
            validate(&["0.0.0.0 ads.example"]),
            vec!["0.0.0.0 ads.example"]
        );
    }

    #[test]
    fn test_ip_rules_need_allow_ip() {
        assert!(validate(&["||8.8.8.8^"]).is_empty());
        assert_eq!(validate_allow_ip(&["||8.8.8.8^"]), vec!["||8.8.8.8^"]);
    }

    #[test]
    fn test_allow_ip_still_rejects_dangerous_hosts() {
        assert!(validate_allow_ip(&["||0.0.0.0^"]).is_empty());
        assert!(validate_allow_ip(&["||::1^"]).is_empty());
    }

    #[test]
    fn test_comments_and_blanks_pass_through() {
        let input = &["! comment", "# comment", ""];
        assert_eq!(validate(input), input.to_vec());
    }

    #[test]
    fn test_regex_rules_pass_through() {
        assert_eq!(validate(&["/ads[0-9]+/"]), vec!["/ads[0-9]+/"]);
    }

    #[test]
    fn test_extract_host() {
        assert_eq!(extract_host("||ads.example^"), "ads.example");
        assert_eq!(extract_host("ads.example"), "ads.example");
        assert_eq!(extract_host("||ads.example/banner"), "ads.example");
        assert_eq!(extract_host("||ads.example^*"), "ads.example");
    }
}
