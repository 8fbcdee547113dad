//! Compress transformation: hosts-file syntax to adblock syntax.

/// Addresses that mark a hosts line as a blocking entry.
const BLOCKING_IPS: &[&str] = &["0.0.0.0", "127.0.0.1", "::", "::1"];

/// Hostnames that are hosts-file plumbing rather than blocked domains.
const SERVICE_NAMES: &[&str] = &[
    "localhost",
    "localhost.localdomain",
    "broadcasthost",
    "local",
    "ip6-localhost",
    "ip6-loopback",
];

/// Split a hosts-syntax line into its mapped hostnames.
///
/// Returns `None` when the line is not hosts syntax. An inline `#` comment
/// terminates the hostname list.
pub(super) fn split_hosts_line(line: &str) -> Option<Vec<&str>> {
    let mut tokens = line.split_whitespace();
    let ip = tokens.next()?;
    if !BLOCKING_IPS.contains(&ip) {
        return None;
    }

    let hosts: Vec<&str> = tokens.take_while(|t| !t.starts_with('#')).collect();
    if hosts.is_empty() {
        None
    } else {
        Some(hosts)
    }
}

/// Whether a hostname is hosts-file plumbing.
pub(super) fn is_service_name(host: &str) -> bool {
    SERVICE_NAMES.iter().any(|s| host.eq_ignore_ascii_case(s))
}

pub(super) fn compress(lines: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        match split_hosts_line(line.trim()) {
            Some(hosts) => {
                for host in hosts {
                    if is_service_name(host) {
                        continue;
                    }
                    out.push(format!("||{}^", host));
                }
            }
            None => out.push(line),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transformation;

    fn apply(items: &[&str]) -> Vec<String> {
        Transformation::Compress.apply(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_converts_hosts_line() {
        assert_eq!(apply(&["0.0.0.0 ads.example"]), vec!["||ads.example^"]);
        assert_eq!(apply(&["127.0.0.1 ads.example"]), vec!["||ads.example^"]);
    }

    #[test]
    fn test_multiple_hostnames_per_line() {
        assert_eq!(
            apply(&["0.0.0.0 ads.example track.example"]),
            vec!["||ads.example^", "||track.example^"]
        );
    }

    #[test]
    fn test_inline_comment_terminates_hosts() {
        assert_eq!(
            apply(&["0.0.0.0 ads.example # banner networks"]),
            vec!["||ads.example^"]
        );
    }

    #[test]
    fn test_service_names_are_dropped() {
        assert!(apply(&["127.0.0.1 localhost"]).is_empty());
        assert!(apply(&["::1 ip6-localhost ip6-loopback"]).is_empty());
    }

    #[test]
    fn test_non_hosts_lines_pass_through() {
        assert_eq!(apply(&["||already.adblock^"]), vec!["||already.adblock^"]);
        assert_eq!(apply(&["! comment"]), vec!["! comment"]);
        assert_eq!(apply(&["192.168.1.1 router.lan"]), vec!["192.168.1.1 router.lan"]);
    }

    #[test]
    fn test_split_hosts_line() {
        assert_eq!(
            split_hosts_line("0.0.0.0 a.example b.example"),
            Some(vec!["a.example", "b.example"])
        );
        assert_eq!(split_hosts_line("0.0.0.0"), None);
        assert_eq!(split_hosts_line("||a.example^"), None);
    }
}
