//! Parsing of hosts tables as they appear in the wild.

use host_table::{entries, find, Entry};
use rstest::rstest;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

const TABLE: &str = "\
# Static table lookup for hostnames.
127.0.0.1       localhost
127.0.1.1       workstation.lan workstation

# The following lines are desirable for IPv6 capable hosts
::1             localhost ip6-localhost ip6-loopback
fe00::0         ip6-localnet

10.0.0.7\tbuild.example.com  build\tci # the build box
not-an-address  broken.example.com
10.0.0.8
";

#[test]
fn skips_comments_blanks_and_malformed_lines() {
    let names = entries(TABLE).map(|entry| entry.name()).collect::<Vec<_>>();
    assert_eq!(
        names,
        [
            "localhost",
            "workstation.lan",
            "localhost",
            "ip6-localnet",
            "build.example.com"
        ]
    );
}

#[test]
fn aliases_keep_line_order() {
    let entry = find(TABLE, "build.example.com").unwrap();
    assert_eq!(entry.address(), IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7)));
    assert_eq!(entry.aliases().collect::<Vec<_>>(), ["build", "ci"]);
    assert_eq!(
        entry.names().collect::<Vec<_>>(),
        ["build.example.com", "build", "ci"]
    );
}

#[test]
fn first_matching_line_wins() {
    let entry = find(TABLE, "localhost").unwrap();
    assert_eq!(entry.address(), IpAddr::V4(Ipv4Addr::LOCALHOST));

    let entry = find(TABLE, "ip6-loopback").unwrap();
    assert_eq!(entry.address(), IpAddr::V6(Ipv6Addr::LOCALHOST));
    assert_eq!(entry.name(), "localhost");
}

#[rstest]
#[case("workstation")]
#[case("WORKSTATION")]
#[case("Workstation.LAN")]
fn names_match_case_insensitively(#[case] name: &str) {
    let entry = find(TABLE, name).unwrap();
    assert_eq!(entry.name(), "workstation.lan");
}

#[rstest]
#[case("")]
#[case("the")]
#[case("broken.example.com")]
#[case("box")]
fn unknown_names_are_not_found(#[case] name: &str) {
    assert!(find(TABLE, name).is_none());
}

#[rstest]
#[case("")]
#[case("   \t ")]
#[case("# 127.0.0.1 localhost")]
#[case("127.0.0.1")]
#[case("127.0.0.1   # localhost")]
#[case("localhost 127.0.0.1")]
fn lines_without_an_entry(#[case] line: &str) {
    assert!(Entry::parse(line).is_none());
}

#[test]
fn entry_without_aliases() {
    let entry = Entry::parse("192.168.1.10 printer").unwrap();
    assert_eq!(entry.name(), "printer");
    assert_eq!(entry.aliases().count(), 0);
}

#[test]
fn duplicate_aliases_are_kept() {
    let entry = Entry::parse("10.1.1.1 a.test b.test b.test").unwrap();
    assert_eq!(entry.aliases().collect::<Vec<_>>(), ["b.test", "b.test"]);
    assert_eq!(entry.aliases().rev().next(), Some("b.test"));
}
