//! Resolution from a hosts table.

use hostname_alias::{
    resolve_aliases_with, run, HostsFile, Resolve, ResolutionFailed, HOST_NOT_FOUND,
    NETDB_INTERNAL,
};
use std::io::Write;
use std::net::{IpAddr, Ipv4Addr};

const TABLE: &str = "\
127.0.0.1   localhost
# 10.0.0.1  commented.example.com
10.0.0.7    build.example.com build ci build   # build box
10.0.0.8    printer.example.com
fd00::9     v6only.example.com v6
";

fn table_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TABLE.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn resolves_from_a_file() {
    let file = table_file();
    let hosts = HostsFile::open(file.path());
    assert_eq!(hosts.path(), Some(file.path()));

    let record = hosts.lookup("ci").unwrap();
    assert_eq!(record.name(), "build.example.com");
    assert_eq!(record.aliases(), ["build", "ci", "build"]);
    assert_eq!(record.addresses(), [IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7))]);
}

#[test]
fn prints_the_alias_line_from_a_table() {
    let hosts = HostsFile::from_contents(TABLE);

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let status = run(&hosts, "BUILD.example.com", &mut stdout, &mut stderr).unwrap();

    assert_eq!(status, 0);
    assert_eq!(stdout, b"build ci build\n");
    assert!(stderr.is_empty());
}

#[test]
fn entry_without_aliases_prints_an_empty_line() {
    let hosts = HostsFile::from_contents(TABLE);
    let aliases = resolve_aliases_with(&hosts, "printer.example.com").unwrap();

    let mut stdout = Vec::new();
    hostname_alias::write_aliases(&mut stdout, aliases).unwrap();
    assert_eq!(stdout, b"\n");
}

#[test]
fn ipv6_and_commented_entries_are_not_found() {
    let hosts = HostsFile::from_contents(TABLE);

    for name in ["v6only.example.com", "v6", "commented.example.com"] {
        let err = hosts.lookup(name).unwrap_err();
        assert_eq!(err, ResolutionFailed::from_code(HOST_NOT_FOUND));
    }
}

#[test_log::test]
fn unreadable_table_is_an_internal_error() {
    let dir = tempfile::tempdir().unwrap();
    let hosts = HostsFile::open(dir.path().join("missing-hosts"));

    let err = hosts.lookup("localhost").unwrap_err();
    assert_eq!(err.code(), NETDB_INTERNAL);
    assert_eq!(err.message(), ResolutionFailed::from_code(NETDB_INTERNAL).message());
}

#[test]
fn system_table_points_at_the_platform_path() {
    let hosts = HostsFile::system();
    assert_eq!(hosts.path(), Some(host_table::hosts_path()));
}

#[test]
fn non_utf8_bytes_do_not_spoil_the_table() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"# caf\xe9 network\n10.0.0.7 build.example.com build ci\n").unwrap();
    file.flush().unwrap();

    let record = HostsFile::open(file.path()).lookup("build.example.com").unwrap();
    assert_eq!(record.name(), "build.example.com");
    assert_eq!(record.aliases(), ["build", "ci"]);
}
