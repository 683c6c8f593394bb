//! End-to-end tests for the `ipprov` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const DNS_LOG: &str = "\
1700000000.1,example.,93.184.216.34,
1700000001.2,cdn.example.net,\"151.101.1.1,151.101.65.1\",2a04:4e42::1
";

const CONN_LOG: &str = "\
1700000000.5,192.168.1.20,93.184.216.34,443
1700000001.0,192.168.1.20,10.0.0.5,22
1700000002.0,192.168.1.20,203.0.113.9,443
1700000003.0,192.168.1.20,8.8.8.8,53
1700000004.0,fe80::1,ff02::fb,5353
1700000005.0,0.0.0.0,255.255.255.255,67
";

/// Temp workspace with an isolated config file.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new(config: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), config).unwrap();
        Self { dir }
    }

    fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("ipprov").unwrap();
        cmd.env_remove("IPPROV_SUFFIX")
            .env_remove("RUST_LOG")
            .arg("--no-color")
            .arg("--config")
            .arg(self.path("config.toml"));
        cmd
    }
}

const NO_LOOKUP_TOOLS: &str = "\
[lookup]
dig = \"ipprov-test-missing-dig\"
whois = \"ipprov-test-missing-whois\"
timeout_secs = 2
";

fn hardcoded(ws: &Workspace) -> Command {
    let dns = ws.file("dns.log", DNS_LOG);
    let conns = ws.file("connections.log", CONN_LOG);
    let mut cmd = ws.cmd();
    cmd.arg("hardcoded").arg(dns).arg(conns);
    cmd
}

#[test]
fn test_hardcoded_pretty() {
    let ws = Workspace::new("");
    hardcoded(&ws)
        .assert()
        .success()
        .stdout("Hard-coded IPs (filtered):\n203.0.113.9\n");
}

#[test]
fn test_hardcoded_without_default_ignore() {
    let ws = Workspace::new("");
    hardcoded(&ws)
        .arg("--no-default-ignore")
        .assert()
        .success()
        .stdout("Hard-coded IPs (filtered):\n8.8.8.8\n203.0.113.9\n");
}

#[test]
fn test_hardcoded_everything_filtered() {
    let ws = Workspace::new("");
    hardcoded(&ws)
        .args(["--ignore", "203.0.113.9"])
        .assert()
        .success()
        .stdout("No hard-coded IPs detected after filtering.\n");
}

#[test]
fn test_hardcoded_csv() {
    let ws = Workspace::new("");
    hardcoded(&ws)
        .args(["-o", "csv"])
        .assert()
        .success()
        .stdout("ip\n203.0.113.9\n");
}

#[test]
fn test_hardcoded_json_report() {
    let ws = Workspace::new("");
    let output = hardcoded(&ws).args(["-o", "json"]).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["hardcoded"], serde_json::json!(["203.0.113.9"]));
    assert_eq!(report["resolved"], 4);
    assert_eq!(report["observed"], 9);
    assert_eq!(report["excluded"]["private"], 3);
    assert_eq!(report["excluded"]["multicast"], 1);
    assert_eq!(report["excluded"]["unspecified"], 1);
    assert_eq!(report["excluded"]["reserved"], 1);
    assert_eq!(report["excluded"]["ignored"], 1);
}

#[test]
fn test_hardcoded_verbose_summary() {
    let ws = Workspace::new("");
    hardcoded(&ws)
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Hard-coded IPs (filtered):\n203.0.113.9\n"))
        .stdout(predicate::str::contains(
            "9 observed, 4 resolved, 8 unresolved; excluded 1 unspecified, 1 multicast, 1 reserved, 3 private, 1 ignored",
        ))
        .stdout(predicate::str::contains("ignore list: 8.8.4.4, 8.8.8.8"));
}

#[test]
fn test_config_ignore_list_applies() {
    let ws = Workspace::new("ignore = [\"203.0.113.9\"]\n");
    hardcoded(&ws)
        .assert()
        .success()
        .stdout("Hard-coded IPs (filtered):\n8.8.8.8\n");
}

#[test]
fn test_hardcoded_missing_input_is_fatal() {
    let ws = Workspace::new("");
    let conns = ws.file("connections.log", CONN_LOG);
    ws.cmd()
        .arg("hardcoded")
        .arg(ws.path("no-such-dns.log"))
        .arg(conns)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open"));
}

#[test]
fn test_classify_with_failing_lookups() {
    let ws = Workspace::new(NO_LOOKUP_TOOLS);
    let ips = ws.file("ips.txt", "# from capture 2024-05-01\n203.0.113.9\n\n2001:db8::1\n");
    let bpf = ws.path("aws.bpf");
    fs::write(&bpf, "host 1.2.3.4\n").unwrap();

    ws.cmd()
        .arg("classify")
        .arg(&ips)
        .arg(&bpf)
        .assert()
        .success()
        .stdout("ip,ptr,orgname,netname\n203.0.113.9,,,\n2001:db8::1,,,\n");

    assert_eq!(fs::read_to_string(&bpf).unwrap(), "\n");
}

#[test]
fn test_classify_json_marks_unavailable_lookups() {
    let ws = Workspace::new(NO_LOOKUP_TOOLS);
    let ips = ws.file("ips.txt", "198.51.100.7\n");
    let output = ws
        .cmd()
        .args(["-o", "json", "classify"])
        .arg(&ips)
        .arg(ws.path("out.bpf"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["suffix"], "amazonaws.com");
    assert_eq!(value["filter"], "");
    assert_eq!(value["records"][0]["address"], "198.51.100.7");
    assert_eq!(value["records"][0]["ptr"]["status"], "unavailable");
    assert_eq!(value["records"][0]["registry"]["status"], "unavailable");
}

#[test]
fn test_classify_rejects_empty_suffix() {
    let ws = Workspace::new(NO_LOOKUP_TOOLS);
    let ips = ws.file("ips.txt", "203.0.113.9\n");
    ws.cmd()
        .arg("classify")
        .arg(&ips)
        .arg(ws.path("out.bpf"))
        .args(["--suffix", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid suffix rule"));
    assert!(!ws.path("out.bpf").exists());
}

#[test]
fn test_config_show_and_path() {
    let ws = Workspace::new("suffix = \"cloudfront.net\"\n");
    ws.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("suffix = \"cloudfront.net\""))
        .stdout(predicate::str::contains("8.8.4.4"));

    ws.cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_malformed_config_is_fatal() {
    let ws = Workspace::new("ignore = [\"not-an-address\"]\n");
    ws.cmd()
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}
