//! CLI parse tests.

use super::{Cli, InterruptMode};
use clap::Parser;
use paraminer_core::config::{InterruptPolicy, ParaminerConfig};
use std::path::PathBuf;
use std::time::Duration;

pub(super) fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_domain() {
    let cli = parse(&["paraminer", "-d", "example.com"]);
    assert_eq!(cli.domain.as_deref(), Some("example.com"));
    assert!(cli.list.is_none());
    assert!(!cli.silent);
    assert!(cli.global_file.is_none());
}

#[test]
fn cli_parse_list_with_options() {
    let cli = parse(&[
        "paraminer",
        "--list",
        "domains.txt",
        "-s",
        "--proxy",
        "http://127.0.0.1:8080",
        "-p",
        "X",
        "-g",
        "all.txt",
    ]);
    assert_eq!(cli.list, Some(PathBuf::from("domains.txt")));
    assert!(cli.silent);
    assert_eq!(cli.proxy.as_deref(), Some("http://127.0.0.1:8080"));
    assert_eq!(cli.placeholder.as_deref(), Some("X"));
    assert_eq!(cli.global_file, Some(PathBuf::from("all.txt")));
}

#[test]
fn cli_requires_exactly_one_target() {
    assert!(Cli::try_parse_from(["paraminer"]).is_err());
    assert!(Cli::try_parse_from(["paraminer", "-d", "a.com", "-l", "d.txt"]).is_err());
}

#[test]
fn cli_parse_on_interrupt() {
    let cli = parse(&["paraminer", "-d", "a.com", "--on-interrupt", "abort-batch"]);
    assert_eq!(cli.on_interrupt, Some(InterruptMode::AbortBatch));
    assert!(Cli::try_parse_from(["paraminer", "-d", "a.com", "--on-interrupt", "later"]).is_err());
}

#[test]
fn overrides_apply_on_top_of_config() {
    let cli = parse(&[
        "paraminer",
        "-d",
        "a.com",
        "--proxy",
        "http://p:3128",
        "-p",
        "X",
        "-o",
        "out",
        "-j",
        "0",
        "--on-interrupt",
        "abort-batch",
        "--max-attempts",
        "5",
        "--retry-delay",
        "0.5",
    ]);
    let mut cfg = ParaminerConfig::default();
    cli.apply_overrides(&mut cfg);
    assert_eq!(cfg.proxy.as_deref(), Some("http://p:3128"));
    assert_eq!(cfg.placeholder, "X");
    assert_eq!(cfg.results_dir, PathBuf::from("out"));
    assert_eq!(cfg.jobs, 1);
    assert_eq!(cfg.on_interrupt, InterruptPolicy::AbortBatch);
    let policy = cfg.retry_policy();
    assert_eq!(policy.max_attempts, 5);
    assert_eq!(policy.delay, Duration::from_millis(500));
}

#[test]
fn no_overrides_keep_config() {
    let cli = parse(&["paraminer", "-d", "a.com"]);
    let mut cfg = ParaminerConfig {
        placeholder: "CFG".to_string(),
        jobs: 3,
        ..ParaminerConfig::default()
    };
    cli.apply_overrides(&mut cfg);
    assert_eq!(cfg.placeholder, "CFG");
    assert_eq!(cfg.jobs, 3);
    assert!(cfg.retry.is_none());
}

#[test]
fn domains_cleans_single_domain() {
    let cli = parse(&["paraminer", "-d", "HTTPS://Example.com"]);
    assert_eq!(cli.domains().unwrap(), vec!["example.com"]);
}

#[test]
fn domains_reads_list_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("d.txt");
    std::fs::write(&path, "a.com\n\nb.com\na.com\n").unwrap();
    let cli = parse(&["paraminer", "-l", path.to_str().unwrap()]);
    assert_eq!(cli.domains().unwrap(), vec!["a.com", "b.com"]);
}

#[test]
fn domains_rejects_blank_domain() {
    let cli = parse(&["paraminer", "-d", "   "]);
    assert!(cli.domains().is_err());
}
