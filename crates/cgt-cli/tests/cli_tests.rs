#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn write_fixture(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write fixture");
    file
}

#[test]
fn report_fails_without_file() {
    let mut cmd = Command::cargo_bin("cgt-tool").expect("binary exists");
    cmd.arg("report").assert().failure();
}

#[test]
fn report_fails_on_missing_columns() {
    let fixture = write_fixture("symbol,side,trade_date,quantity\nAAA,BUY,01/01/2020,10\n");
    let mut cmd = Command::cargo_bin("cgt-tool").expect("binary exists");
    cmd.arg("report")
        .arg(fixture.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("transaction_amount"));
}

#[test]
fn report_plain_output_contains_summary_and_match() {
    let fixture = write_fixture(
        "symbol,side,trade_date,quantity,transaction_amount\n\
         AAA,BUY,01/01/2019,10,1000\n\
         AAA,SELL,01/08/2020,10,2000\n",
    );
    let mut cmd = Command::cargo_bin("cgt-tool").expect("binary exists");
    cmd.arg("report")
        .arg(fixture.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("# SUMMARY"))
        .stdout(predicate::str::contains("FY2021"));
}

#[test]
fn report_json_output_is_valid_json() {
    let fixture = write_fixture(
        "symbol,side,trade_date,quantity,transaction_amount\n\
         AAA,BUY,01/01/2019,10,1000\n\
         AAA,SELL,01/08/2020,10,2000\n",
    );
    let mut cmd = Command::cargo_bin("cgt-tool").expect("binary exists");
    let output = cmd
        .arg("report")
        .arg("--format")
        .arg("json")
        .arg(fixture.path())
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid json output");
    assert!(parsed.get("2021").is_some());
}

#[test]
fn short_sell_fails_without_the_flag() {
    let fixture = write_fixture(
        "symbol,side,trade_date,quantity,transaction_amount\n\
         AAA,SELL,01/08/2020,10,2000\n",
    );
    let mut cmd = Command::cargo_bin("cgt-tool").expect("binary exists");
    cmd.arg("report")
        .arg(fixture.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("short selling"));
}

#[test]
fn short_sell_succeeds_with_the_flag() {
    let fixture = write_fixture(
        "symbol,side,trade_date,quantity,transaction_amount\n\
         AAA,SELL,01/08/2020,10,2000\n",
    );
    let mut cmd = Command::cargo_bin("cgt-tool").expect("binary exists");
    cmd.arg("report")
        .arg("--allow-short-selling")
        .arg(fixture.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Short Sell"));
}
