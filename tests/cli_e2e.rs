#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Runs the binary against an isolated config dir, without colors.
fn typed_cmd(config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("strongly-typed"));
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config_dir.path());
    cmd
}

#[test]
fn test_coerce_integer_to_float() {
    let temp = TempDir::new().unwrap();
    typed_cmd(&temp)
        .args(["coerce", "100", "--to", "Float"])
        .assert()
        .success()
        .stdout(predicate::str::contains("100.0"))
        .stdout(predicate::str::contains("Float"));
}

#[test]
fn test_coerce_with_explicit_kind() {
    let temp = TempDir::new().unwrap();
    typed_cmd(&temp)
        .args(["coerce", "100", "--to", "string", "--as", "integer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"100\" String"));

    typed_cmd(&temp)
        .args(["coerce", "x", "--to", "boolean", "--as", "nil"])
        .assert()
        .success()
        .stdout(predicate::str::contains("false Boolean"));
}

#[test]
fn test_coerce_failures_exit_non_zero() {
    let temp = TempDir::new().unwrap();
    typed_cmd(&temp)
        .args(["coerce", "100", "--to", "Symbol"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: can't convert `100:Integer` to `Symbol`",
        ));

    typed_cmd(&temp)
        .args(["coerce", "100", "--to", "Bignum"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("BigInteger"));

    typed_cmd(&temp)
        .args(["coerce", "1", "--to", "object"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("can't convert `1:Integer` to `Any`"));

    typed_cmd(&temp)
        .args(["coerce", "100", "--to", "Numeric"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("concrete"));
}

#[test]
fn test_coerce_date_time_with_offsets() {
    let temp = TempDir::new().unwrap();
    typed_cmd(&temp)
        .args(["--utc-offset", "Z", "coerce", "20130221", "--to", "DateTime"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2013-02-21T00:00:00+00:00"));

    typed_cmd(&temp)
        .args(["coerce", "20130221", "--to", "date_time", "--utc-offset", "-03:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2013-02-20T21:00:00-03:00"));
}

#[test]
fn test_config_file_sets_offset() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("config.json"),
        r#"{ "utc_offset": "+02:00" }"#,
    )
    .unwrap();

    typed_cmd(&temp)
        .args(["coerce", "20130221", "--to", "DateTime"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2013-02-21T02:00:00+02:00"));

    // the flag wins over the file
    typed_cmd(&temp)
        .args(["coerce", "20130221", "--to", "DateTime", "--utc-offset", "Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2013-02-21T00:00:00+00:00"));
}

#[test]
fn test_invalid_offset_is_reported() {
    let temp = TempDir::new().unwrap();
    typed_cmd(&temp)
        .args(["--utc-offset", "sometime", "types"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid UTC offset `sometime`"));
}

#[test]
fn test_build_from_pairs() {
    let temp = TempDir::new().unwrap();
    typed_cmd(&temp)
        .args([
            "build",
            "--attr",
            "id:Integer",
            "--attr",
            "name:String",
            "--attr",
            "dob:Date",
            "id=1122",
            "name=Leo",
            "dob=19810528",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1122"))
        .stdout(predicate::str::contains("\"Leo\""))
        .stdout(predicate::str::contains("1981-05-28"));
}

#[test]
fn test_build_positional_arity() {
    let temp = TempDir::new().unwrap();
    typed_cmd(&temp)
        .args([
            "build",
            "--attr",
            "left:int",
            "--attr",
            "right:int",
            "--positional",
            "1",
            "2",
            "3",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("wrong number of arguments (3 for 2)"));
}

#[test]
fn test_build_errors() {
    let temp = TempDir::new().unwrap();
    typed_cmd(&temp)
        .args(["build", "--attr", "id:Integer"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("need arguments"));

    typed_cmd(&temp)
        .args(["build", "--attr", "id:Integer", "age=3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-existing member age"));

    typed_cmd(&temp)
        .args(["build", "--attr", "id:Integer", "--attr", "id:String", "id=3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already created"));

    typed_cmd(&temp)
        .args(["build", "--attr", "id:Integer", "id=abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only accepts `Integer`"));
}

#[test]
fn test_types_lists_every_tag() {
    let temp = TempDir::new().unwrap();
    typed_cmd(&temp)
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("DateTime"))
        .stdout(predicate::str::contains("BigInteger (not declarable, use Integer)"));
}
