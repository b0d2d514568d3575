// Aliquot
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::process::{Command, Output};
use tempfile::tempdir;

fn aliquot(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_aliquot"))
        .args(args)
        .env_remove("ALIQUOT_CONFIG")
        .env_remove("ALIQUOT_WORKERS")
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to launch aliquot")
}

#[test]
fn test_table_to_stdout() {
    let output = aliquot(&["table", "6", "--workers", "3"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "n,aliquotSum,factorization\n1,0,1\n2,1,2\n3,1,3\n4,3,2^2\n5,1,5\n6,6,2 × 3\n");
}

#[test]
fn test_table_file_matches_across_worker_counts() {
    let dir = tempdir().unwrap();
    let one = dir.path().join("one.csv");
    let eight = dir.path().join("eight.csv");

    assert!(aliquot(&["table", "5000", "-w", "1", "-o", one.to_str().unwrap()]).status.success());
    assert!(aliquot(&["table", "5000", "-w", "8", "-o", eight.to_str().unwrap()]).status.success());

    assert_eq!(std::fs::read(&one).unwrap(), std::fs::read(&eight).unwrap());
}

#[test]
fn test_config_file_supplies_defaults() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("aliquot.toml");
    let table = dir.path().join("sigma.csv");
    std::fs::write(&config, format!("[batch]\nworkers = 2\n\n[output]\npath = {:?}\n", table.to_str().unwrap())).unwrap();

    let output = aliquot(&["--config", config.to_str().unwrap(), "table", "10"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(std::fs::read_to_string(&table).unwrap().lines().count(), 11);
}

#[test]
fn test_invalid_range_fails() {
    let output = aliquot(&["table", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid range"));
}

#[test]
fn test_factor_command() {
    let output = aliquot(&["factor", "12", "--json"]);
    assert!(output.status.success());
    let line = String::from_utf8(output.stdout).unwrap();
    assert!(line.contains(r#""aliquotSum":16"#));
}
