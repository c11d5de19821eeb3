//! Integration tests for the owl CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn owl(ledger: &Path) -> Command {
    let mut cmd = Command::cargo_bin("owl").unwrap();
    cmd.env("NO_COLOR", "1")
        .arg("--ledger")
        .arg(ledger)
        .arg("--seed")
        .arg("7");
    cmd
}

fn ledger_in(dir: &TempDir) -> PathBuf {
    dir.path().join("ledger.jsonl")
}

fn line_count(path: &Path) -> usize {
    fs::read_to_string(path)
        .map(|s| s.lines().filter(|l| !l.trim().is_empty()).count())
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// status
// ---------------------------------------------------------------------------

#[test]
fn status_on_fresh_ledger() {
    let dir = TempDir::new().unwrap();
    owl(&ledger_in(&dir))
        .arg("status")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Renown")
                .and(predicate::str::contains("Notoriety"))
                .and(predicate::str::contains("Heat: Low"))
                .and(predicate::str::contains("N0 Cold"))
                .and(predicate::str::contains("0 records")),
        );
}

#[test]
fn status_rejects_corrupt_ledger() {
    let dir = TempDir::new().unwrap();
    let ledger = ledger_in(&dir);
    fs::write(&ledger, "not json\n").unwrap();
    owl(&ledger)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 1"));
}

#[test]
fn status_survives_torn_final_line() {
    let dir = TempDir::new().unwrap();
    let ledger = ledger_in(&dir);
    owl(&ledger).args(["adjust", "charity"]).assert().success();
    let mut content = fs::read_to_string(&ledger).unwrap();
    content.push_str("{\"timestamp\":\"2024");
    fs::write(&ledger, content).unwrap();

    owl(&ledger)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("| 1 records"));
    owl(&ledger).args(["adjust", "lie-low"]).assert().success();
    assert_eq!(line_count(&ledger), 2);
    owl(&ledger)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("| 2 records"));
}

// ---------------------------------------------------------------------------
// mission
// ---------------------------------------------------------------------------

#[test]
fn mission_preview_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let ledger = ledger_in(&dir);
    owl(&ledger)
        .args(["mission", "sabotage", "--level", "3"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Preview: Sabotage Evil")
                .and(predicate::str::contains("Base Score 3"))
                .and(predicate::str::contains("Renown +4.5"))
                .and(predicate::str::contains("Not recorded")),
        );
    assert_eq!(line_count(&ledger), 0);
}

#[test]
fn mission_apply_records_and_totals() {
    let dir = TempDir::new().unwrap();
    let ledger = ledger_in(&dir);
    owl(&ledger)
        .args([
            "mission",
            "sabotage",
            "--level",
            "3",
            "--apply",
            "--notes",
            "burned the counting house",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Resolved: Sabotage Evil (Dock)")
                .and(predicate::str::contains("Totals: Renown 4.5 | Notoriety 2")),
        );
    assert_eq!(line_count(&ledger), 1);
    let content = fs::read_to_string(&ledger).unwrap();
    assert!(content.contains("burned the counting house"));
}

#[test]
fn mission_help_the_poor_from_flags() {
    let dir = TempDir::new().unwrap();
    owl(&ledger_in(&dir))
        .args([
            "mission",
            "help",
            "--gold",
            "120",
            "--households",
            "10",
            "--margin",
            "5",
            "--plan",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Base Impact 4")
                .and(predicate::str::contains("Effect Bucket 2"))
                .and(predicate::str::contains("Ops +1"))
                .and(predicate::str::contains("Base Score 7")),
        );
}

#[test]
fn mission_from_json_file() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("mission.json");
    fs::write(
        &inputs,
        r#"{"archetype": "ExposeCorruption", "magnitude": {"level": 2}, "ops": {"hard_proof": true}}"#,
    )
    .unwrap();
    owl(&ledger_in(&dir))
        .args(["mission", "--inputs", inputs.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Expose Corruption")
                .and(predicate::str::contains("Base Score 3"))
                .and(predicate::str::contains("Renown +6")),
        );
}

#[test]
fn mission_flags_out_of_range_are_clamped() {
    let dir = TempDir::new().unwrap();
    owl(&ledger_in(&dir))
        .args(["mission", "sabotage", "--level", "300", "--vis", "-1", "--noise", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Base Impact 5"));

    owl(&ledger_in(&dir))
        .args(["mission", "help", "--gold", "-5", "--households", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Base Impact 1"));
}

#[test]
fn mission_json_out_of_range_is_clamped() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("mission.json");
    fs::write(
        &inputs,
        r#"{"archetype": "SabotageEvil", "magnitude": {"level": 300}, "exposure": {"visibility": -1}}"#,
    )
    .unwrap();
    owl(&ledger_in(&dir))
        .args(["mission", "--inputs", inputs.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Base Impact 5"));
}

#[test]
fn mission_non_numeric_flag_fails() {
    let dir = TempDir::new().unwrap();
    owl(&ledger_in(&dir))
        .args(["mission", "sabotage", "--level", "high"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a whole number"));
}

#[test]
fn mission_unknown_archetype_fails() {
    let dir = TempDir::new().unwrap();
    owl(&ledger_in(&dir))
        .args(["mission", "heist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown archetype"));
}

// ---------------------------------------------------------------------------
// adjust
// ---------------------------------------------------------------------------

#[test]
fn custom_adjustment_needs_reason() {
    let dir = TempDir::new().unwrap();
    owl(&ledger_in(&dir))
        .args(["adjust", "custom", "--notoriety", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--reason"));
}

#[test]
fn heat_rises_and_lie_low_doubles() {
    let dir = TempDir::new().unwrap();
    let ledger = ledger_in(&dir);

    owl(&ledger)
        .args(["adjust", "custom", "--notoriety", "12", "--reason", "riot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Notoriety 12"));

    owl(&ledger)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Heat: High (x1.25)"));

    owl(&ledger)
        .args(["adjust", "lie-low"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lie Low: Renown +0, Notoriety -2"));
}

#[test]
fn notoriety_never_goes_negative() {
    let dir = TempDir::new().unwrap();
    let ledger = ledger_in(&dir);
    owl(&ledger).args(["adjust", "charity"]).assert().success();
    owl(&ledger)
        .args(["adjust", "lie-low"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Notoriety 0"));
}

#[test]
fn unknown_adjustment_fails() {
    let dir = TempDir::new().unwrap();
    owl(&ledger_in(&dir))
        .args(["adjust", "bribe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown adjustment"));
}

// ---------------------------------------------------------------------------
// spin
// ---------------------------------------------------------------------------

#[test]
fn spin_records_one_complication() {
    let dir = TempDir::new().unwrap();
    let ledger = ledger_in(&dir);
    owl(&ledger)
        .arg("spin")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Complication (Low heat")
                .and(predicate::str::contains("45.0 deg")),
        );
    assert_eq!(line_count(&ledger), 1);
}

#[test]
fn resent_spin_is_recorded_once() {
    let dir = TempDir::new().unwrap();
    let ledger = ledger_in(&dir);

    owl(&ledger)
        .args(["spin", "--index", "2", "--nonce", "abc-123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#3 of 8"));

    for _ in 0..3 {
        owl(&ledger)
            .args(["spin", "--index", "2", "--nonce", "abc-123"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("#3 of 8")
                    .and(predicate::str::contains("Already recorded")),
            );
    }
    assert_eq!(line_count(&ledger), 1);
}

#[test]
fn spin_out_of_range_fails() {
    let dir = TempDir::new().unwrap();
    let ledger = ledger_in(&dir);
    owl(&ledger)
        .args(["spin", "--index", "99", "--nonce", "late"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("try again"));
    assert_eq!(line_count(&ledger), 0);
}

#[test]
fn spin_index_requires_nonce() {
    let dir = TempDir::new().unwrap();
    owl(&ledger_in(&dir))
        .args(["spin", "--index", "1"])
        .assert()
        .failure();
}

#[test]
fn spin_uses_table_directory() {
    let dir = TempDir::new().unwrap();
    let tables = dir.path().join("tables");
    fs::create_dir(&tables).unwrap();
    fs::write(
        tables.join("complications_low.json"),
        r#"["Lanterns go out", "A dog barks"]"#,
    )
    .unwrap();

    owl(&ledger_in(&dir))
        .args(["spin", "--tables", tables.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("of 2)").and(predicate::str::contains("180.0 deg")));
}

// ---------------------------------------------------------------------------
// tiers
// ---------------------------------------------------------------------------

#[test]
fn tiers_lists_perks_and_responses() {
    let dir = TempDir::new().unwrap();
    owl(&ledger_in(&dir))
        .arg("tiers")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("R1 Street Signals")
                .and(predicate::str::contains("R6 Folk Halo"))
                .and(predicate::str::contains("N5 Inferno"))
                .and(predicate::str::contains("High at Notoriety 10")),
        );
}

#[test]
fn invalid_tier_ladder_fails() {
    let dir = TempDir::new().unwrap();
    owl(&ledger_in(&dir))
        .args(["tiers", "--renown-tiers", "five,ten"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid tier thresholds"));
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

#[test]
fn export_csv_has_classic_columns() {
    let dir = TempDir::new().unwrap();
    let ledger = ledger_in(&dir);
    owl(&ledger)
        .args(["--ward", "sea", "mission", "expose", "--level", "2", "--apply"])
        .assert()
        .success();

    owl(&ledger)
        .args(["export", "csv"])
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with(
                "timestamp,ward,archetype,BI,EB,OQM,renown_gain,notoriety_gain,EI_breakdown,notes,complication",
            )
            .and(predicate::str::contains("Sea"))
            .and(predicate::str::contains("Expose Corruption")),
        );
}

#[test]
fn export_json_is_valid() {
    let dir = TempDir::new().unwrap();
    let ledger = ledger_in(&dir);
    owl(&ledger).args(["adjust", "charity"]).assert().success();

    let output = owl(&ledger).args(["export", "json"]).output().unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(1));
    assert_eq!(parsed[0]["detail"]["kind"], "Adjustment");
}

#[test]
fn export_to_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("ledger.md");
    owl(&ledger_in(&dir))
        .args(["export", "markdown", "-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));
    assert!(fs::read_to_string(&out).unwrap().contains("# Night Owls Ledger"));
}

#[test]
fn export_unknown_format_fails() {
    let dir = TempDir::new().unwrap();
    owl(&ledger_in(&dir))
        .args(["export", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported format"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_session_resolves_queued_mission() {
    let dir = TempDir::new().unwrap();
    let ledger = ledger_in(&dir);
    owl(&ledger)
        .arg("play")
        .write_stdin("mission sabotage level=3\nqueue\nresolve quiet night\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Queued: Sabotage Evil")
                .and(predicate::str::contains("Resolved: Sabotage Evil in Dock"))
                .and(predicate::str::contains("Renown: 4.5"))
                .and(predicate::str::contains("Goodbye!")),
        );
    assert_eq!(line_count(&ledger), 1);
}

#[test]
fn play_reports_errors_and_continues() {
    let dir = TempDir::new().unwrap();
    owl(&ledger_in(&dir))
        .arg("play")
        .write_stdin("resolve\ndance\nhelp\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("no mission queued")
                .and(predicate::str::contains("unknown command: dance"))
                .and(predicate::str::contains("Night Owls Commands")),
        );
}
