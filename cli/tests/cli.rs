use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn roster_lists_builtins() {
    Command::cargo_bin("cli")
        .unwrap()
        .arg("roster")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Adventurer")
                .and(predicate::str::contains("Bandit"))
                .and(predicate::str::contains("Warlord")),
        );
}

#[test]
fn fight_help_command_then_quit() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["fight", "--delay-ms", "0", "--seed", "7"])
        .write_stdin("help\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("The battle is Adventurer against Bandit.")
                .and(predicate::str::contains("help -> Shows this menu")),
        );
}

#[test]
fn fight_lists_moves_with_labels() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["fight", "--delay-ms", "0", "--seed", "7"])
        .write_stdin("moves\nenemymoves\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Punch (2 damage)")
                .and(predicate::str::contains("Kick (4 damage)"))
                .and(predicate::str::contains("Knife Stab (4 damage)")),
        );
}

#[test]
fn fight_rejects_unknown_move() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["fight", "--delay-ms", "0", "--seed", "7"])
        .write_stdin("fireball\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Invalid move: Fireball. This attack is not in the move list.",
        ));
}

#[test]
fn fight_rejects_malformed_reward_flag() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["fight", "--delay-ms", "0", "--reward", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reward must be name:value"));
}

#[test]
fn end_of_input_quits_cleanly() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["campaign", "--delay-ms", "0", "--seed", "3"])
        .write_stdin("")
        .assert()
        .success();
}

#[test]
fn simulate_many_reports_stats() {
    Command::cargo_bin("simulate-many")
        .unwrap()
        .args(["--trials", "25", "--seed", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("trials=25").and(predicate::str::contains("avg rounds:")),
        );
}
