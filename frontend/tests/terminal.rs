use assert_cmd::Command;

fn terminal(args: &[&str], input: &str) -> (bool, String) {
    let output = Command::cargo_bin("terminal")
        .unwrap()
        .args(["--ascii", "--plain"])
        .args(args)
        .write_stdin(input)
        .output()
        .unwrap();
    (output.status.success(), String::from_utf8(output.stdout).unwrap())
}

#[test]
fn plays_a_move_and_quits() {
    let (success, stdout) = terminal(&[], "play e7 e6\nstate\nquit\n");
    assert!(success);
    assert!(stdout.contains("UNFINISHED red"));
    assert!(stdout.contains("(1) e7e6"));
}

#[test]
fn end_of_input_ends_the_session() {
    let (success, stdout) = terminal(&[], "p e5 e6\n");
    assert!(success);
    assert!(stdout.contains("illegal move"));
}

#[test]
fn starts_from_a_given_position() {
    let (success, stdout) = terminal(
        &["--fen", "4K4/9/9/9/9/4R4/9/9/R8/3k5", "--red-first", "--stalemate", "draw"],
        "state\n",
    );
    assert!(success);
    assert!(stdout.contains("DRAWN red"));
}

#[test]
fn broken_position_fails_to_start() {
    let (success, _) = terminal(&["--fen", "9/9"], "");
    assert!(!success);
}
