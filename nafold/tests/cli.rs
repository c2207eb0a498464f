use assert_cmd::Command;

fn nafold() -> Command {
    Command::cargo_bin("nafold").expect("nafold binary")
}

fn stdout_lines(args: &[&str]) -> Vec<String> {
    let output = nafold().args(args).output().expect("run nafold");
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn folds_a_hairpin() {
    let lines = stdout_lines(&["GGGGAAAACCCC"]);
    assert_eq!(lines, ["GGGGAAAACCCC", "((((....))))", "-3.50"]);
}

#[test]
fn lists_structures() {
    let lines = stdout_lines(&["-s", "GGGGAAAACCCC"]);
    assert_eq!(lines.len(), 3 + 4 + 1);
    assert!(lines[2].ends_with("description"));
    assert!(lines[6].ends_with("HAIRPIN:GA/CA"));
}

#[test]
fn folds_each_sequence_in_order() {
    let lines = stdout_lines(&["--temp", "37", "GGGGAAAACCCC", "AAAA"]);
    assert_eq!(lines[..3], ["GGGGAAAACCCC", "((((....))))", "-3.50"]);
    assert_eq!(lines[3..], ["AAAA", "", "inf"]);
}

#[test]
fn rejects_bad_sequences() {
    nafold().arg("ACGTU").assert().failure();
    nafold().arg("HELLO").assert().failure();
    nafold().args(["--scale", "0", "ACGT"]).assert().failure();
}

#[test]
fn requires_a_sequence() {
    nafold().assert().failure();
}

#[test]
fn rejects_oversized_scale() {
    nafold()
        .args(["--scale", "10000000000000000", "GGGGAAAACCCC"])
        .assert()
        .failure();
}
