use std::{
    io::Write as _,
    process::{Command, Stdio},
};

fn run_stridetris(args: &[&str], input: &str) -> (bool, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_stridetris"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    (
        output.status.success(),
        String::from_utf8(output.stdout).unwrap(),
    )
}

#[test]
fn test_clears_filled_bottom_rows() {
    let input = "\
10 6
piece
O
left
left
left
left
down
piece
O
left
left
down
down
down
piece
O
down
down
down
down
down
piece
O
right
right
down
down
down
piece
O
right
right
right
right
down
break
exit
";
    let (success, stdout) = run_stridetris(&[], input);
    assert!(success);

    let grids: Vec<_> = stdout.split("\n\n").filter(|g| !g.is_empty()).collect();
    let empty = "- - - - - - - - - -\n".repeat(6);
    assert_eq!(grids[0], empty.trim_end());
    // Both bottom rows were cleared by the fifth piece.
    assert_eq!(grids.last().copied(), Some(empty.trim_end()));
    assert!(!stdout.contains("Game Over!"));
}

#[test]
fn test_game_over_ends_output() {
    let (success, stdout) = run_stridetris(&[], "6 4\npiece\nI\ndown\nright\n");
    assert!(success);
    assert!(stdout.ends_with(
        "- - - - 0 -\n\
         - - - - 0 -\n\
         - - - - 0 -\n\
         - - - - 0 -\n\
         \n\
         Game Over!\n"
    ));
}

#[test]
fn test_size_from_arguments() {
    let (success, stdout) = run_stridetris(&["--width", "2", "--height", "2"], "exit\n");
    assert!(success);
    assert_eq!(stdout, "- -\n- -\n\n");
}

#[test]
fn test_invalid_size_fails() {
    let (success, stdout) = run_stridetris(&[], "12 4\n");
    assert!(!success);
    assert!(stdout.is_empty());
}
