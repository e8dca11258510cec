mod helpers;

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};

use helpers::csv_file;

fn big_body(every: usize) -> String {
    let mut body = String::from("t,v\r\n");
    for i in 0..200_000 {
        let v = if i % every == 0 { i.to_string() } else { String::new() };
        body.push_str(&format!("{i:08},{v}\r\n"));
    }
    body
}

// Like `tool ... | head -c 64`: the reader goes away early.
fn assert_quiet_on_closed_pipe(tool: &str, args: &[&str], inputs: &[&Path]) {
    let mut child = Command::new(assert_cmd::cargo::cargo_bin(tool))
        .env_remove("RUST_LOG")
        .args(args)
        .args(inputs)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let mut stdout = child.stdout.take().unwrap();
    let mut head = [0u8; 64];
    stdout.read_exact(&mut head).unwrap();
    assert!(head.starts_with(b"t,v\r\n"), "{tool}: {:?}", String::from_utf8_lossy(&head));
    drop(stdout);

    let out = child.wait_with_output().unwrap();
    assert!(out.status.success(), "{tool} status: {:?}", out.status);
    assert!(
        out.stderr.is_empty(),
        "{tool} stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}

#[test]
fn csvfill_exits_cleanly_on_closed_pipe() {
    let input = csv_file(&big_body(3));
    assert_quiet_on_closed_pipe("csvfill", &["-k", "v"], &[input.path()]);
}

#[test]
fn csvmerge_exits_cleanly_on_closed_pipe() {
    let a = csv_file(&big_body(2));
    let b = csv_file(&big_body(5));
    assert_quiet_on_closed_pipe("csvmerge", &["-k", "t"], &[a.path(), b.path()]);
}

#[test]
fn csvcollapse_exits_cleanly_on_closed_pipe() {
    let input = csv_file(&big_body(1));
    assert_quiet_on_closed_pipe("csvcollapse", &["-k", "t"], &[input.path()]);
}
