use std::process::{Command, Output};

fn demo() -> Command {
    Command::new(env!("CARGO_BIN_EXE_input-parser-demo"))
}

fn run(args: &[&str]) -> Output {
    demo()
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run input-parser-demo")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn help_works() {
    for flag in ["-h", "--help"] {
        let out = run(&[flag]);
        assert!(
            out.status.success(),
            "{flag} failed:\nstatus: {}\nstderr:\n{}",
            out.status,
            stderr(&out),
        );
        let text = stdout(&out);
        assert!(
            text.starts_with("Usage: ")
                && text.contains("<-n value>")
                && text.contains("[-p value]"),
            "unexpected help output:\n{text}"
        );
        assert!(text.contains("-n, --name -> Who to greet."), "{text}");
    }
}

#[test]
fn help_wins_over_missing_required_option() {
    // `--name` is required but help must still be shown.
    let out = run(&["--verbose", "--help"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert!(stdout(&out).starts_with("Usage: "));
}

#[test]
fn parses_all_option_kinds() {
    let out = run(&[
        "--name", "alice", "-C", "--port", "9000", "-t", "a", "b", "-w", "0.5", "2",
    ]);
    assert!(
        out.status.success(),
        "status: {}\nstderr:\n{}",
        out.status,
        stderr(&out),
    );
    let text = stdout(&out);
    assert!(text.contains("Hello, alice!\n"), "{text}");
    assert!(text.contains("port: 9000\n"), "{text}");
    assert!(text.contains("tags: a b\n"), "{text}");
    assert!(text.contains("weights: 0.5 2\n"), "{text}");
}

#[test]
fn defaults_fill_optional_options() {
    let out = run(&["-n", "bob", "--color", "--verbose"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("port: 8080\n"), "{text}");
    assert!(text.contains("weights: 1\n"), "{text}");
    assert!(text.contains("-C (bool): false\n"), "{text}");
    assert!(text.contains("-p (int): 8080\n"), "{text}");
}

#[test]
fn missing_required_option_fails() {
    let out = run(&[]);
    assert!(!out.status.success());
    let text = stderr(&out);
    assert!(text.contains("error: Missing option -n"), "{text}");
    assert!(text.contains("Usage: "), "{text}");
}

#[test]
fn invalid_token_fails() {
    let out = run(&["-n", "alice", "stray"]);
    assert!(!out.status.success());
    assert!(
        stderr(&out).contains("error: Invalid arguments provided!"),
        "{}",
        stderr(&out)
    );
}

#[cfg(unix)]
#[test]
fn non_utf8_argument_fails() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let out = demo()
        .arg("-n")
        .arg(OsStr::from_bytes(b"al\xffce"))
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run input-parser-demo");
    assert!(!out.status.success());
    assert!(stdout(&out).is_empty(), "{}", stdout(&out));
    assert!(stderr(&out).contains("is not valid UTF-8"), "{}", stderr(&out));
}

#[test]
fn missing_argument_fails() {
    let out = run(&["--name"]);
    assert!(!out.status.success());
    assert!(
        stderr(&out).contains("After the --name option should be an extra argument!"),
        "{}",
        stderr(&out)
    );

    let out = run(&["-n", "alice", "-t"]);
    assert!(!out.status.success());
    assert!(
        stderr(&out).contains("After the -t option should be at least an extra argument!"),
        "{}",
        stderr(&out)
    );
}

#[test]
fn constraint_violations_fail() {
    let out = run(&["-n", "alice", "-p", "0"]);
    assert!(!out.status.success());
    assert!(
        stderr(&out).contains("The port must be between 1 and 65535"),
        "{}",
        stderr(&out)
    );

    let out = run(&["-n", " "]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("The name cannot be empty"), "{}", stderr(&out));

    let out = run(&["-n", "alice", "-p", "eighty"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("Invalid value for -p"), "{}", stderr(&out));
}

#[test]
fn describe_prints_registry_as_json() {
    let out = run(&["-n", "alice", "--describe"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    let json: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("describe output is not JSON");
    let options = json.as_array().expect("expected a JSON array");
    assert_eq!(options.len(), 8);
    assert_eq!(options[0]["names"], serde_json::json!(["-h", "--help"]));
    let port = options
        .iter()
        .find(|o| o["names"][0] == "-p")
        .expect("port option missing");
    assert_eq!(port["kind"], "single");
    assert_eq!(port["value-kind"], "int");
    assert_eq!(port["default-value"], "8080");
    assert_eq!(port["required"], false);
}
