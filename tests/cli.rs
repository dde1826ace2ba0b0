use std::error::Error;
use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;

fn saltbox_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_saltbox"))
}

fn run(args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(saltbox_command().args(args).output()?)
}

#[test]
fn cli_end_to_end_flow() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("secret.txt");
    let sealed = dir.path().join("secret.txt.sc");
    let recovered = dir.path().join("recovered.txt");

    fs::write(&input, b"Super secret payload for saltbox!")?;

    // Encrypt
    let encrypt = run(&[
        "encrypt",
        "--password",
        "passphrase",
        input.to_str().unwrap(),
        sealed.to_str().unwrap(),
    ])?;
    assert!(
        encrypt.status.success(),
        "encrypt command failed: {}",
        String::from_utf8_lossy(&encrypt.stderr)
    );
    assert!(
        String::from_utf8(encrypt.stdout.clone())?.contains("Encrypted"),
        "encrypt output missing confirmation"
    );

    assert!(sealed.exists(), "sealed file should exist after encrypt");

    // Info should report the latest format version
    let info = run(&["info", sealed.to_str().unwrap()])?;
    let info_stdout = String::from_utf8(info.stdout)?;
    assert!(info_stdout.contains("Version: 2"));
    assert!(info_stdout.contains("Work factor: 100000"));

    // Decrypt
    let decrypt = run(&[
        "decrypt",
        "--password",
        "passphrase",
        sealed.to_str().unwrap(),
        recovered.to_str().unwrap(),
    ])?;
    assert!(
        decrypt.status.success(),
        "decrypt command failed: {}",
        String::from_utf8_lossy(&decrypt.stderr)
    );

    assert_eq!(fs::read(&recovered)?, fs::read(&input)?);
    Ok(())
}

#[test]
fn cli_default_output_path() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("notes.txt");
    fs::write(&input, b"some notes")?;

    let encrypt = run(&["encrypt", "--password", "pw", input.to_str().unwrap()])?;
    assert!(
        encrypt.status.success(),
        "encrypt without output failed: {}",
        String::from_utf8_lossy(&encrypt.stderr)
    );

    assert!(
        dir.path().join("notes.txt.sc").exists(),
        "default output should be <INPUT>.sc"
    );
    Ok(())
}

#[test]
fn cli_wrong_password_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("secret.txt");
    let sealed = dir.path().join("secret.txt.sc");
    let recovered = dir.path().join("recovered.txt");

    fs::write(&input, b"guarded payload")?;

    let encrypt = run(&[
        "encrypt",
        "--password",
        "correct",
        input.to_str().unwrap(),
        sealed.to_str().unwrap(),
    ])?;
    assert!(encrypt.status.success());

    let decrypt = run(&[
        "decrypt",
        "--password",
        "wrong",
        sealed.to_str().unwrap(),
        recovered.to_str().unwrap(),
    ])?;
    assert!(
        !decrypt.status.success(),
        "decrypt with the wrong password must fail"
    );
    assert!(
        String::from_utf8_lossy(&decrypt.stderr).contains("Bad password"),
        "stderr should carry the undifferentiated auth failure message"
    );
    Ok(())
}

#[test]
fn cli_info_rejects_foreign_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let foreign = dir.path().join("foreign.bin");
    fs::write(&foreign, b"PNG....definitely not a record")?;

    let info = run(&["info", foreign.to_str().unwrap()])?;
    assert!(!info.status.success(), "info on a foreign file must fail");
    assert!(String::from_utf8_lossy(&info.stderr).contains("bad header"));
    Ok(())
}

#[test]
fn version_flag_prints_build_information() -> Result<(), Box<dyn Error>> {
    let output = run(&["--version"])?;
    assert!(
        output.status.success(),
        "version command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with("saltbox "),
        "unexpected version line: {}",
        stdout
    );
    assert!(
        stdout.contains("build"),
        "version output should include build value: {}",
        stdout
    );
    Ok(())
}

#[test]
fn running_without_subcommand_displays_help() -> Result<(), Box<dyn Error>> {
    let output = saltbox_command().output()?;
    assert!(
        output.status.success(),
        "help output failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Usage: saltbox"),
        "help output missing usage: {}",
        stdout
    );
    assert!(
        stdout.contains("Commands:"),
        "help output missing command list: {}",
        stdout
    );
    Ok(())
}
