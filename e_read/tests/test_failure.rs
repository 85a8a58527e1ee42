use std::process::Output;


fn assert_usage_rejection(output: Output) {
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with("Usage: e-read")
            && stdout.contains("base address of destination array of words"),
        "stdout: {stdout}"
    );
}

#[test]
fn test_out_of_bounds_coordinates() {
    let dev = setup::device();
    dev.core_image(0, 0, 0, &[0x1234_5678]);

    for args in [["0", "4", "0"], ["4", "0", "0"], ["0", "-1", "0"]] {
        let output = dev.command().args(args).output().unwrap();
        assert_eq!(output.status.code(), Some(1), "args: {args:?}");
        assert_eq!(
            String::from_utf8_lossy(&output.stdout),
            "Core coordinates exceed platform boundaries!\n",
            "args: {args:?}"
        );
    }
}

#[test]
fn test_no_arguments() {
    let dev = setup::device();
    assert_usage_rejection(dev.command().output().unwrap());
}

#[test]
fn test_missing_address() {
    let dev = setup::device();
    assert_usage_rejection(dev.command().args(["0", "0"]).output().unwrap());
    assert_usage_rejection(dev.command().args(["-1"]).output().unwrap());
}

#[test]
fn test_conflicting_flags() {
    let dev = setup::device();
    assert_usage_rejection(
        dev.command()
            .args(["-v", "-r", "0", "0", "0x0"])
            .output()
            .unwrap(),
    );
}

#[test]
fn test_malformed_tokens() {
    let dev = setup::device();
    for args in [
        ["zero", "0", "0x0", "1"],
        ["0", "zero", "0x0", "1"],
        ["0", "0", "0xzz", "1"],
        ["0", "0", "0x0", "two"],
    ] {
        assert_usage_rejection(dev.command().args(args).output().unwrap());
    }
}

#[test]
fn test_unconfigured_device() {
    let dev = setup::device();
    let output = dev
        .command()
        .env_remove("EHAL_DEVICE")
        .args(["0", "0", "0x0"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("platform initialization failed") && stderr.contains("EHAL_DEVICE"),
        "stderr: {stderr}"
    );
}

#[test]
fn test_missing_device_directory() {
    let dev = setup::device();
    let gone = dev.dir.path().join("no-such-device");
    let output = dev
        .command()
        .env("EHAL_DEVICE", &gone)
        .args(["0", "0", "0x0"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
}

#[test]
fn test_read_past_core_memory() {
    let dev = setup::device();
    let output = dev
        .command()
        .args(["0", "0", "0x7ffc", "2"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("read transaction"), "stderr: {stderr}");
    // the first word is still printed before the failing read
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "[0x00007ffc] = 0x00000000\n"
    );
}
