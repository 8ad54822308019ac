use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

fn project() -> Result<CliTest> {
    let test = CliTest::with_file(
        "messages/en.json",
        r#"{ "order_status": { "pending": "Pending", "shipped": "Shipped" } }"#,
    )?;
    test.write_file("messages/zh/order_status.json", r#"{ "pending": "待处理" }"#)?;
    test.write_file("messages/default.json", r#"{ "gender": { "f": "F" } }"#)?;
    Ok(test)
}

#[test]
fn test_resolve_exact_language() -> Result<()> {
    let test = project()?;

    let mut cmd = test.resolve_command("order_status", "pending");
    cmd.args(["--lang", "en"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Pending

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_resolve_base_language() -> Result<()> {
    let test = project()?;

    let mut cmd = test.resolve_command("order_status", "pending");
    cmd.args(["--lang", "zh_CN"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    待处理

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_resolve_default_language_and_catch_all() -> Result<()> {
    let test = project()?;

    let output = test
        .resolve_command("order_status", "shipped")
        .args(["--lang", "zh-CN", "--default-language", "en"])
        .output()?;
    assert_eq!(stdout(&output), "Shipped\n");

    let output = test
        .resolve_command("gender", "f")
        .args(["--lang", "ja"])
        .output()?;
    assert_eq!(stdout(&output), "F\n");

    Ok(())
}

#[test]
fn test_resolve_miss() -> Result<()> {
    let test = project()?;

    let mut cmd = test.resolve_command("order_status", "lost");
    cmd.args(["--lang", "en"]);
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    ✘ No description for order_status.lost (language en)
    ");

    Ok(())
}

#[test]
fn test_resolve_uses_config_file() -> Result<()> {
    let test = CliTest::with_file(
        ".dictdescrc.json",
        r#"{
            "defaultLanguage": "de",
            "sourceOrder": ["custom"],
            "sources": [
                { "name": "base", "path": "i18n/base" },
                { "name": "custom", "path": "i18n/custom" }
            ]
        }"#,
    )?;
    test.write_file("i18n/base/de.json", r#"{ "ns": { "a": "Basis" } }"#)?;
    test.write_file("i18n/custom/de.json", r#"{ "ns": { "a": "Angepasst" } }"#)?;

    let mut cmd = test.resolve_command("ns", "a");
    cmd.args(["--lang", "fr"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Angepasst

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_resolve_messages_root_override() -> Result<()> {
    let test = CliTest::with_file("locales/en.json", r#"{ "ns": { "a": "A" } }"#)?;

    let mut cmd = test.resolve_command("ns", "a");
    cmd.args(["--lang", "en", "--messages-root", "locales"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    A

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_resolve_missing_messages_directory() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.resolve_command("ns", "a").output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = stderr(&output);
    assert!(stderr.contains("Failed to load source 'messages'"), "{}", stderr);
    assert!(stderr.contains("does not exist"), "{}", stderr);

    Ok(())
}

#[test]
fn test_resolve_invalid_config() -> Result<()> {
    let test = CliTest::with_file(".dictdescrc.json", r#"{ "descriptionSuffix": "" }"#)?;
    test.write_file("messages/en.json", "{}")?;

    let output = test.resolve_command("ns", "a").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("descriptionSuffix"));

    Ok(())
}

#[test]
fn test_broken_message_file_is_skipped() -> Result<()> {
    let test = project()?;
    test.write_file("messages/fr.json", "{ broken")?;

    let output = test
        .resolve_command("order_status", "pending")
        .args(["--lang", "fr", "--default-language", "en"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Pending\n");
    assert!(stderr(&output).contains("skipping unreadable message file"));

    Ok(())
}
