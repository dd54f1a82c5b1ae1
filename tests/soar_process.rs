#![cfg(unix)]

use digest_advisor::{DigestError, RewriteConfig, SoarAdvisor, rewrite_report_to_string};
use std::fs;
use tempfile::TempDir;

/// 写一个模拟 soar 的脚本，通过 `sh <script> [args...]` 调用
fn fake_soar(dir: &TempDir, body: &str) -> String {
    let path = dir.path().join("soar.sh");
    fs::write(&path, format!("{body}\n")).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn passes_args_and_sql_to_process() {
    let dir = tempfile::tempdir().unwrap();
    let program = fake_soar(
        &dir,
        r##"echo "# Query: 0xABC"
echo "args: $*"
cat"##,
    );
    let config = RewriteConfig::builtin()
        .with_advisor_program("sh")
        .with_advisor_args([program.as_str(), "-ignore-rules=OK", "-report-type=markdown"]);
    let advisor = SoarAdvisor::from_config(&config);

    let input = "# Query 1: 0.01 QPS\n# Databases    sakila\nSELECT 1\\G\n";
    let output = rewrite_report_to_string(input, advisor).unwrap();

    assert!(output.ends_with(
        "```\nargs: -ignore-rules=OK -report-type=markdown\nUSE sakila;SELECT 1\\G\n\n"
    ));
    assert!(!output.contains("0xABC"));
}

#[test]
fn each_sql_gets_its_own_process() {
    let dir = tempfile::tempdir().unwrap();
    let counter = dir.path().join("count");
    let program = fake_soar(
        &dir,
        &format!(
            r##"cat >/dev/null
echo x >> "{}"
echo "# Query"
printf 'call'"##,
            counter.display()
        ),
    );
    let advisor = SoarAdvisor::new("sh", [program]);

    let input = "SELECT 1\\G\nSELECT 2\\G\nSELECT 3\\G\n";
    let output = rewrite_report_to_string(input, advisor).unwrap();

    assert_eq!(output, "call\ncall\ncall\n");
    assert_eq!(fs::read_to_string(&counter).unwrap().lines().count(), 3);
}

#[test]
fn abnormal_exit_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let program = fake_soar(&dir, "cat >/dev/null\necho '# Query'\nexit 2");
    let advisor = SoarAdvisor::new("sh", [program]);

    let err = rewrite_report_to_string("SELECT 1\\G\n", advisor).unwrap_err();
    assert!(matches!(err, DigestError::AdvisorFailed { .. }));
}

#[test]
fn missing_program_aborts_run() {
    let advisor = SoarAdvisor::new("/nonexistent/soar", Vec::<String>::new());
    let err = rewrite_report_to_string("SELECT 1\\G\n", advisor).unwrap_err();
    assert!(matches!(err, DigestError::AdvisorSpawn { .. }));
}

#[test]
fn large_output_does_not_block() {
    let dir = tempfile::tempdir().unwrap();
    // 在读入 SQL 之前先输出大量内容
    let program = fake_soar(
        &dir,
        r#"echo '# Query'
i=0
while [ $i -lt 20000 ]; do echo 'padding line for pipe buffer'; i=$((i+1)); done
cat >/dev/null"#,
    );
    let advisor = SoarAdvisor::new("sh", [program]);

    let sql = format!("SELECT '{}'\\G\n", "x".repeat(200_000));
    let output = rewrite_report_to_string(&sql, advisor).unwrap();
    assert_eq!(output.matches("padding line for pipe buffer\n").count(), 20000);
}
