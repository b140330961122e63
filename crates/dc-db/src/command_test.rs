#![cfg(unix)]

use super::*;

/// `sh -c <script> <database>`: the database lands in `$0`.
fn shell(script: &str, database: &str) -> CommandClient {
    CommandClient::new("sh", database).with_args(vec!["-c".to_string(), script.to_string()])
}

#[tokio::test]
async fn test_query_captures_stdout() {
    let client = shell("cat", "testdb");
    let output = client.query("select 1;\nselect 2;\n").await.unwrap();
    assert_eq!(output, "select 1;\nselect 2;\n");
}

#[tokio::test]
async fn test_database_is_last_argument() {
    let client = shell("printf '%s' \"$0\"", "inventory");
    assert_eq!(client.query("").await.unwrap(), "inventory");
}

#[tokio::test]
async fn test_execute_success() {
    let client = shell("cat > /dev/null", "testdb");
    client.execute("create table t (id int);").await.unwrap();
}

#[tokio::test]
async fn test_non_zero_exit_is_execution_failure() {
    let client = shell("cat > /dev/null; echo 'ERROR 1064: syntax' >&2; exit 3", "testdb");
    let err = client.execute("selec 1;").await.unwrap_err();
    match &err {
        DbError::ExecutionFailed { status, stderr, .. } => {
            assert_eq!(status, "status 3");
            assert!(stderr.contains("ERROR 1064"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("[D002]"));
    assert!(err.stderr().contains("syntax"));
}

#[tokio::test]
async fn test_client_that_ignores_stdin() {
    let client = shell("exit 0", "testdb");
    let big = "x".repeat(1 << 20);
    client.execute(&big).await.unwrap();
}

#[tokio::test]
async fn test_large_output_does_not_deadlock() {
    let client = shell("cat", "testdb");
    let big = "select 1;\n".repeat(100_000);
    let output = client.query(&big).await.unwrap();
    assert_eq!(output.len(), big.len());
}

#[tokio::test]
async fn test_missing_executable() {
    let client = CommandClient::new("definitely-not-a-real-sql-client", "db");
    let err = client.execute("select 1;").await.unwrap_err();
    assert!(matches!(err, DbError::SpawnFailed { .. }));
}

#[tokio::test]
async fn test_credential_is_scoped_to_child() {
    let client = shell("printf '%s' \"$DC_TEST_SECRET\"", "testdb").with_credential(Some(
        Credential {
            name: "DC_TEST_SECRET".to_string(),
            value: "hunter2".to_string(),
        },
    ));
    assert_eq!(client.query("").await.unwrap(), "hunter2");
    assert!(std::env::var("DC_TEST_SECRET").is_err());
}

#[test]
fn test_describe() {
    let client = CommandClient::new("mysql", "app").with_args(vec!["-h".into(), "db".into()]);
    assert_eq!(client.describe(), "mysql -h db app");
}
