// ABOUTME: Runs cached sqldef binaries against a database
// ABOUTME: Handles schema export, dry-run, and apply

pub mod apply;
pub mod args;
pub mod export;

pub use apply::{apply, dry_run};
pub use args::{ConnectionParams, Mode};
pub use export::export;

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::cache::BinaryCache;
    use crate::error::{Result, SqldefError};
    use crate::release::{HttpClient, HttpResponse, ReleaseFetcher};
    use crate::tool::Tool;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    struct NoNetwork;

    impl HttpClient for NoNetwork {
        async fn get(&self, url: &str) -> Result<HttpResponse> {
            panic!("network access not expected: {}", url)
        }
    }

    /// Install a shell script as `tool` in a fresh cache directory
    fn fake_tool(tool: Tool, script: &str) -> (TempDir, BinaryCache<NoNetwork>) {
        let dir = tempdir().unwrap();
        let path = dir.path().join(tool.as_str());
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        let cache = BinaryCache::new(dir.path(), ReleaseFetcher::new(NoNetwork));
        (dir, cache)
    }

    /// Script that records its arguments and stdin next to itself
    const RECORDER: &str = "#!/bin/sh\n\
        dir=$(dirname \"$0\")\n\
        echo \"$@\" > \"$dir/args.txt\"\n\
        cat > \"$dir/stdin.txt\"\n";

    fn read(dir: &Path, name: &str) -> String {
        std::fs::read_to_string(dir.join(name)).unwrap()
    }

    #[tokio::test]
    async fn test_export_writes_stdout_verbatim() {
        let (dir, cache) = fake_tool(Tool::Psqldef, "#!/bin/sh\necho \"$@\"\n");
        let output = dir.path().join("schema.sql");
        let params = ConnectionParams::new("localhost", "root", "app");

        export(&cache, Tool::Psqldef, &params, &output).await.unwrap();

        assert_eq!(read(dir.path(), "schema.sql"), "--user=root --host=localhost --export app\n");
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_export_shares_our_stdin() {
        let ours = match std::fs::read_link("/proc/self/fd/0") {
            Ok(target) => target,
            Err(_) => return,
        };
        let (dir, cache) = fake_tool(Tool::Psqldef, "#!/bin/sh\nreadlink /proc/self/fd/0\n");
        let output = dir.path().join("stdin.txt");
        let params = ConnectionParams::new("localhost", "root", "app");

        export(&cache, Tool::Psqldef, &params, &output).await.unwrap();

        assert_eq!(
            read(dir.path(), "stdin.txt").trim_end(),
            ours.to_string_lossy()
        );
    }

    #[tokio::test]
    async fn test_export_failure_writes_nothing() {
        let (dir, cache) = fake_tool(Tool::Psqldef, "#!/bin/sh\necho partial\nexit 3\n");
        let output = dir.path().join("schema.sql");
        let params = ConnectionParams::new("localhost", "root", "app");

        let err = export(&cache, Tool::Psqldef, &params, &output)
            .await
            .unwrap_err();

        match err {
            SqldefError::ExecutionFailed { command, .. } => assert!(command.ends_with("psqldef")),
            other => panic!("expected ExecutionFailed, got {:?}", other),
        }
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_dry_run_feeds_schema_on_stdin() {
        let (dir, cache) = fake_tool(Tool::Mysqldef, RECORDER);
        let schema = dir.path().join("schema.sql");
        std::fs::write(&schema, "CREATE TABLE users (id BIGINT);\n").unwrap();
        let params = ConnectionParams::new("127.0.0.1", "root", "app")
            .with_password("pw")
            .with_port("3306");

        dry_run(&cache, Tool::Mysqldef, &params, &schema).await.unwrap();

        assert_eq!(
            read(dir.path(), "args.txt"),
            "--user=root --password=pw --host=127.0.0.1 --port=3306 --dry-run app\n"
        );
        assert_eq!(read(dir.path(), "stdin.txt"), "CREATE TABLE users (id BIGINT);\n");
    }

    #[tokio::test]
    async fn test_apply_omits_dry_run_flag() {
        let (dir, cache) = fake_tool(Tool::Mysqldef, RECORDER);
        let schema = dir.path().join("schema.sql");
        std::fs::write(&schema, "CREATE TABLE t (id INT);\n").unwrap();
        let params = ConnectionParams::new("127.0.0.1", "root", "app");

        apply(&cache, Tool::Mysqldef, &params, &schema).await.unwrap();

        assert_eq!(read(dir.path(), "args.txt"), "--user=root --host=127.0.0.1 app\n");
        assert_eq!(read(dir.path(), "stdin.txt"), "CREATE TABLE t (id INT);\n");
    }

    #[tokio::test]
    async fn test_apply_non_zero_exit_fails() {
        let (dir, cache) = fake_tool(Tool::Sqlite3def, "#!/bin/sh\ncat >/dev/null\nexit 1\n");
        let schema = dir.path().join("schema.sql");
        std::fs::write(&schema, "").unwrap();
        let params = ConnectionParams::new("localhost", "root", "app");

        let err = apply(&cache, Tool::Sqlite3def, &params, &schema)
            .await
            .unwrap_err();

        assert!(matches!(err, SqldefError::ExecutionFailed { .. }));
        assert!(err.to_string().contains("sqlite3def"));
    }

    #[tokio::test]
    async fn test_missing_schema_file_fails_before_running() {
        let (dir, cache) = fake_tool(Tool::Psqldef, RECORDER);
        let params = ConnectionParams::new("localhost", "root", "app");

        let err = dry_run(&cache, Tool::Psqldef, &params, &dir.path().join("nope.sql"))
            .await
            .unwrap_err();

        assert!(matches!(err, SqldefError::ExecutionFailed { .. }));
        assert!(!dir.path().join("args.txt").exists());
    }
}
