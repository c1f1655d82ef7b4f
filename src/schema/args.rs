// ABOUTME: Connection parameters and the sqldef argument vector built from them
// ABOUTME: Flag order is fixed: user, password, host, port, mode, database

/// What the sqldef invocation should do with the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print the current schema to stdout
    Export,
    /// Print the DDL that would be applied, without running it
    DryRun,
    Apply,
}

impl Mode {
    fn flag(&self) -> Option<&'static str> {
        match self {
            Mode::Export => Some("--export"),
            Mode::DryRun => Some("--dry-run"),
            Mode::Apply => None,
        }
    }
}

/// Database connection details, passed through to sqldef verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: Option<String>,
    pub user: String,
    pub password: Option<String>,
    pub database: String,
}

impl ConnectionParams {
    /// Parameters with no port and no password
    ///
    /// # Examples
    ///
    /// ```
    /// # use sqldef_runner::{ConnectionParams, Mode};
    /// let params = ConnectionParams::new("localhost", "root", "app");
    /// assert_eq!(
    ///     params.to_args(Mode::Export),
    ///     vec!["--user=root", "--host=localhost", "--export", "app"]
    /// );
    /// ```
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            database: database.into(),
            ..Default::default()
        }
    }

    /// Pass `--port`; sqldef's default port is used otherwise
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// Pass `--password`; an empty password is treated as absent
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Argument vector for a sqldef invocation in `mode`
    ///
    /// Order is fixed: `--user`, `--password` (only when non-empty), `--host`,
    /// `--port` (only when set), the mode flag, then the database name.
    pub fn to_args(&self, mode: Mode) -> Vec<String> {
        let mut args = vec![format!("--user={}", self.user)];

        if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
            args.push(format!("--password={}", password));
        }

        args.push(format!("--host={}", self.host));

        if let Some(port) = &self.port {
            args.push(format!("--port={}", port));
        }

        if let Some(flag) = mode.flag() {
            args.push(flag.to_string());
        }

        args.push(self.database.clone());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_export_args() {
        let params = ConnectionParams::new("localhost", "root", "app");
        assert_eq!(
            params.to_args(Mode::Export),
            vec!["--user=root", "--host=localhost", "--export", "app"]
        );
    }

    #[test]
    fn test_full_args_keep_fixed_order() {
        let params = ConnectionParams::new("db.internal", "admin", "shop")
            .with_password("s3cret")
            .with_port("5433");

        assert_eq!(
            params.to_args(Mode::DryRun),
            vec![
                "--user=admin",
                "--password=s3cret",
                "--host=db.internal",
                "--port=5433",
                "--dry-run",
                "shop",
            ]
        );
    }

    #[test]
    fn test_empty_password_is_omitted() {
        let params = ConnectionParams::new("localhost", "root", "app").with_password("");
        assert!(!params
            .to_args(Mode::Apply)
            .iter()
            .any(|arg| arg.starts_with("--password")));
    }

    #[test]
    fn test_dry_run_and_apply_differ_only_by_flag() {
        let params = ConnectionParams::new("localhost", "root", "app").with_port("3306");

        let mut dry_run = params.to_args(Mode::DryRun);
        let apply = params.to_args(Mode::Apply);

        dry_run.retain(|arg| arg != "--dry-run");
        assert_eq!(dry_run, apply);
        assert_eq!(apply.last().map(String::as_str), Some("app"));
    }
}
