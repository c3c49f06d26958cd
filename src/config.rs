//! Configuration and CLI argument parsing for the linux-remote binary

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::credential::Password;
use crate::error::{Error, Result};
use crate::server::Server;
use crate::user::User;

/// linux-remote CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "linux-remote")]
#[command(version)]
#[command(about = "Run a shell command on a remote Linux host over SSH")]
pub struct Args {
    /// Remote host to connect to
    #[arg(long, env = "LINUX_REMOTE_HOST")]
    pub host: String,

    /// SSH port
    #[arg(long, default_value = "22", env = "LINUX_REMOTE_PORT")]
    pub port: u16,

    /// Remote username
    #[arg(long, env = "LINUX_REMOTE_USER")]
    pub user: String,

    /// Password (alternative to key; tried after the key when both are given)
    #[arg(long, env = "LINUX_REMOTE_PASSWORD")]
    pub password: Option<String>,

    /// Path to SSH private key file (alternative to password)
    #[arg(long, env = "LINUX_REMOTE_KEY")]
    pub key: Option<PathBuf>,

    /// Connection timeout in seconds
    #[arg(long, default_value = "30", env = "LINUX_REMOTE_CONNECT_TIMEOUT")]
    pub connect_timeout: u64,

    /// Command execution timeout in milliseconds
    #[arg(long, default_value = "60000", env = "LINUX_REMOTE_TIMEOUT")]
    pub timeout: u64,

    /// Print the result as JSON (stdout, stderr, exit_status) instead of
    /// mirroring the captured streams
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Command to run on the remote host
    #[arg(trailing_var_arg = true, required = true)]
    pub command: Vec<String>,
}

/// Parsed and validated configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote host
    pub host: String,

    /// SSH port
    pub port: u16,

    /// Remote username
    pub user: String,

    /// Password
    pub password: Option<String>,

    /// Path to SSH private key
    pub key: Option<PathBuf>,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Command timeout in milliseconds
    pub timeout_ms: u64,

    /// Whether to print the result as JSON
    pub json: bool,

    /// Command line to run remotely
    pub command: String,
}

impl Config {
    /// Create Config from CLI Args
    pub fn from_args(args: Args) -> Result<Self> {
        validate_args(&args)?;

        Ok(Config {
            host: args.host,
            port: args.port,
            user: args.user,
            password: sanitize_password(args.password),
            key: args.key,
            connect_timeout_secs: args.connect_timeout,
            timeout_ms: args.timeout,
            json: args.json,
            command: args.command.join(" "),
        })
    }

    /// Build the [`User`] this configuration describes. The key file is
    /// listed first when both credentials are given, so it is tried first.
    pub fn build_user(&self) -> User {
        match (&self.key, &self.password) {
            (Some(key), Some(password)) => {
                User::new(&self.user, key).add_credential(Password::new(password.as_str()))
            }
            (Some(key), None) => User::new(&self.user, key),
            (None, Some(password)) => User::with_password(&self.user, password.as_str()),
            // validate_args rejects configs with neither credential
            (None, None) => User::with_password(&self.user, ""),
        }
    }

    /// Build the [`Server`] this configuration describes
    pub fn build_server(&self) -> Server {
        Server::new(&self.host, self.build_user())
            .with_port(self.port)
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .with_command_timeout(Duration::from_millis(self.timeout_ms))
    }
}

/// Validate CLI arguments
fn validate_args(args: &Args) -> Result<()> {
    let mut errors = Vec::new();

    if args.host.is_empty() {
        errors.push("Missing required --host".to_string());
    }

    if args.user.is_empty() {
        errors.push("Missing required --user".to_string());
    }

    // Must have either password or key; an empty password counts as absent
    let has_password = args.password.as_deref().is_some_and(|p| !p.is_empty());
    if !has_password && args.key.is_none() {
        errors.push("Must provide either --password or --key".to_string());
    }

    // If key is provided, check if file exists
    if let Some(ref key_path) = args.key {
        if !key_path.exists() {
            errors.push(format!("SSH key file not found: {}", key_path.display()));
        }
    }

    if args.command.join(" ").trim().is_empty() {
        errors.push("Missing command to run".to_string());
    }

    if !errors.is_empty() {
        return Err(Error::Config(format!(
            "Configuration error:\n{}",
            errors.join("\n")
        )));
    }

    Ok(())
}

/// Sanitize password: return None if empty
fn sanitize_password(password: Option<String>) -> Option<String> {
    password.filter(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn base_args() -> Args {
        Args {
            host: "192.0.2.10".to_string(),
            port: 22,
            user: "admin".to_string(),
            password: Some("secret".to_string()),
            key: None,
            connect_timeout: 30,
            timeout: 60_000,
            json: false,
            command: vec!["df".to_string(), "-h".to_string()],
        }
    }

    #[test]
    fn test_from_args_joins_command_words() {
        let config = Config::from_args(base_args()).unwrap();
        assert_eq!(config.command, "df -h");
        assert_eq!(config.host, "192.0.2.10");
        assert_eq!(config.timeout_ms, 60_000);
    }

    #[test]
    fn test_missing_host_rejected() {
        let mut args = base_args();
        args.host.clear();
        let err = Config::from_args(args).unwrap_err();
        assert!(err.to_string().contains("--host"));
    }

    #[test]
    fn test_requires_some_credential() {
        let mut args = base_args();
        args.password = None;
        let err = Config::from_args(args).unwrap_err();
        assert!(err.to_string().contains("--password or --key"));
    }

    #[test]
    fn test_empty_password_is_no_credential() {
        let mut args = base_args();
        args.password = Some(String::new());
        assert!(Config::from_args(args).is_err());
    }

    #[test]
    fn test_missing_key_file_rejected() {
        let mut args = base_args();
        args.key = Some(PathBuf::from("/definitely/not/here/id_ed25519"));
        let err = Config::from_args(args).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_empty_command_rejected() {
        let mut args = base_args();
        args.command = vec!["   ".to_string()];
        let err = Config::from_args(args).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("Missing command"));
    }

    #[test]
    fn test_build_user_password_only() {
        let config = Config::from_args(base_args()).unwrap();
        let user = config.build_user();
        assert_eq!(user.username(), "admin");
        assert_eq!(user.credentials().len(), 1);
    }

    #[test]
    fn test_build_user_orders_key_before_password() {
        let mut key_file = tempfile::NamedTempFile::new().unwrap();
        key_file.write_all(b"placeholder").unwrap();

        let mut args = base_args();
        args.key = Some(key_file.path().to_path_buf());
        let config = Config::from_args(args).unwrap();

        let user = config.build_user();
        assert_eq!(user.credentials().len(), 2);

        let debug = format!("{:?}", user.credentials());
        let key_at = debug.find("KeyFile").expect("key file listed");
        let password_at = debug.find("Password").expect("password listed");
        assert!(key_at < password_at);
    }

    #[test]
    fn test_build_server_applies_settings() {
        let mut args = base_args();
        args.port = 2222;
        args.connect_timeout = 5;
        args.timeout = 10_000;
        let config = Config::from_args(args).unwrap();

        let server = config.build_server();
        assert_eq!(server.host(), "192.0.2.10");
        assert_eq!(server.port(), 2222);
        assert_eq!(server.connect_timeout(), Duration::from_secs(5));
        assert_eq!(server.command_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_sanitize_password() {
        assert_eq!(
            sanitize_password(Some("secret".to_string())),
            Some("secret".to_string())
        );
        assert_eq!(sanitize_password(Some("".to_string())), None);
        assert_eq!(sanitize_password(None), None);
    }
}
