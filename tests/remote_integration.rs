//! Integration tests against a live SSH host.
//!
//! Gated behind the `integration_tests` feature; point them at a host with:
//!
//! ```bash
//! LINUX_REMOTE_TEST_HOST=192.168.1.50 \
//! LINUX_REMOTE_TEST_USER=admin \
//! LINUX_REMOTE_TEST_KEY=$HOME/.ssh/id_ed25519 \
//! cargo test --features integration_tests --test remote_integration
//! ```
//!
//! `LINUX_REMOTE_TEST_PORT` (default 22) and `LINUX_REMOTE_TEST_PASSWORD`
//! (enables the password test) are optional.

#[cfg(feature = "integration_tests")]
mod tests {
    use std::env;

    use linux_remote::{Server, User};

    fn server_from_env() -> Server {
        let host = env::var("LINUX_REMOTE_TEST_HOST").expect("LINUX_REMOTE_TEST_HOST not set");
        let user = env::var("LINUX_REMOTE_TEST_USER").expect("LINUX_REMOTE_TEST_USER not set");
        let key = env::var("LINUX_REMOTE_TEST_KEY").expect("LINUX_REMOTE_TEST_KEY not set");
        let port = env::var("LINUX_REMOTE_TEST_PORT")
            .ok()
            .map(|p| p.parse().expect("invalid LINUX_REMOTE_TEST_PORT"))
            .unwrap_or(22);

        Server::new(host, User::new(user, key)).with_port(port)
    }

    #[tokio::test]
    async fn test_echo_round_trip() {
        let server = server_from_env();
        let result = server.run_command("echo hello").await.expect("run echo");

        assert_eq!(result.stdout, "hello\n");
        assert_eq!(result.stderr, "");
        assert_eq!(result.exit_status, Some(0));
        assert!(result.success());
    }

    #[tokio::test]
    async fn test_nonzero_exit_status_is_data_not_error() {
        let server = server_from_env();
        let result = server.run_command("exit 3").await.expect("run exit 3");

        assert_eq!(result.exit_status, Some(3));
        assert!(!result.success());
    }

    #[tokio::test]
    async fn test_sequential_calls_are_independent() {
        let server = server_from_env();

        let first = server.run_command("echo first").await.expect("first call");
        let second = server
            .run_command("echo second")
            .await
            .expect("second call");

        assert_eq!(first.stdout, "first\n");
        assert_eq!(second.stdout, "second\n");
        assert!(!second.stdout.contains("first"));
    }

    #[tokio::test]
    async fn test_stdout_and_stderr_stay_separated() {
        let server = server_from_env();
        let result = server
            .run_command("echo to-out; echo to-err 1>&2")
            .await
            .expect("run command");

        assert_eq!(result.stdout, "to-out\n");
        assert_eq!(result.stderr, "to-err\n");
        assert_eq!(result.exit_status, Some(0));
    }

    #[tokio::test]
    async fn test_probe_reports_live_host() {
        let server = server_from_env();
        assert!(server.probe().await);
    }

    #[tokio::test]
    async fn test_closed_port_is_connection_error() {
        // Port 9 (discard) is not served by sshd; the connect is refused or
        // times out, and either way no partial result comes back.
        let server = server_from_env()
            .with_port(9)
            .with_connect_timeout(std::time::Duration::from_secs(5));

        let err = server.run_command("echo hello").await.unwrap_err();
        assert!(err.is_connection_error());
    }

    #[tokio::test]
    async fn test_upload_download_round_trip() {
        let server = server_from_env();

        let dir = tempfile::tempdir().expect("tempdir");
        let local = dir.path().join("round-trip.txt");
        tokio::fs::write(&local, b"payload over sftp\n")
            .await
            .expect("write local file");

        let remote = format!("/tmp/linux-remote-test-{}", std::process::id());
        let used = server
            .upload(&local, Some(remote.as_str()))
            .await
            .expect("upload");
        assert_eq!(used, remote);

        let returned = dir.path().join("round-trip-back.txt");
        server
            .download(&remote, Some(returned.as_path()))
            .await
            .expect("download");

        let contents = tokio::fs::read_to_string(&returned)
            .await
            .expect("read downloaded file");
        assert_eq!(contents, "payload over sftp\n");

        server
            .run_command(&format!("rm -f {}", remote))
            .await
            .expect("remote cleanup");
    }

    #[tokio::test]
    async fn test_password_credential() {
        let Ok(password) = env::var("LINUX_REMOTE_TEST_PASSWORD") else {
            eprintln!("LINUX_REMOTE_TEST_PASSWORD not set, skipping");
            return;
        };
        let host = env::var("LINUX_REMOTE_TEST_HOST").expect("LINUX_REMOTE_TEST_HOST not set");
        let user = env::var("LINUX_REMOTE_TEST_USER").expect("LINUX_REMOTE_TEST_USER not set");
        let port = env::var("LINUX_REMOTE_TEST_PORT")
            .ok()
            .map(|p| p.parse().expect("invalid LINUX_REMOTE_TEST_PORT"))
            .unwrap_or(22);

        let server = Server::new(host, User::with_password(user, password)).with_port(port);
        let result = server.run_command("id -un").await.expect("run id");
        assert!(!result.stdout.is_empty());
        assert!(result.success());
    }
}
