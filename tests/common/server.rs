//! Test server management.
//!
//! Spawns and manages coursebotd instances for integration testing.

use std::process::{Child, Command};
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpStream;
use tokio::time::sleep;

use super::TestClient;

/// A test daemon instance.
pub struct TestServer {
    child: Child,
    port: u16,
    // Holds the config and database files for the daemon's lifetime.
    _data_dir: TempDir,
}

impl TestServer {
    /// Spawn a new test daemon with the given port.
    pub async fn spawn(port: u16) -> anyhow::Result<Self> {
        let data_dir = tempfile::tempdir()?;

        // Create minimal test configuration with a fixed ambient term so
        // assertions don't depend on the calendar.
        let config_path = data_dir.path().join("config.toml");
        let config_content = format!(
            r#"
[server]
name = "courses.test"

[listen]
address = "127.0.0.1:{}"

[database]
path = "{}/test.db"

[term]
year = 2026
semester = "Fall"

[capacity]
room_quota = 40
rooms_per_section = 4
warn_threshold = 36
"#,
            port,
            data_dir.path().display()
        );

        std::fs::write(&config_path, config_content)?;

        // Spawn the daemon (cargo builds the binary for integration tests)
        let child = Command::new(env!("CARGO_BIN_EXE_coursebotd"))
            .arg(config_path.to_str().unwrap())
            .spawn()?;

        let server = Self {
            child,
            port,
            _data_dir: data_dir,
        };

        server.wait_ready().await?;
        Ok(server)
    }

    /// Wait until the daemon accepts connections.
    async fn wait_ready(&self) -> anyhow::Result<()> {
        for _ in 0..50 {
            if TcpStream::connect(self.address()).await.is_ok() {
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("Server on port {} never became ready", self.port)
    }

    /// The address clients should connect to.
    pub fn address(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }

    /// Connect and identify a client.
    pub async fn connect(&self, name: &str) -> anyhow::Result<TestClient> {
        let mut client = TestClient::connect(&self.address(), name).await?;
        client.hello().await?;
        Ok(client)
    }

    /// Connect without identifying.
    #[allow(dead_code)]
    pub async fn connect_anonymous(&self, name: &str) -> anyhow::Result<TestClient> {
        TestClient::connect(&self.address(), name).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
