//! Test server management.
//!
//! Runs the gateway in-process on an ephemeral port. The registry handle is
//! kept so tests can assert on server-side state.

use lineircd::config::{Config, MotdConfig};
use lineircd::network::Gateway;
use lineircd::state::Registry;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A test server instance.
pub struct TestServer {
    addr: SocketAddr,
    registry: Arc<Registry>,
    task: JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    /// Spawn a server with the test configuration.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn a server after letting the caller adjust the configuration.
    pub async fn spawn_with<F>(configure: F) -> anyhow::Result<Self>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = Config::default();
        config.server.name = "test.server".to_string();
        config.server.network = "TestNet".to_string();
        config.listen.address = "127.0.0.1:0".parse()?;
        config.motd = MotdConfig {
            file: None,
            lines: vec!["Test Server".to_string()],
        };
        configure(&mut config);

        let registry = Arc::new(Registry::new(&config));
        let gateway = Gateway::bind(config.listen.address, Arc::clone(&registry)).await?;
        let addr = gateway.local_addr()?;
        let task = tokio::spawn(gateway.run());

        Ok(Self {
            addr,
            registry,
            task,
        })
    }

    /// Get the server address.
    pub fn address(&self) -> String {
        self.addr.to_string()
    }

    #[allow(dead_code)]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Create a new test client connected to this server.
    pub async fn connect(&self, nick: &str) -> anyhow::Result<super::client::TestClient> {
        super::client::TestClient::connect(&self.address(), nick).await
    }

    /// Poll `check` against the registry until it holds or a second passes.
    /// Session teardown runs on the server task, after the client saw EOF.
    #[allow(dead_code)]
    pub async fn wait_for<F>(&self, mut check: F) -> bool
    where
        F: FnMut(&Registry) -> bool,
    {
        for _ in 0..100 {
            if check(&self.registry) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        check(&self.registry)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
