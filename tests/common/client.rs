//! Test IRC client.
//!
//! Speaks raw lines over TCP so tests assert on exactly what the server
//! writes.

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// The command word (or numeric) of a server line, skipping any prefix.
pub fn command_of(line: &str) -> &str {
    let mut words = line.split(' ');
    match words.next() {
        Some(first) if first.starts_with(':') => words.next().unwrap_or(""),
        Some(first) => first,
        None => "",
    }
}

/// A test IRC client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    nick: String,
}

impl TestClient {
    /// Connect to a test server.
    pub async fn connect(address: &str, nick: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;

        let (read_half, write_half) = stream.into_split();
        let reader = BufReader::new(read_half);
        let writer = BufWriter::new(write_half);

        Ok(Self {
            reader,
            writer,
            nick: nick.to_string(),
        })
    }

    #[allow(dead_code)]
    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Send a raw line; CR LF is appended if missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with("\r\n") {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single line from the server, terminator stripped.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a line with a timeout. End-of-stream is an error.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("connection closed by server");
        }
        if !line.ends_with("\r\n") {
            anyhow::bail!("line without CR LF terminator: {:?}", line);
        }
        line.truncate(line.len() - 2);
        Ok(line)
    }

    /// Receive lines until the given predicate returns true. The matching
    /// line is the last one returned.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<String>>
    where
        F: FnMut(&str) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv().await?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                return Ok(lines);
            }
        }
    }

    /// Receive lines until one with the given command word or numeric.
    pub async fn recv_command(&mut self, command: &str) -> anyhow::Result<String> {
        let mut lines = self.recv_until(|l| command_of(l) == command).await?;
        lines
            .pop()
            .ok_or_else(|| anyhow::anyhow!("no {} received", command))
    }

    /// Assert nothing arrives for a short while.
    #[allow(dead_code)]
    pub async fn expect_silence(&mut self) -> anyhow::Result<()> {
        match self.recv_timeout(Duration::from_millis(200)).await {
            Ok(line) => anyhow::bail!("unexpected line: {}", line),
            Err(_) => Ok(()),
        }
    }

    /// Wait for the server to close the stream, returning what it sent first.
    /// A reset counts as closed.
    #[allow(dead_code)]
    pub async fn recv_until_closed(&mut self) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            match timeout(Duration::from_secs(5), self.reader.read_line(&mut line)).await? {
                Ok(0) | Err(_) => return Ok(lines),
                Ok(_) => lines.push(line.trim_end_matches("\r\n").to_string()),
            }
        }
    }

    /// Register with the server (NICK + USER) and consume the banner up to
    /// the end of the MOTD.
    pub async fn register(&mut self) -> anyhow::Result<Vec<String>> {
        let nick = self.nick.clone();
        self.send_raw(&format!("NICK {}", nick)).await?;
        self.send_raw(&format!("USER {} 0 * Test User {}", nick, nick))
            .await?;

        let lines = self.recv_until(|l| command_of(l) == "376").await?;
        if !lines.iter().any(|l| command_of(l) == "001") {
            anyhow::bail!("Registration failed: no RPL_WELCOME received");
        }
        Ok(lines)
    }

    /// Join a channel and consume replies up to the end of the names list.
    #[allow(dead_code)]
    pub async fn join(&mut self, channel: &str) -> anyhow::Result<Vec<String>> {
        self.send_raw(&format!("JOIN {}", channel)).await?;
        self.recv_until(|l| command_of(l) == "366").await
    }

    /// Send a PRIVMSG.
    #[allow(dead_code)]
    pub async fn privmsg(&mut self, target: &str, text: &str) -> anyhow::Result<()> {
        self.send_raw(&format!("PRIVMSG {} {}", target, text)).await
    }

    /// Send QUIT.
    #[allow(dead_code)]
    pub async fn quit(&mut self, reason: Option<&str>) -> anyhow::Result<()> {
        match reason {
            Some(reason) => self.send_raw(&format!("QUIT {}", reason)).await,
            None => self.send_raw("QUIT").await,
        }
    }
}
