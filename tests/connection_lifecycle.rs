//! Integration tests for the connection lifecycle.
//!
//! Tests the complete flow of connecting, registering, and disconnecting from
//! the server over real sockets.

mod common;

use common::{TestServer, command_of};

#[tokio::test]
async fn test_nick_is_confirmed_and_bound() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut alice = server.connect("alice").await.expect("Failed to connect");

    alice.send_raw("NICK alice").await.unwrap();
    let reply = alice.recv().await.unwrap();
    assert_eq!(reply, ":alice!~alice@127.0.0.1 NICK alice");

    let session = server.registry().lookup_nick("alice").expect("alice bound");
    assert_eq!(session.nick().as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_duplicate_nick() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut first = server.connect("alice").await.unwrap();
    let mut second = server.connect("alice").await.unwrap();

    first.send_raw("NICK alice").await.unwrap();
    first.recv_command("NICK").await.unwrap();

    second.send_raw("NICK alice").await.unwrap();
    let reply = second.recv().await.unwrap();
    assert_eq!(reply, ":test.server 433 * alice :Nickname is already in use");

    // Case differences still collide.
    second.send_raw("NICK ALICE").await.unwrap();
    assert_eq!(command_of(&second.recv().await.unwrap()), "433");

    assert_eq!(server.registry().nick_count(), 1);
    assert_eq!(server.registry().session_count(), 2);
}

#[tokio::test]
async fn test_join_creates_channel() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut alice = server.connect("alice").await.unwrap();

    alice.send_raw("NICK alice").await.unwrap();
    alice.recv_command("NICK").await.unwrap();

    let lines = alice.join("test").await.unwrap();
    assert_eq!(
        lines,
        vec![
            ":alice!~alice@127.0.0.1 JOIN #test",
            ":test.server 332 alice #test #test",
            ":test.server 353 alice = #test alice",
            ":test.server 366 alice #test :End of /NAMES list",
        ]
    );

    let channel = server.registry().channel("#test").expect("channel created");
    assert_eq!(channel.len(), 1);
}

#[tokio::test]
async fn test_user_sends_banner() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut bob = server.connect("bob").await.unwrap();

    bob.send_raw("USER bob 0 * Bob Real").await.unwrap();
    let lines = bob.recv_until(|l| command_of(l) == "376").await.unwrap();

    let commands: Vec<&str> = lines.iter().map(|l| command_of(l)).collect();
    assert_eq!(
        commands,
        vec!["NOTICE", "001", "002", "003", "004", "375", "372", "376"]
    );
    assert!(lines[0].starts_with(":test.server NOTICE AUTH :*** You connected on port "));
    assert!(lines[1].starts_with(":test.server 001 * :Welcome to the TestNet IRC Network"));
    assert_eq!(lines[6], ":test.server 372 * :- Test Server");
    assert_eq!(lines[7], ":test.server 376 * :End of /MOTD command.");

    // The banner is re-sent on every USER.
    bob.send_raw("USER bob 0 * Bob Real").await.unwrap();
    assert_eq!(bob.recv_command("376").await.unwrap(), lines[7]);
}

#[tokio::test]
async fn test_register_then_ping() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut client = server.connect("testnick").await.unwrap();

    let banner = client.register().await.expect("Registration failed");
    assert!(banner.iter().any(|l| l.contains("001 testnick :Welcome")));

    client.send_raw("PING test").await.unwrap();
    assert_eq!(
        client.recv().await.unwrap(),
        ":test.server PONG test.server test"
    );
}

#[tokio::test]
async fn test_quit_closes_and_cleans_up() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut alice = server.connect("alice").await.unwrap();
    alice.register().await.unwrap();
    alice.join("#test").await.unwrap();

    alice.quit(Some("leaving now")).await.unwrap();
    let lines = alice.recv_until_closed().await.unwrap();
    assert_eq!(
        lines,
        vec!["ERROR :Closing Link: 127.0.0.1 (Quit: leaving now)"]
    );

    assert!(
        server
            .wait_for(|r| r.session_count() == 0 && r.lookup_nick("alice").is_none())
            .await
    );
    assert!(server.registry().channel("#test").is_none());
}

#[tokio::test]
async fn test_unknown_command_keeps_session() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut client = server.connect("alice").await.unwrap();

    client.send_raw("FOO bar baz").await.unwrap();
    assert_eq!(
        client.recv().await.unwrap(),
        ":test.server 421 * FOO :Unknown command"
    );
    client.expect_silence().await.unwrap();

    client.send_raw("PING still-here").await.unwrap();
    assert_eq!(command_of(&client.recv().await.unwrap()), "PONG");
}

#[tokio::test]
async fn test_blank_lines_are_ignored() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut client = server.connect("alice").await.unwrap();

    client.send_raw("").await.unwrap();
    client.send_raw("   ").await.unwrap();
    client.send_raw("PING x").await.unwrap();
    assert_eq!(command_of(&client.recv().await.unwrap()), "PONG");
}

#[tokio::test]
async fn test_overlong_line_disconnects() {
    let server = TestServer::spawn_with(|c| c.limits.max_line_len = 64)
        .await
        .expect("Failed to spawn test server");
    let mut client = server.connect("alice").await.unwrap();

    client.send_raw("NICK alice").await.unwrap();
    client.recv_command("NICK").await.unwrap();

    let long = format!("PRIVMSG bob {}", "x".repeat(100));
    client.send_raw(&long).await.unwrap();
    let lines = client.recv_until_closed().await.unwrap();
    assert!(lines.iter().all(|l| command_of(l) == "ERROR"));

    assert!(server.wait_for(|r| r.session_count() == 0).await);
    assert!(server.registry().lookup_nick("alice").is_none());
}

#[tokio::test]
async fn test_dropped_socket_frees_nick() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut alice = server.connect("alice").await.unwrap();
    alice.send_raw("NICK alice").await.unwrap();
    alice.recv_command("NICK").await.unwrap();
    drop(alice);

    assert!(server.wait_for(|r| r.lookup_nick("alice").is_none()).await);

    let mut again = server.connect("alice").await.unwrap();
    again.send_raw("NICK alice").await.unwrap();
    assert_eq!(
        again.recv().await.unwrap(),
        ":alice!~alice@127.0.0.1 NICK alice"
    );
}
