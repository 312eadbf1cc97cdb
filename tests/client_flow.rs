//! Integration tests for the client's three loops.
//!
//! Each test drives a real `Client` against a scripted server over an
//! in-memory stream.

mod common;

use std::time::Duration;

use common::{RecordingRenderer, TestServer, wait_until};
use slircc::{Client, ClientError, Config};
use tokio::sync::mpsc;
use tokio::time::timeout;

fn test_config(nick: &str) -> Config {
    let mut config = Config::from_args("irc.test", "6697", nick).unwrap();
    config.ui.input_poll_ms = 5;
    config.ui.display_poll_ms = 5;
    config
}

#[tokio::test]
async fn test_register_join_chat_quit() {
    let (mut server, stream) = TestServer::pair();
    let renderer = RecordingRenderer::default();
    let (input, input_rx) = mpsc::unbounded_channel();

    let client = Client::new(test_config("bob"));
    let session = client.session();
    let handle = tokio::spawn(client.run_with(stream, input_rx, renderer.clone()));

    assert_eq!(server.recv_raw().await.unwrap(), "NICK :bob");
    assert_eq!(server.recv_raw().await.unwrap(), "USER bob 0 * :bob");

    server
        .send_raw(":irc.test 433 * bob :Nickname is already in use")
        .await
        .unwrap();
    assert_eq!(server.recv_raw().await.unwrap(), "NICK :bob1");

    server
        .send_raw(":irc.test 001 bob1 :Welcome to the test network")
        .await
        .unwrap();
    server.send_raw(":bob1!u@h JOIN :#rust").await.unwrap();
    wait_until("join", || {
        session.with(|state| state.current_buffer() == Some("#rust"))
    })
    .await;

    server.send_raw(":alice!a@h PRIVMSG #rust :hi bob").await.unwrap();
    wait_until("chat line", || renderer.contains("<alice> hi bob")).await;

    input.send("hello alice".to_owned()).unwrap();
    assert_eq!(
        server.recv_raw().await.unwrap(),
        "PRIVMSG #rust :hello alice"
    );
    wait_until("echo", || renderer.contains("<-- PRIVMSG hello alice")).await;

    server
        .send_raw(":alice!a@h PRIVMSG #rust :\x01ACTION waves\x01")
        .await
        .unwrap();
    wait_until("action line", || renderer.contains("* alice waves")).await;

    input.send("/me waves back".to_owned()).unwrap();
    assert_eq!(
        server.recv_raw().await.unwrap(),
        "PRIVMSG #rust :\x01ACTION waves back\x01"
    );
    wait_until("own action", || renderer.contains("* bob1 waves back")).await;

    input.send("/kick #rust alice :too much waving".to_owned()).unwrap();
    assert_eq!(
        server.recv_raw().await.unwrap(),
        "KICK #rust alice :too much waving"
    );

    input.send("/quit bye".to_owned()).unwrap();
    assert_eq!(server.recv_raw().await.unwrap(), "QUIT :bye");

    let renderer = timeout(Duration::from_secs(2), handle)
        .await
        .unwrap()
        .unwrap()
        .unwrap();

    assert!(session.is_shut_down());
    assert_eq!(renderer.clears(), 1);
    let lines = renderer.lines();
    assert_eq!(lines.iter().filter(|l| *l == "<alice> hi bob").count(), 1);
    // Status lines were wiped when #rust became active.
    assert!(!lines.iter().any(|l| l.contains("NICK")));
    session.with(|state| {
        assert_eq!(state.current_nick(), "bob1");
        assert_eq!(state.buffer_names(), vec!["#rust"]);
    });
}

#[tokio::test]
async fn test_status_buffer_errors_and_ping() {
    let (mut server, stream) = TestServer::pair();
    let renderer = RecordingRenderer::default();
    let (input, input_rx) = mpsc::unbounded_channel();

    let client = Client::new(test_config("bob"));
    let session = client.session();
    let handle = tokio::spawn(client.run_with(stream, input_rx, renderer.clone()));

    server.recv_raw().await.unwrap();
    server.recv_raw().await.unwrap();

    server.send_raw("PING :12345").await.unwrap();
    assert_eq!(server.recv_raw().await.unwrap(), "PONG :12345");
    wait_until("ping line", || renderer.contains("--> PING 12345")).await;

    input.send("hello?".to_owned()).unwrap();
    wait_until("target error", || renderer.contains("! not a chat buffer")).await;

    input.send("/msg alice".to_owned()).unwrap();
    wait_until("usage error", || {
        renderer.contains("! usage: /msg <target> <text>")
    })
    .await;

    // What a Ctrl-C does.
    session.shut_down();
    let result = timeout(Duration::from_secs(2), handle).await.unwrap().unwrap();
    assert!(result.is_ok());
    assert!(server.drain().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_server_close_stops_all_loops() {
    let (mut server, stream) = TestServer::pair();
    // Input stays open: the input loop must stop on the shutdown flag alone.
    let (_input, input_rx) = mpsc::unbounded_channel();

    let client = Client::new(test_config("bob"));
    let session = client.session();
    let handle = tokio::spawn(client.run_with(stream, input_rx, RecordingRenderer::default()));

    server.recv().await.unwrap();
    server.recv().await.unwrap();
    server.close().await.unwrap();

    let result = timeout(Duration::from_secs(2), handle).await.unwrap().unwrap();
    assert!(matches!(result, Err(ClientError::ConnectionClosed)));
    assert!(session.is_shut_down());
}
