//! Control wire tests
//!
//! Composes the production binding set, serves a control connection over
//! a loopback TCP pair and speaks the line-delimited JSON wire end to end.

// Force-link dcg-providers to ensure linkme binding registrations are included
extern crate dcg_providers;

use std::time::Duration;

use dcg::listener::serve_connection;
use dcg_domain::events::ChannelEvent;
use dcg_domain::ports::SharedEventsService;
use dcg_infrastructure::di::init_test_gateway;
use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream, UdpSocket};

/// One side of a served control connection
struct WireClient {
    lines: tokio::io::Lines<BufReader<OwnedReadHalf>>,
    write: OwnedWriteHalf,
}

impl WireClient {
    /// Send one request line and parse the response line
    async fn send(&mut self, line: &str) -> serde_json::Value {
        self.write
            .write_all(line.as_bytes())
            .await
            .expect("request should be written");
        self.write
            .write_all(b"\n")
            .await
            .expect("request should be written");
        let response = tokio::time::timeout(Duration::from_secs(5), self.lines.next_line())
            .await
            .expect("response should arrive in time")
            .expect("response should be read")
            .expect("connection should stay open");
        serde_json::from_str(&response).expect("response should be JSON")
    }
}

/// Compose the gateway and serve one control connection for the test
///
/// The events service is a factory role, so the handle the listener
/// publishes into is returned for the test to subscribe on.
async fn start_gateway() -> (SharedEventsService, WireClient) {
    let context = init_test_gateway().expect("production set should compose");
    let control = context
        .container()
        .control_service()
        .expect("control service should resolve");
    let events = context
        .container()
        .events_service()
        .expect("events service should resolve");

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("listener should report addr");
    let served_events = events.clone();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("connection should accept");
        serve_connection(stream, control, served_events).await;
    });

    let stream = TcpStream::connect(addr)
        .await
        .expect("client should connect");
    let (read_half, write_half) = stream.into_split();
    let client = WireClient {
        lines: BufReader::new(read_half).lines(),
        write: write_half,
    };
    (events, client)
}

/// Bind a loopback UDP endpoint standing in for the remote channel peer
async fn remote_endpoint() -> (UdpSocket, std::net::SocketAddr) {
    let socket = UdpSocket::bind("127.0.0.1:0")
        .await
        .expect("remote endpoint should bind");
    let addr = socket.local_addr().expect("remote endpoint should report addr");
    (socket, addr)
}

#[tokio::test]
async fn the_wire_serves_the_full_channel_lifecycle() {
    let (_events, mut client) = start_gateway().await;
    let (_remote, remote_addr) = remote_endpoint().await;

    let connected = client
        .send(&format!(
            r#"{{"command":"connect","params":{{"channel_addr":"{remote_addr}"}}}}"#
        ))
        .await;
    assert_eq!(connected["result"], "connected");
    let id = connected["route"]["data_connection_id"]
        .as_str()
        .expect("route should carry the connection id")
        .to_string();
    assert_ne!(connected["route"]["ingress_port"], 0);

    let status = client
        .send(&format!(
            r#"{{"command":"status","params":{{"data_connection_id":"{id}"}}}}"#
        ))
        .await;
    assert_eq!(status["result"], "status");
    assert_eq!(status["open"], true);
    assert_eq!(status["route"]["data_connection_id"].as_str(), Some(id.as_str()));

    let disconnected = client
        .send(&format!(
            r#"{{"command":"disconnect","params":{{"data_connection_id":"{id}"}}}}"#
        ))
        .await;
    assert_eq!(disconnected["result"], "disconnected");
    assert_eq!(disconnected["data_connection_id"].as_str(), Some(id.as_str()));

    let gone = client
        .send(&format!(
            r#"{{"command":"status","params":{{"data_connection_id":"{id}"}}}}"#
        ))
        .await;
    assert_eq!(gone["result"], "error");
    assert!(
        gone["message"]
            .as_str()
            .is_some_and(|message| message.contains("not found"))
    );
}

#[tokio::test]
async fn malformed_lines_answer_with_an_error_envelope() {
    let (_events, mut client) = start_gateway().await;

    let garbled = client.send("these are not commands").await;
    assert_eq!(garbled["result"], "error");
    assert!(
        garbled["message"]
            .as_str()
            .is_some_and(|message| message.contains("invalid control request"))
    );

    // The connection survives the bad line and keeps answering.
    let unknown = dcg_domain::value_objects::DataConnectionId::generate();
    let missing = client
        .send(&format!(
            r#"{{"command":"status","params":{{"data_connection_id":"{unknown}"}}}}"#
        ))
        .await;
    assert_eq!(missing["result"], "error");
    assert!(
        missing["message"]
            .as_str()
            .is_some_and(|message| message.contains("not found"))
    );
}

#[tokio::test]
async fn connects_and_disconnects_publish_lifecycle_events() {
    let (events, mut client) = start_gateway().await;
    let (_remote, remote_addr) = remote_endpoint().await;

    let mut stream = events
        .subscribe()
        .await
        .expect("subscription should succeed");

    let connected = client
        .send(&format!(
            r#"{{"command":"connect","params":{{"channel_addr":"{remote_addr}"}}}}"#
        ))
        .await;
    let id = connected["route"]["data_connection_id"]
        .as_str()
        .expect("route should carry the connection id")
        .to_string();

    let opened = tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .expect("event should arrive in time")
        .expect("event stream should stay open");
    match opened {
        ChannelEvent::ChannelOpened { route } => {
            assert_eq!(route.data_connection_id.as_str(), id);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    client
        .send(&format!(
            r#"{{"command":"disconnect","params":{{"data_connection_id":"{id}"}}}}"#
        ))
        .await;

    let closed = tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .expect("event should arrive in time")
        .expect("event stream should stay open");
    match closed {
        ChannelEvent::ChannelClosed { data_connection_id } => {
            assert_eq!(data_connection_id.as_str(), id);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
