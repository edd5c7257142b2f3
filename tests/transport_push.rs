//! Push channel adapter tests
//!
//! Runs the adapter against an in-process websocket server and checks the
//! subscription handshake, in-order delivery, and topic filtering.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::protocol::Message;

use pairchat::client::transport::PushTransport;

#[tokio::test]
async fn delivers_matching_envelopes_in_receipt_order() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();

        // The first frame must be the subscription for the token topic.
        let frame = ws.next().await.unwrap().unwrap();
        let subscribe: serde_json::Value =
            serde_json::from_str(frame.to_text().unwrap()).unwrap();
        assert_eq!(subscribe["subscribe"], "tok-1");

        for (event, body) in [("tok-1", "first"), ("other", "foreign"), ("tok-1", "second")] {
            let frame = serde_json::json!({
                "event": event,
                "from": "bob@example.com",
                "to": "me@example.com",
                "message": body
            });
            ws.send(Message::Text(frame.to_string())).await.unwrap();
        }
        // An unparseable frame must be skipped, not kill the stream.
        ws.send(Message::Text("not json".to_string())).await.unwrap();
        let frame = serde_json::json!({
            "event": "tok-1",
            "from": "bob@example.com",
            "to": "me@example.com",
            "message": "third"
        });
        ws.send(Message::Text(frame.to_string())).await.unwrap();
        ws.close(None).await.unwrap();
    });

    let transport = PushTransport::new(format!("ws://{}", addr));
    let mut channel = transport.connect("tok-1").await.unwrap();

    assert_eq!(channel.recv().await.unwrap().body, "first");
    // The foreign-topic frame is filtered out.
    assert_eq!(channel.recv().await.unwrap().body, "second");
    assert_eq!(channel.recv().await.unwrap().body, "third");
    // Server close ends the stream.
    assert!(channel.recv().await.is_none());

    server.await.unwrap();
}

#[tokio::test]
async fn connect_to_unreachable_endpoint_is_a_network_error() {
    let transport = PushTransport::new("ws://127.0.0.1:9");
    let err = transport.connect("tok-1").await.unwrap_err();
    assert!(matches!(
        err,
        pairchat::shared::error::ChatError::Network { .. }
    ));
}

#[tokio::test]
async fn invalid_socket_url_is_a_validation_error() {
    let transport = PushTransport::new("not a url");
    let err = transport.connect("tok-1").await.unwrap_err();
    assert!(matches!(
        err,
        pairchat::shared::error::ChatError::Validation { .. }
    ));
}
