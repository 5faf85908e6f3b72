//! Control Connection Handler
//!
//! Serves one accepted control connection. The wire is line-delimited
//! JSON: each line is one [`ControlRequest`] envelope, each response one
//! line back. Malformed lines and failed commands answer with an error
//! envelope instead of closing the connection:
//!
//! ```json
//! {"result":"error","message":"data connection dc-1 not found"}
//! ```
//!
//! Channel lifecycle events are published here, next to the command that
//! caused them, so control services stay free of event plumbing.

use dcg_domain::events::ChannelEvent;
use dcg_domain::ports::{ControlRequest, ControlResponse, SharedControlService, SharedEventsService};
use dcg_domain::value_objects::DataConnectionId;
use dcg_domain::{Error, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, warn};

/// Serve one control connection until the peer disconnects
pub async fn serve_connection(
    stream: TcpStream,
    control: SharedControlService,
    events: SharedEventsService,
) {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                warn!(error = %err, "Failed to read control line");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(&line, &control, &events).await;
        debug!(response = %response, "Control response");
        if let Err(err) = write_half.write_all(response.as_bytes()).await {
            warn!(error = %err, "Failed to write control response");
            break;
        }
        if let Err(err) = write_half.write_all(b"\n").await {
            warn!(error = %err, "Failed to write control response");
            break;
        }
    }
}

/// Handle one request line and render the response line
async fn handle_line(
    line: &str,
    control: &SharedControlService,
    events: &SharedEventsService,
) -> String {
    let request: ControlRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(err) => return error_envelope(&format!("invalid control request: {err}")),
    };

    let outcome = control.handle(request.clone()).await;
    if let Some(event) = event_for(&request, &outcome) {
        if let Err(err) = events.publish(event).await {
            warn!(error = %err, "Failed to publish channel event");
        }
    }

    match outcome {
        Ok(response) => render_response(&response),
        Err(err) => error_envelope(&err.to_string()),
    }
}

/// Derive the lifecycle event a command outcome implies
///
/// Status queries observe without changing anything, so they raise no
/// event. Failures carry whichever connection identifier the request
/// named.
fn event_for(request: &ControlRequest, outcome: &Result<ControlResponse>) -> Option<ChannelEvent> {
    match outcome {
        Ok(ControlResponse::Connected { route }) => Some(ChannelEvent::ChannelOpened {
            route: route.clone(),
        }),
        Ok(ControlResponse::Disconnected { data_connection_id }) => {
            Some(ChannelEvent::ChannelClosed {
                data_connection_id: data_connection_id.clone(),
            })
        }
        Ok(ControlResponse::Status { .. }) => None,
        Err(err) => Some(ChannelEvent::ChannelError {
            data_connection_id: request_connection_id(request),
            message: err.to_string(),
        }),
    }
}

/// The connection identifier a request names, when it names one
fn request_connection_id(request: &ControlRequest) -> Option<DataConnectionId> {
    match request {
        ControlRequest::Connect {
            data_connection_id, ..
        } => data_connection_id.clone(),
        ControlRequest::Disconnect { data_connection_id }
        | ControlRequest::Status { data_connection_id } => Some(data_connection_id.clone()),
    }
}

/// Render a successful response as one wire line
fn render_response(response: &ControlResponse) -> String {
    match serde_json::to_string(response) {
        Ok(line) => line,
        Err(err) => error_envelope(&format!("failed to render response: {err}")),
    }
}

/// Render an error envelope as one wire line
fn error_envelope(message: &str) -> String {
    serde_json::json!({ "result": "error", "message": message }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    fn addr() -> SocketAddr {
        "192.0.2.7:50000".parse().unwrap()
    }

    #[test]
    fn a_connected_outcome_raises_channel_opened() {
        let route =
            dcg_domain::value_objects::TopicRoute::canonical(DataConnectionId::generate(), addr(), 20000)
                .unwrap();
        let request = ControlRequest::Connect {
            channel_addr: addr(),
            data_connection_id: None,
        };
        let outcome = Ok(ControlResponse::Connected {
            route: route.clone(),
        });

        let event = event_for(&request, &outcome).unwrap();
        assert_eq!(event, ChannelEvent::ChannelOpened { route });
    }

    #[test]
    fn a_disconnected_outcome_raises_channel_closed() {
        let id = DataConnectionId::generate();
        let request = ControlRequest::Disconnect {
            data_connection_id: id.clone(),
        };
        let outcome = Ok(ControlResponse::Disconnected {
            data_connection_id: id.clone(),
        });

        let event = event_for(&request, &outcome).unwrap();
        assert_eq!(
            event,
            ChannelEvent::ChannelClosed {
                data_connection_id: id
            }
        );
    }

    #[test]
    fn a_status_outcome_raises_no_event() {
        let id = DataConnectionId::generate();
        let route = dcg_domain::value_objects::TopicRoute::canonical(id.clone(), addr(), 20001).unwrap();
        let request = ControlRequest::Status {
            data_connection_id: id,
        };
        let outcome = Ok(ControlResponse::Status { route, open: true });

        assert!(event_for(&request, &outcome).is_none());
    }

    #[test]
    fn a_failed_command_raises_channel_error_with_the_named_connection() {
        let id = DataConnectionId::generate();
        let request = ControlRequest::Status {
            data_connection_id: id.clone(),
        };
        let outcome = Err(Error::not_found(format!("data connection {id}")));

        match event_for(&request, &outcome) {
            Some(ChannelEvent::ChannelError {
                data_connection_id,
                message,
            }) => {
                assert_eq!(data_connection_id, Some(id));
                assert!(message.contains("not found"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn error_envelopes_are_tagged_like_responses() {
        let line = error_envelope("boom");
        let json: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(json["result"], "error");
        assert_eq!(json["message"], "boom");
    }

    #[test]
    fn rendered_responses_parse_back() {
        let id = DataConnectionId::generate();
        let line = render_response(&ControlResponse::Disconnected {
            data_connection_id: id.clone(),
        });
        let parsed: ControlResponse = serde_json::from_str(&line).unwrap();
        assert_eq!(
            parsed,
            ControlResponse::Disconnected {
                data_connection_id: id
            }
        );
    }
}
