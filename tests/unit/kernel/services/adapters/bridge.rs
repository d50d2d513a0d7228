use super::*;
use serde_json::json;
use std::io;

#[derive(Default)]
struct RecordingTransport {
    posted: Mutex<Vec<String>>,
    fail: bool,
}

impl BridgeTransport for RecordingTransport {
    fn post(&self, message: String) -> io::Result<()> {
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "frame gone"));
        }
        self.posted.lock().unwrap().push(message);
        Ok(())
    }
}

fn posted(bridge: &CompilerBridge<RecordingTransport>) -> Vec<BridgeRequest> {
    bridge
        .transport()
        .posted
        .lock()
        .unwrap()
        .iter()
        .map(|m| serde_json::from_str(m).unwrap())
        .collect()
}

fn new_bridge(timeout_ms: u64) -> CompilerBridge<RecordingTransport> {
    CompilerBridge::new(
        RecordingTransport::default(),
        Duration::from_millis(timeout_ms),
    )
}

#[tokio::test]
async fn reply_with_id_completes_request() {
    let bridge = new_bridge(1_000);

    let (result, handled) = tokio::join!(
        bridge.request(BridgeRequestKind::StateInitData, "cell;"),
        async {
            tokio::task::yield_now().await;
            let sent = posted(&bridge);
            assert_eq!(sent.len(), 1);
            assert_eq!(sent[0].name, BRIDGE_NAME);
            assert_eq!(sent[0].kind, "state-init-data");
            assert_eq!(sent[0].code, "cell;");
            let reply = json!({
                "name": BRIDGE_NAME,
                "type": "state-init-data",
                "data": {"cell": "te6cc"},
                "id": sent[0].id,
            });
            bridge.handle_message(&reply.to_string()).unwrap()
        }
    );

    assert!(handled);
    assert_eq!(result.unwrap()["cell"], "te6cc");
    assert_eq!(bridge.pending_len(), 0);
}

#[tokio::test]
async fn overlapping_requests_are_routed_by_id() {
    let bridge = new_bridge(1_000);

    let (first, second, _) = tokio::join!(
        bridge.request(BridgeRequestKind::AbiData, "first"),
        bridge.request(BridgeRequestKind::AbiData, "second"),
        async {
            tokio::task::yield_now().await;
            let sent = posted(&bridge);
            assert_eq!(sent.len(), 2);
            // answer the second request first
            for req in sent.iter().rev() {
                let reply = json!({
                    "name": BRIDGE_NAME,
                    "type": "abi-data",
                    "data": req.code,
                    "id": req.id,
                });
                assert!(bridge.handle_message(&reply.to_string()).unwrap());
            }
        }
    );

    assert_eq!(first.unwrap(), json!("first"));
    assert_eq!(second.unwrap(), json!("second"));
}

#[tokio::test]
async fn legacy_reply_without_id_goes_to_oldest_of_same_type() {
    let bridge = new_bridge(1_000);

    let (result, _) = tokio::join!(
        bridge.request(BridgeRequestKind::StateInitData, "cell;"),
        async {
            tokio::task::yield_now().await;
            let other = json!({"name": BRIDGE_NAME, "type": "abi-data", "data": 1});
            assert!(!bridge.handle_message(&other.to_string()).unwrap());
            let reply = json!({"name": BRIDGE_NAME, "type": "state-init-data", "data": 2});
            assert!(bridge.handle_message(&reply.to_string()).unwrap());
        }
    );

    assert_eq!(result.unwrap(), json!(2));
}

#[tokio::test]
async fn remote_error_is_surfaced() {
    let bridge = new_bridge(1_000);

    let (result, _) = tokio::join!(
        bridge.request(BridgeRequestKind::StateInitData, "cell;"),
        async {
            tokio::task::yield_now().await;
            let id = posted(&bridge)[0].id;
            let reply = json!({
                "name": BRIDGE_NAME,
                "type": "state-init-data",
                "error": "'default' is not exported by stateInit.cell.ts",
                "id": id,
            });
            bridge.handle_message(&reply.to_string()).unwrap();
        }
    );

    match result {
        Err(BridgeError::Remote(message)) => assert!(message.contains("default")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn request_times_out_and_drops_pending() {
    let bridge = new_bridge(20);
    let result = bridge
        .request(BridgeRequestKind::StateInitData, "cell;")
        .await;
    assert!(matches!(result, Err(BridgeError::Timeout(_))));
    assert_eq!(bridge.pending_len(), 0);

    let id = posted(&bridge)[0].id;
    let late = json!({"name": BRIDGE_NAME, "type": "state-init-data", "data": 1, "id": id});
    assert!(!bridge.handle_message(&late.to_string()).unwrap());
}

#[tokio::test]
async fn close_fails_pending_requests() {
    let bridge = new_bridge(1_000);

    let (result, _) = tokio::join!(
        bridge.request(BridgeRequestKind::AbiData, "x"),
        async {
            tokio::task::yield_now().await;
            bridge.close();
        }
    );

    assert!(matches!(result, Err(BridgeError::Closed)));
}

#[tokio::test]
async fn transport_failure_is_reported() {
    let bridge = CompilerBridge::new(
        RecordingTransport {
            fail: true,
            ..Default::default()
        },
        Duration::from_millis(1_000),
    );
    let result = bridge.request(BridgeRequestKind::AbiData, "x").await;
    assert!(matches!(result, Err(BridgeError::Transport(_))));
    assert_eq!(bridge.pending_len(), 0);
}

#[test]
fn foreign_messages_are_ignored() {
    let bridge = new_bridge(1_000);
    assert!(!bridge
        .handle_message(r#"{"name":"other-app","type":"state-init-data"}"#)
        .unwrap());
    assert!(!bridge.handle_message(r#"[1, 2, 3]"#).unwrap());
    assert!(matches!(
        bridge.handle_message("not json"),
        Err(BridgeError::Json(_))
    ));
}

#[test]
fn request_kind_names() {
    assert_eq!(
        BridgeRequestKind::from_name("state-init-data"),
        BridgeRequestKind::StateInitData
    );
    assert_eq!(BridgeRequestKind::AbiData.as_str(), "abi-data");
    assert_eq!(
        BridgeRequestKind::from_name("run-tests").as_str(),
        "run-tests"
    );
}

#[tokio::test]
async fn cancelled_request_does_not_swallow_next_reply() {
    let bridge = new_bridge(1_000);

    let cancelled = tokio::time::timeout(
        Duration::from_millis(5),
        bridge.request(BridgeRequestKind::StateInitData, "old"),
    )
    .await;
    assert!(cancelled.is_err());
    assert_eq!(bridge.pending_len(), 0);

    let (result, handled) = tokio::join!(
        bridge.request(BridgeRequestKind::StateInitData, "new"),
        async {
            tokio::task::yield_now().await;
            let reply = json!({"name": BRIDGE_NAME, "type": "state-init-data", "data": "fresh"});
            bridge.handle_message(&reply.to_string()).unwrap()
        }
    );

    assert!(handled);
    assert_eq!(result.unwrap(), json!("fresh"));
    assert_eq!(bridge.pending_len(), 0);
}
