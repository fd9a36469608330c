use crate::error::{Error, ErrorKind};
use crate::transport::Transport;
use futures::future::BoxFuture;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// A request issued through [`MockTransport`], waiting for the test to answer it.
pub(crate) struct PendingRequest {
    pub target: String,
    responder: oneshot::Sender<Result<Vec<u8>, Error>>,
}

impl PendingRequest {
    pub fn respond(self, body: &str) {
        let _ = self.responder.send(Ok(body.as_bytes().to_vec()));
    }

    pub fn reject(self, message: &str) {
        let _ = self.responder.send(Err(Error::new(
            ErrorKind::TransportFailure,
            message.to_string(),
        )));
    }
}

/// Hands every request to the test through a channel, so tests decide when
/// and in which order responses resolve.
pub(crate) struct MockTransport {
    requests: mpsc::UnboundedSender<PendingRequest>,
}

pub(crate) fn mock_transport() -> (Arc<MockTransport>, mpsc::UnboundedReceiver<PendingRequest>) {
    let (requests, receiver) = mpsc::unbounded_channel();

    (Arc::new(MockTransport { requests }), receiver)
}

impl Transport for MockTransport {
    fn get(&self, target: &str) -> BoxFuture<'static, Result<Vec<u8>, Error>> {
        let (responder, response) = oneshot::channel();

        let _ = self.requests.send(PendingRequest {
            target: target.to_string(),
            responder,
        });

        Box::pin(async move {
            match response.await {
                Ok(outcome) => outcome,
                Err(_) => Err(Error::new(
                    ErrorKind::TransportFailure,
                    "request dropped without a response".to_string(),
                )),
            }
        })
    }
}

pub(crate) fn init_logger() {
    let _ = simple_logger::init_with_level(log::Level::Debug);
}
