//! Single-flight coordination for token refresh.
//!
//! At most one refresh call may be in flight at a time. The first 401 to
//! arrive becomes the leader and performs the refresh; every 401 that lands
//! while it runs enqueues a oneshot and waits. The queue drains in arrival
//! order: all waiters get the new token on success or the refresh error on
//! failure. The mutex guards only the flag and the queue and is never held
//! across an await.

use parking_lot::Mutex;
use tokio::sync::oneshot;

use super::error::ClientError;

pub(crate) type TokenResult = Result<String, ClientError>;

/// Role assigned to a request that hit a 401.
pub(crate) enum Flight {
    /// This caller performs the refresh and must settle the gate.
    Leader,
    /// A refresh is already running; await its outcome.
    Follower(oneshot::Receiver<TokenResult>),
}

#[derive(Default)]
struct GateState {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<TokenResult>>,
}

#[derive(Default)]
pub(crate) struct RefreshGate {
    state: Mutex<GateState>,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Flight {
        let mut state = self.state.lock();
        if state.in_flight {
            let (tx, rx) = oneshot::channel();
            state.waiters.push(tx);
            Flight::Follower(rx)
        } else {
            state.in_flight = true;
            Flight::Leader
        }
    }

    /// Settle the gate with a fresh token; waiters drain FIFO.
    pub fn finish_ok(&self, token: &str) {
        for tx in self.take_waiters() {
            let _ = tx.send(Ok(token.to_string()));
        }
    }

    /// Settle the gate with the refresh error; waiters drain FIFO.
    pub fn finish_err(&self, message: &str) {
        for tx in self.take_waiters() {
            let _ = tx.send(Err(ClientError::SessionExpired(message.to_string())));
        }
    }

    fn take_waiters(&self) -> Vec<oneshot::Sender<TokenResult>> {
        let mut state = self.state.lock();
        state.in_flight = false;
        std::mem::take(&mut state.waiters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_caller_leads_rest_follow() {
        let gate = RefreshGate::new();
        assert!(matches!(gate.begin(), Flight::Leader));
        assert!(matches!(gate.begin(), Flight::Follower(_)));
        assert!(matches!(gate.begin(), Flight::Follower(_)));
    }

    #[tokio::test]
    async fn test_followers_receive_token_in_queue_order() {
        let gate = RefreshGate::new();
        let Flight::Leader = gate.begin() else {
            panic!("expected leader");
        };
        let receivers: Vec<_> = (0..3)
            .map(|_| match gate.begin() {
                Flight::Follower(rx) => rx,
                Flight::Leader => panic!("second leader while refresh in flight"),
            })
            .collect();

        gate.finish_ok("fresh");
        for rx in receivers {
            assert_eq!(rx.await.unwrap().unwrap(), "fresh");
        }
    }

    #[tokio::test]
    async fn test_failure_rejects_every_waiter() {
        let gate = RefreshGate::new();
        let _leader = gate.begin();
        let rx = match gate.begin() {
            Flight::Follower(rx) => rx,
            Flight::Leader => panic!("second leader while refresh in flight"),
        };

        gate.finish_err("refresh token expired");
        let err = rx.await.unwrap().unwrap_err();
        assert!(matches!(err, ClientError::SessionExpired(_)));
        assert!(err.to_string().contains("refresh token expired"));
    }

    #[tokio::test]
    async fn test_gate_reopens_after_settling() {
        let gate = RefreshGate::new();
        let _leader = gate.begin();
        gate.finish_ok("t1");
        // A later 401 may start a brand new refresh.
        assert!(matches!(gate.begin(), Flight::Leader));
    }
}
