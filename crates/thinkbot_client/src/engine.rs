use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use thinkbot_logging::{tb_debug, tb_error, tb_info, tb_warn};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::client::{ChatClient, ClientSettings, ReqwestChatClient};
use crate::{EngineEvent, FailureKind, RequestError, RequestId, TimerId};

enum EngineCommand {
    Post {
        request_id: RequestId,
        path: String,
        message: String,
    },
    StartTimer { timer: TimerId, period: Duration },
    StopTimer { timer: TimerId },
    Shutdown,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] RequestError),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Handle to the background IO worker. Commands go in, `EngineEvent`s come out.
///
/// A post that can no longer reach the worker is answered locally with a
/// `Network` failure, so every request id gets exactly one `ReplyCompleted`.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
    worker: Arc<Mutex<Option<thread::JoinHandle<()>>>>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let client = ReqwestChatClient::new(settings)?;
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(client: Arc<dyn ChatClient>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let worker_events = event_tx.clone();

        let worker = thread::spawn(move || {
            let mut timers: HashMap<TimerId, CancellationToken> = HashMap::new();

            while let Ok(command) = cmd_rx.recv() {
                if matches!(command, EngineCommand::Shutdown) {
                    break;
                }
                handle_command(&runtime, &client, &mut timers, command, &worker_events);
            }

            for (_, token) in timers.drain() {
                token.cancel();
            }
            for command in cmd_rx.try_iter() {
                if let EngineCommand::Post { request_id, .. } = command {
                    reject_post(&worker_events, request_id);
                }
            }
            tb_info!("Engine worker stopped");
        });

        Ok(Self {
            cmd_tx,
            event_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
            worker: Arc::new(Mutex::new(Some(worker))),
        })
    }

    pub fn post(&self, request_id: RequestId, path: impl Into<String>, message: impl Into<String>) {
        let command = EngineCommand::Post {
            request_id,
            path: path.into(),
            message: message.into(),
        };
        if self.cmd_tx.send(command).is_err() {
            reject_post(&self.event_tx, request_id);
        }
    }

    pub fn start_timer(&self, timer: TimerId, period: Duration) {
        if self
            .cmd_tx
            .send(EngineCommand::StartTimer { timer, period })
            .is_err()
        {
            tb_warn!("Progress timer {} not started: engine stopped", timer);
        }
    }

    pub fn stop_timer(&self, timer: TimerId) {
        // A stopped worker has already cancelled every timer.
        let _ = self.cmd_tx.send(EngineCommand::StopTimer { timer });
    }

    /// Cancels all timers and waits for the worker thread to exit. Later
    /// posts fail immediately with a `Network` error.
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
        let worker = self.worker.lock().ok().and_then(|mut slot| slot.take());
        if let Some(worker) = worker {
            if worker.join().is_err() {
                tb_error!("Engine worker panicked");
            }
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Blocks until the next event.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

fn reject_post(event_tx: &mpsc::Sender<EngineEvent>, request_id: RequestId) {
    tb_warn!("Request {} dropped: engine stopped", request_id);
    let _ = event_tx.send(EngineEvent::ReplyCompleted {
        request_id,
        result: Err(RequestError::new(FailureKind::Network, "engine stopped")),
    });
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    client: &Arc<dyn ChatClient>,
    timers: &mut HashMap<TimerId, CancellationToken>,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Post {
            request_id,
            path,
            message,
        } => {
            let client = Arc::clone(client);
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let result = client.post_message(&path, &message).await;
                match &result {
                    Ok(_) => tb_info!("Request {} to {} completed", request_id, path),
                    Err(err) => tb_info!("Request {} to {} failed: {}", request_id, path, err),
                }
                let _ = event_tx.send(EngineEvent::ReplyCompleted { request_id, result });
            });
        }
        EngineCommand::StartTimer { timer, period } => {
            let token = CancellationToken::new();
            if let Some(previous) = timers.insert(timer, token.clone()) {
                previous.cancel();
            }
            tb_debug!("Progress timer {} started ({:?})", timer, period);
            let event_tx = event_tx.clone();
            runtime.spawn(run_timer(timer, period, token, event_tx));
        }
        EngineCommand::StopTimer { timer } => {
            if let Some(token) = timers.remove(&timer) {
                token.cancel();
                tb_debug!("Progress timer {} stopped", timer);
            }
        }
        EngineCommand::Shutdown => {}
    }
}

async fn run_timer(
    timer: TimerId,
    period: Duration,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let start = tokio::time::Instant::now() + period;
    let mut interval = tokio::time::interval_at(start, period);
    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = interval.tick() => {
                if event_tx.send(EngineEvent::TimerFired { timer }).is_err() {
                    break;
                }
            }
        }
    }
}
