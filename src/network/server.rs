//! TCP Server
//!
//! Accepts connections and runs each session on its own thread.

use std::collections::HashMap;
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::sync::WaitGroup;
use parking_lot::Mutex;

use crate::config::Config;
use crate::error::Result;
use crate::store::Store;
use super::Connection;

/// How long the acceptor sleeps when no connection is pending
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Open sessions by id; the stored handle is a clone used to unblock reads
type SessionTable = Arc<Mutex<HashMap<u64, TcpStream>>>;

/// TCP server for DomainKV
pub struct Server {
    config: Config,
    store: Arc<Store>,
    listener: TcpListener,
    shutdown: Arc<AtomicBool>,
}

/// Cloneable handle that stops a running server
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

impl Server {
    /// Bind the listen address from `config`
    pub fn bind(config: Config, store: Arc<Store>) -> Result<Self> {
        config.validate()?;

        let listener = TcpListener::bind(&config.listen_addr)?;
        // Non-blocking so the accept loop can observe shutdown
        listener.set_nonblocking(true)?;

        Ok(Self {
            config,
            store,
            listener,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
        }
    }

    /// Signal the server to shutdown gracefully
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Run the accept loop (blocking)
    ///
    /// Every accepted session gets its own thread, up to `max_connections`
    /// at once. On shutdown the open sessions are closed and this returns
    /// once their threads have exited.
    pub fn run(&self) -> Result<()> {
        tracing::info!(
            "Listening on {} (max {} sessions)",
            self.local_addr()?,
            self.config.max_connections
        );

        let sessions = SessionTable::default();
        let all_done = WaitGroup::new();
        let mut next_id: u64 = 0;

        while !self.shutdown.load(Ordering::Relaxed) {
            match self.listener.accept() {
                Ok((stream, addr)) => {
                    if let Err(e) = stream.set_nonblocking(false) {
                        tracing::warn!("Dropping connection from {}: {}", addr, e);
                        continue;
                    }
                    if sessions.lock().len() >= self.config.max_connections {
                        tracing::warn!("Connection limit reached, rejecting {}", addr);
                        continue;
                    }

                    let id = next_id;
                    next_id += 1;
                    if let Err(e) = self.spawn_session(id, stream, &sessions, all_done.clone()) {
                        tracing::warn!("Failed to start session for {}: {}", addr, e);
                    }
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
                Err(e) => {
                    tracing::warn!("Accept failed: {}", e);
                }
            }
        }

        tracing::info!("Shutting down, closing {} open sessions", sessions.lock().len());
        for stream in sessions.lock().values() {
            let _ = stream.shutdown(Shutdown::Both);
        }
        all_done.wait();

        tracing::info!("Server stopped");
        Ok(())
    }

    fn spawn_session(
        &self,
        id: u64,
        stream: TcpStream,
        sessions: &SessionTable,
        done: WaitGroup,
    ) -> Result<()> {
        sessions.lock().insert(id, stream.try_clone()?);

        let store = Arc::clone(&self.store);
        let config = self.config.clone();
        let table = Arc::clone(sessions);
        let spawned = thread::Builder::new()
            .name(format!("domainkv-session-{id}"))
            .spawn(move || {
                serve(stream, store, &config);
                table.lock().remove(&id);
                drop(done);
            });

        if let Err(e) = spawned {
            sessions.lock().remove(&id);
            return Err(e.into());
        }
        Ok(())
    }
}

/// Run one session to completion, logging any failure
fn serve(stream: TcpStream, store: Arc<Store>, config: &Config) {
    let result = Connection::new(stream, store, config.max_frame_size).and_then(|mut conn| {
        conn.set_timeouts(config.read_timeout_ms, config.write_timeout_ms)?;
        conn.handle()
    });

    if let Err(e) = result {
        tracing::debug!("Session ended with error: {}", e);
    }
}
