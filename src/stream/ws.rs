//! WebSocket frame source.
//!
//! Uses a blocking `tungstenite` client on a dedicated reader thread. The UI
//! thread only ever sees [`StreamEvent`]s delivered through the sink, in the
//! order the frames arrived on the wire.

use std::net::{Shutdown, TcpStream};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use tracing::{debug, info};
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

use super::{FrameSource, StreamEvent};

type Socket = WebSocket<MaybeTlsStream<TcpStream>>;

/// State shared between the owner and the reader thread.
#[derive(Debug, Default)]
struct Shared {
    /// Set once by `close`.
    closed: bool,
    /// Clone of the socket's TCP stream, used to unblock the reader.
    stream: Option<TcpStream>,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Receive-only WebSocket connection.
pub struct WsSource {
    url: String,
    shared: Arc<Mutex<Shared>>,
    reader: Option<JoinHandle<()>>,
}

impl WsSource {
    /// Starts connecting to `url` in the background.
    ///
    /// Every event is passed to `sink`; the reader stops once it returns false.
    pub fn connect<F>(url: impl Into<String>, sink: F) -> Self
    where
        F: FnMut(StreamEvent) -> bool + Send + 'static,
    {
        let url = url.into();
        let shared = Arc::new(Mutex::new(Shared::default()));

        let reader = {
            let url = url.clone();
            let shared = Arc::clone(&shared);
            thread::spawn(move || read_loop(&url, &shared, sink))
        };

        info!(url = %url, "connecting");
        Self {
            url,
            shared,
            reader: Some(reader),
        }
    }
}

impl FrameSource for WsSource {
    fn endpoint(&self) -> &str {
        &self.url
    }

    fn close(&mut self) {
        let stream = {
            let mut guard = lock(&self.shared);
            if guard.closed {
                return;
            }
            guard.closed = true;
            guard.stream.take()
        };

        match stream {
            Some(stream) => {
                if let Err(e) = stream.shutdown(Shutdown::Both) {
                    debug!(error = %e, "socket shutdown");
                }
                // Reader wakes up on the shutdown and exits.
                if let Some(handle) = self.reader.take()
                    && handle.join().is_err()
                {
                    debug!("reader thread panicked");
                }
            }
            None => {
                // Still connecting, or the reader already finished. Either way
                // it releases the socket itself.
                self.reader.take();
            }
        }
        debug!(url = %self.url, "connection released");
    }
}

impl Drop for WsSource {
    fn drop(&mut self) {
        self.close();
    }
}

fn read_loop<F>(url: &str, shared: &Mutex<Shared>, mut send: F)
where
    F: FnMut(StreamEvent) -> bool,
{
    let mut socket = match tungstenite::connect(url) {
        Ok((socket, _response)) => socket,
        Err(e) => {
            send(StreamEvent::Error(e.to_string()));
            send(StreamEvent::Closed);
            return;
        }
    };

    {
        let mut guard = lock(shared);
        if guard.closed {
            let _ = socket.close(None);
            return;
        }
        guard.stream = tcp_clone(&socket);
    }

    if !send(StreamEvent::Opened) {
        let _ = socket.close(None);
        return;
    }

    loop {
        match socket.read() {
            Ok(Message::Text(text)) => {
                if !send(StreamEvent::Frame(text.as_str().to_owned())) {
                    break;
                }
            }
            Ok(Message::Binary(bytes)) => match String::from_utf8(bytes.to_vec()) {
                Ok(text) => {
                    if !send(StreamEvent::Frame(text)) {
                        break;
                    }
                }
                Err(_) => debug!(len = bytes.len(), "non-text binary frame ignored"),
            },
            Ok(Message::Close(frame)) => {
                debug!(?frame, "close frame received");
                // The reply is queued; reading flushes it and waits for the
                // server to drop the connection.
                while socket.read().is_ok() {}
                break;
            }
            Ok(_) => {}
            Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => break,
            Err(e) => {
                if !lock(shared).closed {
                    send(StreamEvent::Error(e.to_string()));
                }
                break;
            }
        }
    }

    lock(shared).stream.take();
    send(StreamEvent::Closed);
}

fn tcp_clone(socket: &Socket) -> Option<TcpStream> {
    match socket.get_ref() {
        MaybeTlsStream::Plain(stream) => stream.try_clone().ok(),
        MaybeTlsStream::NativeTls(stream) => stream.get_ref().try_clone().ok(),
        _ => None,
    }
}
