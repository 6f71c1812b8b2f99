//
//  twapi-client
//  api/stream.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Streaming Responses
//!
//! Long-lived endpoints answer with a body that never ends: one JSON record
//! per line, with blank keep-alive lines in between. [`StreamClient`] reads
//! that body one record at a time.
//!
//! ## States
//!
//! | State | `receive()` | `read()` |
//! |-------|-------------|----------|
//! | Open | waits for the next record, `true` when one arrived | decodes the last record |
//! | Stopped | `false` | `Ok(None)` |
//!
//! The only transition is Open to Stopped, through [`StreamClient::stop`],
//! a [`StopHandle`], or the end of the body. It is idempotent.
//!
//! ## Example
//!
//! ```rust,no_run
//! use twapi_client::api::StreamClient;
//!
//! # async fn example(mut stream: StreamClient<serde_json::Value>) -> anyhow::Result<()> {
//! let stop = stream.stop_handle();
//! tokio::spawn(async move {
//!     tokio::time::sleep(std::time::Duration::from_secs(30)).await;
//!     stop.stop();
//! });
//!
//! while stream.receive().await {
//!     if let Some(record) = stream.read()? {
//!         println!("{record}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use bytes::{Buf, Bytes, BytesMut};
use futures::stream::BoxStream;
use futures::{Stream, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::watch;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced while reading a stream.
#[derive(Error, Debug)]
pub enum StreamError {
    /// The buffered record is not valid JSON for the requested type.
    #[error("failed to decode stream record: {0}")]
    Decode(#[from] serde_json::Error),

    /// `read()` was called before `receive()` delivered a record.
    #[error("no record has been received yet")]
    NothingReceived,
}

/// Stops a [`StreamClient`] from another task.
///
/// Stopping wakes a pending [`StreamClient::receive`], which then returns
/// `false` and drops the connection. Calling [`stop`](Self::stop) again does
/// nothing.
#[derive(Debug, Clone)]
pub struct StopHandle {
    signal: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    /// Requests the stream to stop.
    pub fn stop(&self) {
        self.signal.send_replace(true);
    }

    /// Returns `true` once a stop was requested.
    pub fn is_stopped(&self) -> bool {
        *self.signal.borrow()
    }
}

/// A newline-delimited JSON stream over a live response body.
///
/// At most one task reads (`receive` takes `&mut self`); any number of
/// tasks may stop it through [`StopHandle`]s.
pub struct StreamClient<T> {
    body: Option<BoxStream<'static, Result<Bytes, BoxError>>>,
    buffer: BytesMut,
    current: Option<Bytes>,
    signal: Arc<watch::Sender<bool>>,
    stopped: watch::Receiver<bool>,
    _record: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> StreamClient<T> {
    /// Wraps the body of a successful streaming response.
    pub fn new(response: reqwest::Response) -> Self {
        Self::from_byte_stream(response.bytes_stream())
    }

    /// Wraps any byte stream, e.g. a body produced in tests.
    pub fn from_byte_stream<S, E>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        let (signal, stopped) = watch::channel(false);
        Self {
            body: Some(stream.map_err(|err| -> BoxError { err.into() }).boxed()),
            buffer: BytesMut::new(),
            current: None,
            signal: Arc::new(signal),
            stopped,
            _record: PhantomData,
        }
    }

    /// Returns a handle that can stop this stream from another task.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            signal: Arc::clone(&self.signal),
        }
    }

    /// Returns `true` once the stream is stopped.
    pub fn is_stopped(&self) -> bool {
        *self.stopped.borrow()
    }

    /// Waits for the next record.
    ///
    /// Returns `true` when a record is buffered for [`read`](Self::read);
    /// `false` when the stream is stopped, the body ended, or reading failed.
    /// Blank keep-alive lines are skipped. There is no timeout: a silent
    /// connection keeps this pending until data arrives or a stop is requested.
    pub async fn receive(&mut self) -> bool {
        loop {
            if self.is_stopped() {
                self.close();
                return false;
            }

            if let Some(line) = self.next_line() {
                if line.is_empty() {
                    tracing::trace!("stream keep-alive");
                    continue;
                }
                self.current = Some(line);
                return true;
            }

            let Some(body) = self.body.as_mut() else {
                self.finish();
                return false;
            };

            let mut stopped = self.stopped.clone();
            let chunk = tokio::select! {
                _ = stopped.wait_for(|s| *s) => None,
                chunk = body.next() => Some(chunk),
            };

            match chunk {
                // Stop requested while waiting; the next iteration closes.
                None => continue,
                Some(Some(Ok(bytes))) => self.buffer.extend_from_slice(&bytes),
                Some(Some(Err(err))) => {
                    tracing::warn!(error = %err, "stream read failed");
                    self.finish();
                    return false;
                }
                Some(None) => {
                    self.body = None;
                    // A final record without a trailing newline is still a record.
                    let rest = self.buffer.split().freeze();
                    let rest = trim_line(rest);
                    if rest.is_empty() {
                        self.finish();
                        return false;
                    }
                    self.current = Some(rest);
                    return true;
                }
            }
        }
    }

    /// Decodes the record delivered by the last successful [`receive`](Self::receive).
    ///
    /// # Returns
    ///
    /// - `Ok(None)` once the stream is stopped
    /// - `Ok(Some(record))` otherwise
    ///
    /// # Errors
    ///
    /// - [`StreamError::NothingReceived`] before the first record
    /// - [`StreamError::Decode`] for a malformed record
    pub fn read(&self) -> Result<Option<T>, StreamError> {
        if self.is_stopped() {
            return Ok(None);
        }
        let record = self.current.as_ref().ok_or(StreamError::NothingReceived)?;
        Ok(Some(serde_json::from_slice(record)?))
    }

    /// Returns the raw bytes of the current record.
    pub fn raw_record(&self) -> Option<&[u8]> {
        self.current.as_deref()
    }

    /// Stops the stream and closes the connection.
    ///
    /// Safe to call any number of times. Errors while closing are ignored.
    pub fn stop(&mut self) {
        self.signal.send_replace(true);
        self.close();
    }

    fn next_line(&mut self) -> Option<Bytes> {
        let newline = self.buffer.iter().position(|b| *b == b'\n')?;
        let line = self.buffer.split_to(newline + 1).freeze();
        Some(trim_line(line))
    }

    fn finish(&mut self) {
        self.signal.send_replace(true);
        self.close();
    }

    fn close(&mut self) {
        // Dropping the body stream releases the connection.
        self.body = None;
        self.buffer.clear();
        self.current = None;
    }
}

impl<T> std::fmt::Debug for StreamClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamClient")
            .field("stopped", &*self.stopped.borrow())
            .field("buffered", &self.buffer.len())
            .finish_non_exhaustive()
    }
}

impl<T> Drop for StreamClient<T> {
    fn drop(&mut self) {
        self.signal.send_replace(true);
    }
}

fn trim_line(mut line: Bytes) -> Bytes {
    while line.last().is_some_and(|b| *b == b'\n' || *b == b'\r') {
        line.truncate(line.len() - 1);
    }
    while line.first().is_some_and(|b| b.is_ascii_whitespace()) {
        line.advance(1);
    }
    line
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::stream;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Post {
        id: String,
        text: String,
    }

    fn chunks(parts: &[&'static str]) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static {
        let items: Vec<Result<Bytes, std::io::Error>> =
            parts.iter().map(|p| Ok(Bytes::from_static(p.as_bytes()))).collect();
        stream::iter(items)
    }

    #[tokio::test]
    async fn test_receive_records_until_eof() {
        let mut client: StreamClient<Post> = StreamClient::from_byte_stream(chunks(&[
            "{\"id\":\"1\",\"text\":\"a\"}\r\n",
            "\r\n",
            "{\"id\":\"2\",",
            "\"text\":\"b\"}\r\n{\"id\":\"3\",\"text\":\"c\"}",
        ]));

        let mut seen = Vec::new();
        while client.receive().await {
            seen.push(client.read().unwrap().unwrap().id);
        }

        assert_eq!(seen, vec!["1", "2", "3"]);
        assert!(client.is_stopped());
        assert!(!client.receive().await);
    }

    #[tokio::test]
    async fn test_read_after_stop_is_none() {
        let mut client: StreamClient<Post> =
            StreamClient::from_byte_stream(chunks(&["{\"id\":\"1\",\"text\":\"a\"}\n", "{\"id\":\"2\",\"text\":\"b\"}\n"]));

        assert!(client.receive().await);
        client.stop();
        client.stop();

        assert!(client.read().unwrap().is_none());
        assert!(!client.receive().await);
    }

    #[tokio::test]
    async fn test_read_before_receive() {
        let client: StreamClient<Post> = StreamClient::from_byte_stream(chunks(&[]));
        assert!(matches!(client.read(), Err(StreamError::NothingReceived)));
    }

    #[tokio::test]
    async fn test_malformed_record_is_decode_error() {
        let mut client: StreamClient<Post> = StreamClient::from_byte_stream(chunks(&["not json\n"]));
        assert!(client.receive().await);
        assert!(matches!(client.read(), Err(StreamError::Decode(_))));
    }

    #[tokio::test]
    async fn test_read_error_ends_stream() {
        let items: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"{\"id\":\"1\",\"text\":\"a\"}\n")),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
        ];
        let mut client: StreamClient<Post> = StreamClient::from_byte_stream(stream::iter(items));

        assert!(client.receive().await);
        assert!(!client.receive().await);
        assert!(client.is_stopped());
    }

    #[tokio::test]
    async fn test_stop_handle_unblocks_pending_receive() {
        let body = chunks(&["{\"id\":\"1\",\"text\":\"a\"}\n"]).chain(stream::pending());
        let mut client: StreamClient<Post> = StreamClient::from_byte_stream(body);
        let handle = client.stop_handle();

        assert!(client.receive().await);

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            handle.stop();
            handle.stop();
        });

        let received = tokio::time::timeout(Duration::from_secs(5), client.receive())
            .await
            .expect("receive did not return after stop");
        assert!(!received);
        assert!(client.read().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_handle_reports_drop() {
        let client: StreamClient<Post> = StreamClient::from_byte_stream(chunks(&[]));
        let handle = client.stop_handle();
        assert!(!handle.is_stopped());
        drop(client);
        assert!(handle.is_stopped());
    }
}
