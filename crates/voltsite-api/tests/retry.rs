//! Integration tests for the read retry policy.
//!
//! A minimal TCP peer stands in for the backend: it can hang up before
//! responding or serve a canned HTTP response, making retry behavior
//! observable without a real server.

#![allow(clippy::unwrap_used)]

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use voltsite_api::{ApiClient, ApiError, Mutation, Payload, ResourceKind, RetryPolicy};

/// What the peer does with one accepted connection.
enum Peer {
    /// Drop the connection before responding.
    Hangup,
    /// Serve a 200 response with this JSON body.
    Ok(&'static str),
    /// Serve a 404 with a detail body.
    NotFound,
}

/// Run a scripted peer on an ephemeral port. Returns the API base URL,
/// a counter of accepted connections, and the serving thread.
fn peer(script: Vec<Peer>) -> (String, Arc<AtomicUsize>, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}/api", listener.local_addr().unwrap());
    let connections = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&connections);

    let handle = thread::spawn(move || {
        for step in script {
            let (mut stream, _) = listener.accept().unwrap();
            counter.fetch_add(1, Ordering::SeqCst);
            match step {
                Peer::Hangup => drop(stream),
                Peer::Ok(body) => respond(&mut stream, "200 OK", body),
                Peer::NotFound => {
                    respond(&mut stream, "404 Not Found", r#"{"detail":"Not found."}"#);
                }
            }
        }
    });

    (base, connections, handle)
}

fn respond(stream: &mut TcpStream, status: &str, body: &str) {
    // Drain the request head before answering.
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
            break;
        }
    }

    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len(),
    );
    stream.write_all(response.as_bytes()).unwrap();
}

fn short_retry() -> RetryPolicy {
    RetryPolicy::new(1, Duration::from_millis(10))
}

#[tokio::test]
async fn test_read_retries_once_on_transport_failure() {
    let (base, connections, handle) = peer(vec![
        Peer::Hangup,
        Peer::Ok(r#"{"id":1,"name":"Voltsite"}"#),
    ]);
    let client = ApiClient::new(&base, short_retry()).unwrap();

    let value = client.singleton(ResourceKind::Company).await.unwrap();
    assert_eq!(value["name"], "Voltsite");
    // One failed attempt, one retry.
    assert_eq!(connections.load(Ordering::SeqCst), 2);
    handle.join().unwrap();
}

#[tokio::test]
async fn test_read_without_retries_surfaces_the_failure() {
    let (base, connections, handle) = peer(vec![Peer::Hangup]);
    let client = ApiClient::new(&base, RetryPolicy::none()).unwrap();

    let result = client.singleton(ResourceKind::Company).await;
    assert!(matches!(result, Err(ApiError::Network(_))));
    assert_eq!(connections.load(Ordering::SeqCst), 1);
    handle.join().unwrap();
}

#[tokio::test]
async fn test_retries_are_exhausted_after_the_configured_count() {
    let (base, connections, handle) = peer(vec![Peer::Hangup, Peer::Hangup]);
    let client = ApiClient::new(&base, short_retry()).unwrap();

    let result = client.singleton(ResourceKind::Company).await;
    assert!(matches!(result, Err(ApiError::Network(_))));
    assert_eq!(connections.load(Ordering::SeqCst), 2);
    handle.join().unwrap();
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let (base, connections, handle) = peer(vec![Peer::NotFound]);
    let client = ApiClient::new(&base, short_retry()).unwrap();

    let result = client.singleton(ResourceKind::Company).await;
    assert_eq!(result.unwrap_err(), ApiError::NotFound);
    // A definitive response is never retried, only transport failures.
    assert_eq!(connections.load(Ordering::SeqCst), 1);
    handle.join().unwrap();
}

#[tokio::test]
async fn test_mutation_is_not_retried_on_transport_failure() {
    let (base, connections, handle) = peer(vec![Peer::Hangup]);
    let client = ApiClient::new(&base, short_retry()).unwrap();

    let result = client
        .submit(
            ResourceKind::Notice,
            &Mutation::Create,
            &Payload::new().text("title", "x"),
        )
        .await;

    assert!(matches!(result, Err(ApiError::Network(_))));
    assert_eq!(connections.load(Ordering::SeqCst), 1);
    handle.join().unwrap();
}
