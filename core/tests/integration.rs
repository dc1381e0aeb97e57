//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts its own mock server on a random port, so quota state is
//! never shared between tests, then drives `Client` over real HTTP through
//! the default ureq transport.

use std::net::SocketAddr;
use std::time::Duration;

use genderize_core::{Client, Error, Gender};
use mock_server::{INACTIVE_API_KEY, INVALID_API_KEY, RESET_SECONDS};

/// Start the mock server with a quota of `limit` names and return its
/// address.
fn start_server(limit: i64) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with_limit(listener, limit).await
        })
        .unwrap();
    });

    addr
}

fn client(addr: SocketAddr) -> Client {
    Client::builder()
        .endpoint(format!("http://{addr}/"))
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[test]
fn single_lookup() {
    let client = client(start_server(100));

    let lookup = client.check("Alice").unwrap();
    assert_eq!(lookup.inference.name, "Alice");
    assert_eq!(lookup.inference.gender, Gender::Female);
    assert_eq!(lookup.rate_limit.limit, 100);
    assert_eq!(lookup.rate_limit.remaining, 99);
    assert_eq!(lookup.rate_limit.reset, Duration::from_secs(RESET_SECONDS));
    assert_eq!(client.rate_limit(), Some(lookup.rate_limit));
}

#[test]
fn single_lookup_with_country() {
    let client = client(start_server(100));

    let lookup = client.check_in("Kim", "US").unwrap();
    assert_eq!(lookup.inference.country_id.as_deref(), Some("US"));
    assert_eq!(lookup.inference.gender, Gender::Female);
}

#[test]
fn batch_lifecycle() {
    let client = client(start_server(10));

    // Step 1: batch of three names, one unknown.
    let request = client.request().names(["Alice", "John", "Zzyzx"]);
    let results = client.execute(&request).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results.find("John").unwrap().gender, Gender::Male);
    assert_eq!(results.find("Zzyzx").unwrap().gender, Gender::Unknown);
    assert!(matches!(results.find("Mike"), Err(Error::NotFound)));
    assert_eq!(results.limit(), 10);
    assert_eq!(results.limit_remaining(), 7);

    // Step 2: iterate.
    let mut visited = 0;
    results.for_each(|_| visited += 1).unwrap();
    assert_eq!(visited, 3);

    // Step 3: the client tracked the snapshot.
    assert_eq!(client.rate_limit().unwrap().remaining, 7);

    // Step 4: a batch larger than what is left.
    let request = client.request().names(["a", "b", "c", "d", "e", "f", "g", "h"]);
    let err = client.execute(&request).unwrap_err();
    assert!(matches!(err, Error::TooManyRequests(_)), "{err:?}");

    // Step 5: spend the rest, then hit the wall.
    let request = client.request().names(["a", "b", "c", "d", "e", "f", "g"]);
    assert_eq!(client.execute(&request).unwrap().limit_remaining(), 0);
    let err = client.execute(&client.request().name("Alice")).unwrap_err();
    assert!(matches!(err, Error::RequestLimitReached));
    assert_eq!(client.rate_limit().unwrap().remaining, 0);
}

#[test]
fn single_lookup_past_quota() {
    let client = client(start_server(1));

    client.check("Alice").unwrap();
    let err = client.check("John").unwrap_err();
    assert!(matches!(err, Error::RequestLimitReached));
}

#[test]
fn invalid_api_key() {
    let addr = start_server(100);
    let client = Client::builder()
        .endpoint(format!("http://{addr}/"))
        .api_key(INVALID_API_KEY)
        .build()
        .unwrap();

    assert!(matches!(client.check("Alice"), Err(Error::InvalidApiKey)));
}

#[test]
fn inactive_subscription_via_request_key() {
    let client = client(start_server(100));

    let request = client.request().name("Alice").api_key(INACTIVE_API_KEY);
    assert!(matches!(client.execute(&request), Err(Error::SubscriptionInactive)));
}

#[test]
fn missing_and_invalid_names() {
    let client = client(start_server(100));

    let err = client.execute(&client.request()).unwrap_err();
    assert!(matches!(err, Error::MissingName));

    let err = client.execute(&client.request().name("")).unwrap_err();
    assert!(matches!(err, Error::Validation(ref m) if m == "Invalid 'name' parameter"));

    let err = client.check("").unwrap_err();
    assert!(matches!(err, Error::InvalidName));
}

#[test]
fn unreachable_server_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = client(addr);

    let err = client.check("Alice").unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "{err:?}");
    assert_eq!(client.rate_limit(), None);
}
