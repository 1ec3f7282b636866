//! Shared test fixtures for engine tests.

use crate::lookup::{
    ExternalAddressProbe, HttpClient, HttpError, HttpRequest, HttpResponse,
};
use crate::network::{EnumerationError, InterfaceAddress, InterfaceSource, LocalAddressProbe};
use crate::time::Clock;
use std::collections::VecDeque;
use std::net::Ipv4Addr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, SystemTime};

use super::RefreshEngine;

pub const INTERVAL: Duration = Duration::from_secs(300);
pub const TIMEOUT: Duration = Duration::from_secs(5);

/// Mock clock for testing that returns controlled time values.
pub struct MockClock {
    secs: AtomicU64,
}

impl MockClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            secs: AtomicU64::new(initial_secs),
        }
    }
}

impl Clock for MockClock {
    fn now(&self) -> SystemTime {
        // Each reading moves one second forward so snapshots differ in time.
        SystemTime::UNIX_EPOCH + Duration::from_secs(self.secs.fetch_add(1, Ordering::SeqCst))
    }
}

/// Mock interface source: pops scripted results, then repeats `fallback`.
pub struct MockSource {
    scripted: Mutex<VecDeque<Result<Vec<InterfaceAddress>, EnumerationError>>>,
    fallback: Vec<InterfaceAddress>,
    calls: AtomicUsize,
}

impl MockSource {
    pub fn fixed(entries: Vec<InterfaceAddress>) -> Self {
        Self::scripted(vec![], entries)
    }

    pub fn scripted(
        results: Vec<Result<Vec<InterfaceAddress>, EnumerationError>>,
        fallback: Vec<InterfaceAddress>,
    ) -> Self {
        Self {
            scripted: Mutex::new(results.into()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl InterfaceSource for MockSource {
    fn enumerate(&self) -> Result<Vec<InterfaceAddress>, EnumerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.scripted
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

impl InterfaceSource for std::sync::Arc<MockSource> {
    fn enumerate(&self) -> Result<Vec<InterfaceAddress>, EnumerationError> {
        self.as_ref().enumerate()
    }
}

/// Scripted reply of the mock HTTP client.
#[derive(Debug, Clone)]
pub enum Reply {
    Body(&'static str),
    Status(u16),
    Fail,
    Hang,
}

/// Mock HTTP client: pops scripted replies, then repeats `fallback`.
pub struct MockClient {
    scripted: Mutex<VecDeque<Reply>>,
    fallback: Reply,
    calls: AtomicUsize,
}

impl MockClient {
    pub fn fixed(reply: Reply) -> Self {
        Self::scripted(vec![], reply)
    }

    pub fn scripted(replies: Vec<Reply>, fallback: Reply) -> Self {
        Self {
            scripted: Mutex::new(replies.into()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_reply(&self) -> Reply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.scripted
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl HttpClient for MockClient {
    async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        match self.next_reply() {
            Reply::Body(body) => Ok(HttpResponse::new(
                http::StatusCode::OK,
                body.as_bytes().to_vec(),
            )),
            Reply::Status(code) => Ok(HttpResponse::new(
                http::StatusCode::from_u16(code).unwrap(),
                Vec::new(),
            )),
            Reply::Fail => Err(HttpError::Connection(Box::new(std::io::Error::other(
                "connection refused",
            )))),
            Reply::Hang => std::future::pending().await,
        }
    }
}

impl HttpClient for std::sync::Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.as_ref().request(req).await
    }
}

pub type TestEngine<S = MockSource, H = MockClient> = RefreshEngine<S, H, MockClock>;

/// Builds an engine over the given mocks with the reference timings.
pub fn engine<S, H>(source: S, client: H) -> TestEngine<S, H>
where
    S: InterfaceSource,
    H: HttpClient,
{
    engine_with_interval(source, client, INTERVAL)
}

pub fn engine_with_interval<S, H>(source: S, client: H, interval: Duration) -> TestEngine<S, H>
where
    S: InterfaceSource,
    H: HttpClient,
{
    RefreshEngine::with_clock(
        LocalAddressProbe::new(source),
        ExternalAddressProbe::new(
            client,
            url::Url::parse("http://ifconfig.me/ip").unwrap(),
            TIMEOUT,
        ),
        MockClock::new(1_000),
        interval,
    )
}

/// `{eth0: 192.168.1.10, lo: 127.0.0.1}`.
pub fn home_interfaces() -> Vec<InterfaceAddress> {
    vec![
        InterfaceAddress::new("eth0", "192.168.1.10".parse().unwrap()),
        InterfaceAddress::new("lo", "127.0.0.1".parse().unwrap()),
    ]
}

pub fn v4(addr: &str) -> Ipv4Addr {
    addr.parse().unwrap()
}
