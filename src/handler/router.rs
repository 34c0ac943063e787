//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for route matching,
//! method validation, and access logging.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::RouteTable;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let query = req.uri().query().map(ToOwned::to_owned);
    let http_version = version_string(req.version());
    let referer = header_value(&req, "referer");
    let user_agent = header_value(&req, "user-agent");

    let response = dispatch(&method, &path, &state.routes);

    if state.config.logging.access_log {
        let entry = AccessLogEntry {
            remote_addr: peer_addr.ip().to_string(),
            time: chrono::Local::now(),
            method: method.to_string(),
            path,
            query,
            http_version,
            status: response.status().as_u16(),
            body_bytes: body_len(&response),
            referer,
            user_agent,
            request_time_us: u64::try_from(started.elapsed().as_micros())
                .unwrap_or(u64::MAX),
        };
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Produce the response for a single request.
///
/// The route table is consulted with the exact URI path; the query string
/// never participates in matching. Two-branch fallback: a known path with
/// a method other than GET yields 405, an unknown path yields 404 for any
/// method.
#[must_use]
pub fn dispatch(method: &Method, path: &str, routes: &RouteTable) -> Response<Full<Bytes>> {
    match routes.lookup(path) {
        Some(route) if *method == Method::GET => http::build_text_response(route.body),
        Some(_) => {
            logger::log_warning(&format!("Method not allowed: {method} {path}"));
            http::build_405_response()
        }
        None => http::build_404_response(),
    }
}

/// Exact body size of an outgoing response
fn body_len(response: &Response<Full<Bytes>>) -> usize {
    response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}

/// HTTP version rendered the way access logs expect it ("1.1", "2")
fn version_string(version: hyper::Version) -> String {
    let debug = format!("{version:?}");
    debug.strip_prefix("HTTP/").unwrap_or(&debug).to_owned()
}

fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
