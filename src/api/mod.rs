// HTTP surface: the tarpit endpoint, status page, landing page, health and
// metrics.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use bytes::Bytes;
use serde::Serialize;

use crate::chain::graph::ChainGraph;
use crate::chain::links::{compose_link_set, random_word};
use crate::chain::rng::{hash_seed, next};
use crate::chain::walker::write_text;
use crate::chain::{
    ChainSet, ANCHOR_WORDS, BUFFER_SIZE, LINK_COUNT, LINK_WORDS, PARAGRAPH_COUNT, POISON,
    URL_PREFIX, WORD_COUNT,
};
use crate::metrics;
use crate::stats::{format_count, format_duration, Stats};

/// Shared style block used by every page.
const PAGE_STYLE: &str = "body {color: white; background-color: black}\
div {max-width: 40em; margin: auto;}\
h3, h1 {text-align: center}\
a {color: cyan;}";

/// Literal zero-length chunk marker appended to every streamed body, on top
/// of the transport's own chunk framing. Crawlers are welcome to choke on
/// both.
const CHUNK_TRAILER: &str = "0\r\n\r\n";

// ── Shared application state ─────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    pub chains: ChainSet,
    pub stats: Arc<Stats>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(get_metrics))
        .route("/", get(get_root))
        .route("/babble", get(handle_babble))
        .route("/babble/", get(handle_babble))
        .route("/babble/{*rest}", get(handle_babble))
        .with_state(state)
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    service: &'static str,
}

async fn health_check() -> Json<Health> {
    Json(Health {
        status: "ok",
        service: "babbler",
    })
}

async fn get_metrics() -> String {
    metrics::gather_metrics()
}

/// Landing page: a plain front door carrying the deterministic link set that
/// lures crawlers into the tarpit.
async fn get_root(State(state): State<AppState>, uri: Uri) -> Html<String> {
    metrics::PAGES_SERVED_TOTAL.with_label_values(&["root"]).inc();

    let mut body = String::from("<html><head><style>");
    body.push_str(PAGE_STYLE);
    body.push_str("</style><title>Babbler</title></head><body>");
    body.push_str("<h1>Babbler</h1><h3>Recommended reading:</h3><div>");
    if let Some(chains) = state.chains.get().filter(|chains| !chains.is_empty()) {
        for link in compose_link_set(&chains, uri.path()) {
            body.push_str("<a href=");
            body.push_str(&link.href);
            body.push_str(" >");
            body.push_str(&link.title);
            body.push_str("</a><br/>");
        }
    }
    body.push_str("</div></body></html>");
    Html(body)
}

// ── Tarpit handler ───────────────────────────────────────────────────

/// Serve one generated page (or the statistics page) as a chunked stream.
async fn handle_babble(State(state): State<AppState>, uri: Uri) -> Response {
    state.stats.record_request();

    let path = uri.path().to_string();

    // First digit anywhere in the path is the crawl counter.
    let ctr = path
        .bytes()
        .find(|b| b.is_ascii_digit())
        .map(|b| (b - b'0') as u32)
        .unwrap_or(0);

    // Readiness is checked before any header is committed, so the retryable
    // status actually reaches the wire. An empty published set gates the
    // same way: chain selection needs at least one chain.
    let chains = match state.chains.get() {
        Some(chains) if !chains.is_empty() => chains,
        _ => {
            metrics::PAGES_SERVED_TOTAL
                .with_label_values(&["loading"])
                .inc();
            return (
                StatusCode::TOO_MANY_REQUESTS,
                Html("<html><body>Still loading...</body></html>"),
            )
                .into_response();
        }
    };

    let stream = if path == "/babble/status" || path.starts_with("/babble/status/") {
        metrics::PAGES_SERVED_TOTAL
            .with_label_values(&["status"])
            .inc();
        status_stream(state.stats.clone())
    } else {
        metrics::PAGES_SERVED_TOTAL
            .with_label_values(&["babble"])
            .inc();
        babble_stream(chains, path, ctr)
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html")
        .header(header::TRANSFER_ENCODING, "chunked")
        .body(Body::from_stream(stream))
        .expect("static response parts")
}

type ChunkStream = std::pin::Pin<Box<dyn futures_core::Stream<Item = Result<Bytes, Infallible>> + Send>>;

/// Stream a generated page: seeded title, paragraphs, optional poison block,
/// and counter-incrementing links, flushed in chunks of at most
/// [`BUFFER_SIZE`] accumulated bytes.
fn babble_stream(chains: Arc<Vec<ChainGraph>>, path: String, ctr: u32) -> ChunkStream {
    Box::pin(async_stream::stream! {
        let mut seed = hash_seed(&path);
        let graph = &chains[next(&mut seed) as usize % chains.len()];

        // What do we write about?
        let topics = [
            random_word(graph, &mut seed).to_uppercase(),
            random_word(graph, &mut seed).to_uppercase(),
        ];

        let mut buf = String::with_capacity(BUFFER_SIZE + 512);
        buf.push_str(
            "<html><head><meta http-equiv='Content-Type' \
             content='text/html; charset=UTF-8' /><style>",
        );
        buf.push_str(PAGE_STYLE);
        buf.push_str("</style><title>");
        buf.push_str(&topics[0]);
        buf.push(' ');
        buf.push_str(&topics[1]);
        buf.push_str("</title></head><body><h1>");
        buf.push_str(&topics[0]);
        buf.push(' ');
        buf.push_str(&topics[1]);
        buf.push_str("</h1><h3>Garbage for the garbage king!</h3><div>");

        for _ in 0..PARAGRAPH_COUNT {
            buf.push_str("<p>");
            write_text(graph, WORD_COUNT, &mut buf, &mut seed);
            buf.push_str(".</p>");
            if buf.len() >= BUFFER_SIZE {
                yield Ok(Bytes::from(std::mem::take(&mut buf)));
            }
        }

        // Bonus payload on roughly one page in four.
        if next(&mut seed) % 4 == 0 {
            buf.push_str("<p>");
            buf.push_str(POISON);
            buf.push_str("</p>");
        }

        for _ in 0..LINK_COUNT {
            buf.push_str("<a href=");
            buf.push_str(URL_PREFIX);
            for word in 0..LINK_WORDS {
                if word > 0 {
                    buf.push('/');
                }
                buf.push_str(random_word(graph, &mut seed));
            }
            // The embedded counter is what keeps a naive crawler finding
            // "new" pages forever.
            buf.push_str(&format!("/{}/", ctr + 1));
            buf.push_str(" >");
            write_text(graph, ANCHOR_WORDS, &mut buf, &mut seed);
            buf.push_str("</a><br/>");
            if buf.len() >= BUFFER_SIZE {
                yield Ok(Bytes::from(std::mem::take(&mut buf)));
            }
        }

        buf.push_str("</div></body></html>");
        buf.push_str(CHUNK_TRAILER);
        yield Ok(Bytes::from(buf));
    })
}

/// Stream the live statistics page.
fn status_stream(stats: Arc<Stats>) -> ChunkStream {
    Box::pin(async_stream::stream! {
        let elapsed = stats.uptime_seconds();
        let requests = stats.requests_served();
        let bytes = stats.bytes_served();

        let mut buf = String::from("<html><head><style>");
        buf.push_str(PAGE_STYLE);
        buf.push_str("</style><title>Babbler status</title></head><body>");
        buf.push_str("<h1>Babbler stats:</h1>");
        buf.push_str("<div><p>In the past <b>");
        buf.push_str(&format_duration(elapsed));
        // CPU time is not tracked separately; wall time is shown twice.
        buf.push_str("</b>I've spent <b>");
        buf.push_str(&format_duration(elapsed));
        buf.push_str("</b>dealing with: <b>");
        buf.push_str(&format_count(requests, false));
        buf.push_str("</b>requests and serving <b>");
        buf.push_str(&format_count(bytes, true));
        // The rate prefix dangles unfinished when uptime rounds to zero.
        buf.push_str("B</b> of garbage.<br><br>... at an average rate of <b>");

        if elapsed > 0 {
            buf.push_str(&format_count(requests * 60 / elapsed, true));
            buf.push_str("</b>requests per minute and <b>");
            buf.push_str(&format_count(bytes * 60 / elapsed, true));
            buf.push_str("B</b> per minute.<br><br></div>");
        }

        buf.push_str(CHUNK_TRAILER);
        yield Ok(Bytes::from(buf));
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_extraction() {
        // Mirrors the digit scan in handle_babble.
        let first_digit = |path: &str| {
            path.bytes()
                .find(|b| b.is_ascii_digit())
                .map(|b| (b - b'0') as u32)
                .unwrap_or(0)
        };

        assert_eq!(first_digit("/babble/cat/dog/"), 0);
        assert_eq!(first_digit("/babble/cat/3/"), 3);
        // Only the first digit counts, not the whole number.
        assert_eq!(first_digit("/babble/cat/42/"), 4);
        assert_eq!(first_digit("/babble/c4t/7/"), 4);
    }
}
