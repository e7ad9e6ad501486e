//! Minimal HTTP server for the topology page.
//!
//! One route: `GET /` builds the graph fresh, renders it to SVG via the
//! external renderer, and returns an HTML page. Each request is independent;
//! nothing is cached or shared between requests beyond the fetcher itself.

use std::convert::Infallible;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::api::TopologyFetcher;
use crate::graph::{build_graph, Thresholds};
use crate::render;

/// Serve the topology page on the given address until the process exits.
pub async fn serve(
    listen: &str,
    fetcher: Arc<dyn TopologyFetcher>,
    thresholds: Thresholds,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(listen).await?;
    info!(address = listen, "serving topology page");

    loop {
        let (stream, peer) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let fetcher = fetcher.clone();
        let thresholds = thresholds.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req| {
                let fetcher = fetcher.clone();
                let thresholds = thresholds.clone();
                async move { handle(req, fetcher, thresholds).await }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                debug!(peer = %peer, error = %e, "connection error");
            }
        });
    }
}

async fn handle(
    req: Request<hyper::body::Incoming>,
    fetcher: Arc<dyn TopologyFetcher>,
    thresholds: Thresholds,
) -> Result<Response<Full<Bytes>>, Infallible> {
    if req.method() != Method::GET || req.uri().path() != "/" {
        return Ok(html_response(StatusCode::NOT_FOUND, "<h1>Not Found</h1>".to_string()));
    }

    let response = match topology_page(fetcher.as_ref(), &thresholds).await {
        Ok(page) => html_response(StatusCode::OK, page),
        Err(e) => html_response(StatusCode::INTERNAL_SERVER_ERROR, error_page(&e.to_string())),
    };
    Ok(response)
}

async fn topology_page(
    fetcher: &dyn TopologyFetcher,
    thresholds: &Thresholds,
) -> anyhow::Result<String> {
    let graph = build_graph(fetcher, thresholds).await?;
    let svg = render::render(&graph.to_dot(), "svg").await?;

    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Pipeline Topology</title></head>\n\
         <body>\n<h1>Pipeline Topology</h1>\n{}\n</body>\n</html>\n",
        String::from_utf8_lossy(&svg)
    ))
}

fn error_page(message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Error</title></head>\n\
         <body>\n<h1>Could not build topology</h1>\n<p>{}</p>\n</body>\n</html>\n",
        html_escape(message)
    )
}

fn html_response(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Full::new(Bytes::from(body)))
        .expect("static response parts are valid")
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
