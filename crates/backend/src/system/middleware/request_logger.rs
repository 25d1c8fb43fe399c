use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use crate::shared::format::format_number;

/// Console line per HTTP request: timestamp (UTC), duration, response
/// size, status code, method and path.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // The body is buffered to report its real size
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(_) => {
            let duration = start.elapsed();
            println!(
                "\x1b[33m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
                Utc::now().format("%H:%M:%S"),
                duration.as_millis(),
                "error",
                parts.status.as_u16(),
                method,
                uri.path()
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let size = bytes.len();
    let duration = start.elapsed();

    // Cyan timestamp for 200, yellow for everything else
    let color_code = if parts.status.as_u16() == 200 {
        "36"
    } else {
        "33"
    };

    println!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        color_code,
        Utc::now().format("%H:%M:%S"),
        duration.as_millis(),
        format_number(size),
        parts.status.as_u16(),
        method,
        uri.path()
    );

    Response::from_parts(parts, Body::from(bytes))
}
