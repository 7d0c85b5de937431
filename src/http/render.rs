//! Response rendering.
//!
//! Turns a [`Reply`] into status, headers and body. Every value interpolated
//! into the go-get document is HTML-escaped.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::http::classify::{GoImport, Reply};

pub const ROBOTS_TXT: &str = "# Welcome to Shrt\nUser-Agent: *\nDisallow:\n";

/// Render the go-get document.
pub fn go_get_document(import: &GoImport) -> String {
    let content = import.meta_content();
    let link = import.doc_link();
    let shown = link
        .strip_prefix("https://")
        .or_else(|| link.strip_prefix("http://"))
        .unwrap_or(&link);

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\"/>\n\
         <meta name=\"go-import\" content=\"{content}\">\n\
         <meta http-equiv=\"refresh\" content=\"0; url={link}\">\n\
         </head>\n\
         <body>\n\
         Redirecting to docs at <a href=\"{link}\">{shown}</a>...\n\
         </body>\n\
         </html>\n",
        content = attr(&content),
        link = attr(&link),
        shown = text(shown),
    )
}

fn redirect(status: StatusCode, location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (status, [(header::LOCATION, value)], "Redirecting\n").into_response(),
        Err(_) => {
            tracing::error!(location = %location, "Redirect target is not a valid header value");
            (StatusCode::INTERNAL_SERVER_ERROR, "Bad redirect target\n").into_response()
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Robots => (
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                ROBOTS_TXT,
            )
                .into_response(),
            Reply::BareRedirect { location } => redirect(StatusCode::FOUND, &location),
            Reply::ShortLink { location } => redirect(StatusCode::MOVED_PERMANENTLY, &location),
            Reply::GoGet(import) => Html(go_get_document(&import)).into_response(),
            Reply::NotFound => (StatusCode::NOT_FOUND, "Not found\n").into_response(),
            Reply::Forbidden => (StatusCode::FORBIDDEN, "Request path not allowed\n").into_response(),
            Reply::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed\n").into_response()
            }
        }
    }
}
