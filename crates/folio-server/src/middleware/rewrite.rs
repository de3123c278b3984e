//! Edge `.html` rewrite applied before routing.

use axum::extract::Request;
use axum::http::Uri;
use axum::http::uri::PathAndQuery;
use folio_site::rewrite_uri;

/// Rewrite the request path with [`rewrite_uri`], keeping the query.
///
/// Paths ending in `/` are left alone so directory-style routes keep
/// working.
pub(crate) fn rewrite_request(mut request: Request) -> Request {
    let uri = request.uri();
    let path = uri.path();
    if path.ends_with('/') {
        return request;
    }

    let rewritten = rewrite_uri(path);
    if rewritten == path {
        return request;
    }

    let path_and_query = match uri.query() {
        Some(query) => format!("{rewritten}?{query}"),
        None => rewritten.into_owned(),
    };

    let mut parts = uri.clone().into_parts();
    match PathAndQuery::try_from(path_and_query) {
        Ok(path_and_query) => parts.path_and_query = Some(path_and_query),
        Err(err) => {
            tracing::warn!(error = %err, "Skipping .html rewrite");
            return request;
        }
    }

    match Uri::from_parts(parts) {
        Ok(new_uri) => *request.uri_mut() = new_uri,
        Err(err) => tracing::warn!(error = %err, "Skipping .html rewrite"),
    }
    request
}

/// Leave the request untouched.
pub(crate) fn passthrough(request: Request) -> Request {
    request
}
