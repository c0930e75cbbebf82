use poem::error::{
    MethodNotAllowedError, NotFoundError, ParseCookieError, ParseFormError, ParsePathError,
    ParseQueryError,
};
use poem::http::StatusCode;
use poem::{Endpoint, Error, IntoResponse, Middleware, Request, Response, Result};

use crate::prelude::*;

/// Converts the errors escaping the handlers into bare status responses.
pub struct ErrorMiddleware;

impl<E: Endpoint<Output = Response>> Middleware<E> for ErrorMiddleware {
    type Output = ErrorMiddlewareImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        ErrorMiddlewareImpl { ep }
    }
}

pub struct ErrorMiddlewareImpl<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint<Output = Response>> Endpoint for ErrorMiddlewareImpl<E> {
    type Output = Response;

    async fn call(&self, request: Request) -> Result<Self::Output> {
        let method = request.method().clone();
        let uri = request.uri().clone();
        match self.ep.call(request).await {
            Err(error) => {
                let status = status_of(&error);
                if status.is_server_error() {
                    error!(?method, ?uri, %status, "{:#}", error);
                } else {
                    info!(?method, ?uri, %status, "{:#}", error);
                }
                Ok(status.into_response())
            }
            result => result,
        }
    }
}

fn status_of(error: &Error) -> StatusCode {
    if error.is::<NotFoundError>() {
        StatusCode::NOT_FOUND
    } else if error.is::<MethodNotAllowedError>() {
        StatusCode::METHOD_NOT_ALLOWED
    } else if error.is::<ParseFormError>()
        || error.is::<ParseQueryError>()
        || error.is::<ParsePathError>()
        || error.is::<ParseCookieError>()
    {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
