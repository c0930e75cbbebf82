use std::net::IpAddr;
use std::str::FromStr;

use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, CookieJarManager, Tracing};
use poem::{get, Endpoint, EndpointExt, Response, Route, Server};

use crate::opts::WebOpts;
use crate::predictor::ModelLoader;
use crate::prelude::*;
use crate::web::middleware::{
    ErrorMiddleware, SecurityHeadersMiddleware, SentryMiddleware, TimeItMiddleware,
};
use crate::web::state::State;

mod cookies;
mod middleware;
mod partials;
mod session;
mod state;
mod views;

pub async fn run(opts: WebOpts) -> Result {
    sentry::configure_scope(|scope| scope.set_tag("app", "web"));

    let loader = ModelLoader::new(&opts.model_path);
    if opts.preload {
        loader.load().await.context("failed to preload the model")?;
    } else if let Err(error) = loader.load().await {
        warn!("the model will be loaded on demand: {:#}", error);
    }

    let state = State::new(loader, opts.presentation, opts.image_path, opts.session_ttl)?;
    info!(host = opts.host.as_str(), port = opts.port, "listening…");
    Server::new(TcpListener::bind((IpAddr::from_str(&opts.host)?, opts.port)))
        .run(create_app(state))
        .await
        .context("the web server has failed")
}

fn create_app(state: State) -> impl Endpoint<Output = Response> {
    Route::new()
        .at("/", get(views::index::get).post(views::index::post))
        .at("/sketch", get(views::r#static::get_sketch))
        .at("/health", get(views::api::get_health))
        .data(state)
        .with(CookieJarManager::new())
        .with(Tracing)
        .with(CatchPanic::new())
        .with(ErrorMiddleware)
        .with(TimeItMiddleware)
        .with(SecurityHeadersMiddleware)
        .with(SentryMiddleware)
}
