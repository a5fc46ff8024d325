use crate::api::routes;
use crate::config::SharedConfig;
use crate::error::Error;
use crate::generator::SubdomainGenerator;
use crate::store::DynStore;
use std::future::Future;
use std::sync::Arc;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub store: DynStore,
    pub generator: Arc<SubdomainGenerator>,
    /// Shared connection pool; per-account provider clients are built on top
    /// of it with the account's API key.
    pub http: reqwest::Client,
}

pub fn new(
    config: SharedConfig,
    store: DynStore,
) -> Result<impl Future<Output = hyper::Result<()>>, Error> {
    let http = reqwest::Client::builder()
        .timeout(config.provider_timeout)
        .build()?;
    let generator = Arc::new(config.generator());
    let state = AppState {
        config: config.clone(),
        store,
        generator,
        http,
    };
    Ok(axum::Server::bind(&config.api_bind_addr).serve(routes::new(state).into_make_service()))
}
