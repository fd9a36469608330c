use crate::api::Endpoint;
use crate::error::{Error, ErrorKind};
use crate::source::{Source, TargetSource};

/// Views of the application, as matched by the router.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Route {
    Home,
    Taxonomy { id: u64 },
    Product { id: String },
    Scratch { id: u64 },
    Lucky,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Taxonomy { id } => format!("/taxonomy/{}", id),
            Route::Product { id } => format!("/product/{}", id),
            Route::Scratch { id } => format!("/scratch/{}", id),
            Route::Lucky => "/lucky".to_string(),
        }
    }

    /// The endpoint whose payload the view renders. `/lucky` only redirects.
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            Route::Home => Some(Endpoint::Taxonomy(None)),
            Route::Taxonomy { id } => Some(Endpoint::Taxonomy(Some(*id))),
            Route::Product { id } => Some(Endpoint::Product(id.clone())),
            Route::Scratch { id } => Some(Endpoint::Scratchpad(*id)),
            Route::Lucky => None,
        }
    }

    pub fn target(&self, api_base_url: &str) -> Result<String, Error> {
        match self.endpoint() {
            Some(endpoint) => endpoint.url(api_base_url),
            None => Err(Error::new(
                ErrorKind::InvalidTarget,
                format!("route {} has no api endpoint", self.path()),
            )),
        }
    }
}

/// Target source following the current route, for views whose payload
/// depends on their route parameter.
pub fn track_route(route: &Source<Route>, api_base_url: String) -> impl TargetSource {
    route.track(move |route: &Route| route.target(&api_base_url))
}
