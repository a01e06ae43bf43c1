//! Static route table.
//!
//! Routes are matched on the exact path first and then on method, so a
//! known path with the wrong method is a 405 and an unknown path is a 404
//! whatever the method.

use crate::device::{ActuatorCommand, DeviceSnapshot};
use crate::http::request::{Method, Request};
use crate::http::response::Response;

/// A route handler. Pure: everything it may look at is passed in, and any
/// hardware effect is expressed through the returned command.
pub type Handler = fn(&Request, &DeviceSnapshot) -> (Response, ActuatorCommand);

pub struct Route {
    pub method: Method,
    pub path: &'static str,
    pub handler: Handler,
}

#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler. If a method and path pair is registered twice,
    /// the first registration wins.
    pub fn route(mut self, method: Method, path: &'static str, handler: Handler) -> Self {
        self.routes.push(Route { method, path, handler });
        self
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn dispatch(&self, req: &Request, snapshot: &DeviceSnapshot) -> (Response, ActuatorCommand) {
        let mut on_path = self.routes.iter().filter(|r| r.path == req.path).peekable();

        if on_path.peek().is_none() {
            return (Response::not_found(), ActuatorCommand::NoChange);
        }

        let mut allowed = Vec::new();
        for route in on_path {
            if route.method == req.method {
                return (route.handler)(req, snapshot);
            }
            allowed.push(route.method.as_str());
        }

        (Response::method_not_allowed(&allowed.join(", ")), ActuatorCommand::NoChange)
    }
}
