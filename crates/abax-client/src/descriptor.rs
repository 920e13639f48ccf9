//! Declarative endpoint definitions.
//!
//! A [`CallDescriptor`] captures everything the executor needs to know
//! about one endpoint: method, path, how to derive the query string and
//! body from the call input, and how to parse a successful response. It is
//! plain data, built once per endpoint and shared by every call.

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::query::QueryParams;
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::HttpResponse;

/// How the request path is produced.
pub enum PathSpec<I> {
    /// A fixed path such as `v1/vehicles`.
    Static(&'static str),
    /// A path rendered from the call input, such as `v2/equipment/{id}`.
    Template(fn(&I) -> String),
}

impl<I> PathSpec<I> {
    fn render(&self, input: &I) -> String {
        match self {
            PathSpec::Static(path) => (*path).to_string(),
            PathSpec::Template(render) => render(input),
        }
    }
}

/// Immutable description of one API endpoint taking `I` and returning `O`.
pub struct CallDescriptor<I, O> {
    method: RequestMethod,
    path: PathSpec<I>,
    query: Option<fn(&I) -> QueryParams>,
    form: Option<fn(&I) -> QueryParams>,
    parser: fn(&HttpResponse) -> Result<O>,
}

impl<I, O> std::fmt::Debug for CallDescriptor<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallDescriptor")
            .field("method", &self.method)
            .field("path", &self.path_label())
            .field("query", &self.query.is_some())
            .field("form", &self.form.is_some())
            .finish()
    }
}

impl<I> CallDescriptor<I, ()> {
    /// Start describing a GET endpoint with a fixed path.
    pub fn get(path: &'static str) -> CallDescriptorBuilder<I> {
        CallDescriptorBuilder::new(RequestMethod::Get, PathSpec::Static(path))
    }

    /// Start describing a GET endpoint whose path depends on the input.
    pub fn get_with(path: fn(&I) -> String) -> CallDescriptorBuilder<I> {
        CallDescriptorBuilder::new(RequestMethod::Get, PathSpec::Template(path))
    }

    /// Start describing a POST endpoint with a fixed path.
    pub fn post(path: &'static str) -> CallDescriptorBuilder<I> {
        CallDescriptorBuilder::new(RequestMethod::Post, PathSpec::Static(path))
    }
}

impl<I, O> CallDescriptor<I, O> {
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// The path for logging: the literal path, or `<templated>`.
    pub fn path_label(&self) -> &'static str {
        match self.path {
            PathSpec::Static(path) => path,
            PathSpec::Template(_) => "<templated>",
        }
    }

    /// Build the unauthenticated request for `input` against `base_url`.
    pub fn build_request(&self, base_url: &str, input: &I) -> RequestBuilder {
        let path = self.path.render(input);
        let url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        let mut request = RequestBuilder::new(self.method, url);
        if let Some(query) = self.query {
            request = request.query_pairs(query(input).into_pairs());
        }
        if let Some(form) = self.form {
            request = request.form(form(input).into_pairs());
        }
        request
    }

    /// Parse a successful response.
    pub fn parse(&self, response: &HttpResponse) -> Result<O> {
        (self.parser)(response)
    }
}

/// Builder returned by [`CallDescriptor::get`] and friends. Finished by
/// choosing a response parser.
pub struct CallDescriptorBuilder<I> {
    method: RequestMethod,
    path: PathSpec<I>,
    query: Option<fn(&I) -> QueryParams>,
    form: Option<fn(&I) -> QueryParams>,
}

impl<I> CallDescriptorBuilder<I> {
    fn new(method: RequestMethod, path: PathSpec<I>) -> Self {
        Self {
            method,
            path,
            query: None,
            form: None,
        }
    }

    /// Derive the query string from the input.
    pub fn query(mut self, query: fn(&I) -> QueryParams) -> Self {
        self.query = Some(query);
        self
    }

    /// Derive a form-encoded body from the input.
    pub fn form(mut self, form: fn(&I) -> QueryParams) -> Self {
        self.form = Some(form);
        self
    }

    /// Deserialize the body as JSON into `O`.
    pub fn parse_json<O: DeserializeOwned>(self) -> CallDescriptor<I, O> {
        self.parse_with(HttpResponse::json::<O>)
    }

    /// Use a custom parser.
    pub fn parse_with<O>(self, parser: fn(&HttpResponse) -> Result<O>) -> CallDescriptor<I, O> {
        CallDescriptor {
            method: self.method,
            path: self.path,
            query: self.query,
            form: self.form,
            parser,
        }
    }
}
