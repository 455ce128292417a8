use std::future::{Ready, ready};

use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpRequest};

/// The public link the user is browsing, carried between requests in a cookie.
///
/// Handlers that work on "the current link" take this as an argument instead of
/// reading session state themselves.
#[derive(Debug, Clone)]
pub struct PublicLink(String);

impl PublicLink {
    pub const COOKIE_NAME: &'static str = "public_link";

    pub fn new(link: impl Into<String>) -> Self {
        Self(link.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Cookie that makes `self` the browsing context of subsequent requests.
    pub fn to_cookie(&self) -> Cookie<'static> {
        Cookie::build(Self::COOKIE_NAME, self.0.clone())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish()
    }
}

impl FromRequest for PublicLink {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let link = req
            .cookie(Self::COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty());

        ready(match link {
            Some(link) => Ok(PublicLink(link)),
            None => Err(actix_web::error::ErrorBadRequest(
                "No public link submitted yet",
            )),
        })
    }
}
