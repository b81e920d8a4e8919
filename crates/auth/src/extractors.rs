//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! Both extractors read headers only, so they resolve before any body
//! extractor and an anonymous caller sees 401 ahead of a 400.

use std::{convert::Infallible, marker::PhantomData};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::backend::AuthBackend;
use crate::error::AuthError;
use crate::principal::Principal;

/// Message returned to anonymous callers of a protected route
pub trait AuthPrompt {
    const MESSAGE: &'static str;
}

/// Generic prompt used when a route doesn't name its own
#[derive(Debug)]
pub struct Unauthorized;

impl AuthPrompt for Unauthorized {
    const MESSAGE: &'static str = "Unauthorized";
}

/// Authenticated user extractor; rejects anonymous requests with 401
#[derive(Debug)]
pub struct AuthUser<P: AuthPrompt = Unauthorized> {
    pub principal: Principal,
    _prompt: PhantomData<P>,
}

impl<P: AuthPrompt> AuthUser<P> {
    pub fn into_principal(self) -> Principal {
        self.principal
    }
}

impl<S, P> FromRequestParts<S> for AuthUser<P>
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
    P: AuthPrompt,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);

        let principal = backend
            .authenticate(&parts.headers)
            .ok_or(AuthError::Unauthenticated(P::MESSAGE))?;

        Ok(AuthUser {
            principal,
            _prompt: PhantomData,
        })
    }
}

/// Optional session; never rejects
#[derive(Debug)]
pub struct MaybeAuth(pub Option<Principal>);

impl<S> FromRequestParts<S> for MaybeAuth
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);
        Ok(MaybeAuth(backend.authenticate(&parts.headers)))
    }
}
