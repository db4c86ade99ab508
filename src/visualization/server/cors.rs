// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Cross-Origin Resource Sharing (CORS) support
//!
//! This module provides CORS fairing implementation for Rocket to enable
//! cross-origin requests from web clients.

use std::path::PathBuf;

use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::{options, Request, Response};

/// Cross-Origin Resource Sharing (CORS) fairing for Rocket
///
/// This fairing adds CORS headers to all responses from the server, enabling
/// cross-origin requests from web clients. The consumer application is a
/// browser-hosted UI served from a different origin than this relay.
///
/// ### Security Note
///
/// The current implementation uses very permissive settings (`*` for origins
/// and headers). For production environments, consider restricting these to
/// specific origins and headers needed by your application.
pub struct CORS;

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response, // Run after a response has been generated
        }
    }

    /// Modifies responses to include CORS headers
    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        // Allow requests from any origin
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));

        // Allow common HTTP methods
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PUT, DELETE, OPTIONS",
        ));

        // Allow all headers
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));

        // Allow credentials (cookies, etc.)
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

/// Answers to OPTIONS preflight requests
///
/// The response body is empty; the CORS fairing attaches the headers.
#[options("/<_path..>")]
pub async fn options(_path: PathBuf) -> Result<(), std::io::Error> {
    Ok(())
}
