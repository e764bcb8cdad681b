// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::borrow::Cow;

use http::header::HeaderName;
use http::uri::Authority;
use http::HeaderMap;
use http::Method;
use http::Uri;

use crate::time::DateTime;
use crate::{Error, Result};

/// Signing context for one request attempt.
///
/// Build a new one for every attempt: headers that take part in the
/// signature (a `range` header in particular) can change between attempts of
/// the same logical request.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP authority, used as `host` when no host header is set.
    pub authority: Option<Authority>,
    /// HTTP path as sent on the wire, `/` when the uri has none.
    pub path: String,
    /// HTTP query parameters, percent decoded.
    pub query: Vec<(String, String)>,
    /// HTTP headers the attempt will send.
    pub headers: HeaderMap,
    /// Signing time.
    pub time: DateTime,
}

impl SigningRequest {
    /// Build a signing context from method, uri and headers.
    pub fn new(method: Method, uri: &Uri, headers: HeaderMap, time: DateTime) -> Self {
        let path = match uri.path() {
            "" => "/".to_string(),
            v => v.to_string(),
        };

        SigningRequest {
            method,
            authority: uri.authority().cloned(),
            path,
            query: uri
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),
            headers,
            time,
        }
    }

    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &http::request::Parts, time: DateTime) -> Self {
        Self::new(
            parts.method.clone(),
            &parts.uri,
            parts.headers.clone(),
            time,
        )
    }

    /// Get the path percent decoded.
    pub fn path_percent_decoded(&self) -> Result<Cow<'_, str>> {
        percent_encoding::percent_decode_str(&self.path)
            .decode_utf8()
            .map_err(|e| {
                Error::invalid_signing_input(format!(
                    "path {:?} is not valid utf-8 after percent decoding",
                    self.path
                ))
                .with_source(e)
            })
    }

    /// Get header value by name.
    ///
    /// Multiple values of the same header are joined with `,` in the order
    /// they were inserted. Returns `None` if header not found.
    pub fn header_get(&self, key: &HeaderName) -> Result<Option<String>> {
        let mut values = self.headers.get_all(key).iter().peekable();
        if values.peek().is_none() {
            return Ok(None);
        }

        let mut s = String::new();
        for (idx, v) in values.enumerate() {
            if idx != 0 {
                s.push(',');
            }
            s.push_str(Self::header_value_normalize(v.to_str()?));
        }

        Ok(Some(s))
    }

    /// Normalize header value by trimming leading and trailing whitespace.
    ///
    /// Whitespace inside the value is kept as is.
    pub fn header_value_normalize(v: &str) -> &str {
        v.trim_matches(|c| c == ' ' || c == '\t')
    }
}
