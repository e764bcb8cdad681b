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

use std::collections::BTreeMap;
use std::fmt::Write;

use http::header::{CONTENT_TYPE, HOST, RANGE};
use log::debug;
use percent_encoding::utf8_percent_encode;
use s3sign_core::hash::hex_sha256;
use s3sign_core::time::format_iso8601;
use s3sign_core::{Error, Result, SigningRequest};

use crate::constants::*;
use crate::ByteRange;

/// CanonicalRequest is the normalized text SigV4 hashes.
///
/// ```text
/// METHOD
/// PATH
/// QUERY
/// header1:value1
/// header2:value2
///
/// header1;header2
/// PAYLOAD_HASH
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    text: String,
    signed_headers: String,
    hash: String,
}

impl CanonicalRequest {
    /// Build the canonical request.
    ///
    /// `host` and `x-amz-date` are always signed, `x-amz-security-token` is
    /// added when `session_token` is set.
    pub fn build(req: &SigningRequest, session_token: Option<&str>) -> Result<Self> {
        let headers = canonical_headers(req, session_token)?;
        let signed_headers = headers.keys().map(String::as_str).collect::<Vec<_>>().join(";");
        let payload_hash = headers
            .get(X_AMZ_CONTENT_SHA_256)
            .map(String::as_str)
            .unwrap_or(EMPTY_STRING_SHA256);

        // 256 is specially chosen to avoid reallocation for most requests.
        let mut f = String::with_capacity(256);
        writeln!(f, "{}", req.method)?;
        writeln!(f, "{}", canonical_path(req)?)?;
        writeln!(f, "{}", canonical_query(req))?;
        for (name, value) in headers.iter() {
            writeln!(f, "{name}:{value}")?;
        }
        writeln!(f)?;
        writeln!(f, "{signed_headers}")?;
        write!(f, "{payload_hash}")?;

        // The text may carry the session token, only log its hash.
        let hash = hex_sha256(f.as_bytes());
        debug!("calculated canonical request hash: {hash}, signed headers: {signed_headers}");

        Ok(Self {
            text: f,
            signed_headers,
            hash,
        })
    }

    /// The canonical request text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Semicolon separated, sorted names of the signed headers.
    pub fn signed_headers(&self) -> &str {
        &self.signed_headers
    }

    /// Hex encoded SHA256 of the canonical request text.
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

/// Headers taking part in the signature.
///
/// Everything else (`user-agent`, `accept`, ...) is sent unsigned.
fn is_signed_header(name: &str) -> bool {
    name == HOST
        || name == RANGE
        || name == CONTENT_TYPE
        || name == CONTENT_MD5
        || name.starts_with(X_AMZ_PREFIX)
}

/// Collect signed headers, sorted by name.
///
/// `http::HeaderName` is always lower-case, so `BTreeMap` order is the byte
/// wise order SigV4 requires.
fn canonical_headers(
    req: &SigningRequest,
    session_token: Option<&str>,
) -> Result<BTreeMap<String, String>> {
    let mut headers = BTreeMap::new();
    for name in req.headers.keys() {
        if !is_signed_header(name.as_str()) {
            continue;
        }
        if let Some(value) = req.header_get(name)? {
            headers.insert(name.as_str().to_string(), value);
        }
    }

    // Insert HOST header if not present.
    if !headers.contains_key(HOST.as_str()) {
        let authority = req.authority.as_ref().ok_or_else(|| {
            Error::invalid_signing_input("request without host is invalid for signing")
        })?;
        headers.insert(HOST.as_str().to_string(), authority.as_str().to_string());
    }
    if headers.get(HOST.as_str()).is_some_and(|v| v.is_empty()) {
        return Err(Error::invalid_signing_input("host header must not be empty"));
    }

    // Insert DATE header if not present, an existing one must agree with the
    // signing time or the server will reject the signature.
    let date = format_iso8601(req.time);
    match headers.get(X_AMZ_DATE) {
        Some(v) if v != &date => {
            return Err(Error::invalid_signing_input(format!(
                "x-amz-date {v} doesn't match signing time {date}"
            )))
        }
        Some(_) => {}
        None => {
            headers.insert(X_AMZ_DATE.to_string(), date);
        }
    }

    if let Some(range) = headers.get(RANGE.as_str()) {
        range.parse::<ByteRange>()?;
    }

    if let Some(token) = session_token {
        headers.insert(X_AMZ_SECURITY_TOKEN.to_string(), token.to_string());
    }

    Ok(headers)
}

/// Percent decode then encode the path with the S3 encode set.
fn canonical_path(req: &SigningRequest) -> Result<String> {
    let path = req.path_percent_decoded()?;
    if path.is_empty() {
        return Ok("/".to_string());
    }

    Ok(utf8_percent_encode(&path, &AWS_URI_ENCODE_SET).to_string())
}

/// Encode every query pair, then sort by encoded name and value.
fn canonical_query(req: &SigningRequest) -> String {
    let mut query = req
        .query
        .iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect::<Vec<_>>();
    query.sort();

    query
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}
