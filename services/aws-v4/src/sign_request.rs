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

use std::fmt::Write;

use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue};
use log::debug;
use s3sign_core::time::{format_date, format_iso8601};
use s3sign_core::{Error, Result, SignRequest, SigningOutput, SigningRequest};

use crate::constants::{
    AWS4_HMAC_SHA256, AWS4_REQUEST, S3_SERVICE, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN,
};
use crate::{CanonicalRequest, Credential, SigningKey, SigningKeyCache};

/// RequestSigner that implement AWS SigV4.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
#[derive(Debug)]
pub struct RequestSigner {
    service: String,

    cache: Option<SigningKeyCache>,
}

impl Default for RequestSigner {
    fn default() -> Self {
        Self::new(S3_SERVICE)
    }
}

impl RequestSigner {
    /// Create a new signer for AWS V4 with signing key cache enabled.
    pub fn new(service: &str) -> Self {
        Self {
            service: service.into(),

            cache: Some(SigningKeyCache::new()),
        }
    }

    /// Derive the signing key on every request instead of caching it per
    /// day, region and service.
    pub fn without_key_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    fn signing_key(&self, cred: &Credential, date: &str) -> Result<SigningKey> {
        match &self.cache {
            Some(cache) => {
                cache.get_or_derive(&cred.secret_access_key, date, &cred.region, &self.service)
            }
            None => SigningKey::derive(&cred.secret_access_key, date, &cred.region, &self.service),
        }
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;
    type Output = SignatureResult;

    fn sign_request(&self, req: &SigningRequest, cred: &Credential) -> Result<SignatureResult> {
        if cred.region.is_empty() {
            return Err(Error::invalid_signing_input(
                "credential region must not be empty",
            ));
        }

        // canonicalize context
        let creq = CanonicalRequest::build(req, cred.session_token.as_deref())?;

        // Scope: "20220313/<region>/<service>/aws4_request"
        let date = format_date(req.time);
        let scope = format!("{date}/{}/{}/{AWS4_REQUEST}", cred.region, self.service);
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let x_amz_date = format_iso8601(req.time);
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "{AWS4_HMAC_SHA256}")?;
            writeln!(f, "{x_amz_date}")?;
            writeln!(f, "{scope}")?;
            write!(f, "{}", creq.hash())?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signature = self.signing_key(cred, &date)?.sign(&string_to_sign)?;

        Ok(SignatureResult {
            authorization: format!(
                "{AWS4_HMAC_SHA256} Credential={}/{scope}, SignedHeaders={}, Signature={signature}",
                cred.access_key_id,
                creq.signed_headers(),
            ),
            x_amz_date,
            security_token: cred.session_token.clone(),
            signed_headers: creq.signed_headers().to_string(),
            signature,
        })
    }

    fn reset(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }
}

/// Headers produced for one signed request attempt.
///
/// Attach them to the attempt they were computed for and drop them after.
#[derive(Clone, PartialEq, Eq)]
pub struct SignatureResult {
    authorization: String,
    x_amz_date: String,
    security_token: Option<String>,
    signed_headers: String,
    signature: String,
}

impl SignatureResult {
    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    /// Value of the `x-amz-date` header, `YYYYMMDDTHHMMSSZ`.
    pub fn x_amz_date(&self) -> &str {
        &self.x_amz_date
    }

    /// Value of the `x-amz-security-token` header if a session token is set.
    pub fn security_token(&self) -> Option<&str> {
        self.security_token.as_deref()
    }

    /// Semicolon separated names of the signed headers.
    pub fn signed_headers(&self) -> &str {
        &self.signed_headers
    }

    /// The 64 lower-case hex characters signature.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Build the header map to merge into the outgoing request.
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(3);
        self.apply(&mut headers)?;
        Ok(headers)
    }
}

impl std::fmt::Debug for SignatureResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureResult")
            .field("x_amz_date", &self.x_amz_date)
            .field(
                "security_token",
                &s3sign_core::utils::Redact::from(&self.security_token),
            )
            .field("signed_headers", &self.signed_headers)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

impl SigningOutput for SignatureResult {
    fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        let mut authorization = HeaderValue::from_str(&self.authorization)?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        headers.insert(X_AMZ_DATE, HeaderValue::from_str(&self.x_amz_date)?);

        // Set token value sensitive to avoid leaking.
        if let Some(token) = &self.security_token {
            let mut value = HeaderValue::from_str(token)?;
            value.set_sensitive(true);
            headers.insert(X_AMZ_SECURITY_TOKEN, value);
        }

        Ok(())
    }
}
