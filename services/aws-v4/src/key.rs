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

use std::fmt::{Debug, Formatter};
use std::sync::{Mutex, PoisonError};

use log::debug;
use s3sign_core::hash::{hex_hmac_sha256, hmac_sha256, sha256, SHA256_LEN};
use s3sign_core::Result;

use crate::constants::AWS4_REQUEST;

/// SigningKey is the `kSigning` value of the SigV4 key chain.
///
/// It is scoped to one date, region and service. The raw bytes never leave
/// this type except as an HMAC key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SigningKey([u8; SHA256_LEN]);

impl SigningKey {
    /// Derive the signing key:
    ///
    /// ```text
    /// kDate    = HMAC("AWS4" + secret, date)
    /// kRegion  = HMAC(kDate, region)
    /// kService = HMAC(kRegion, service)
    /// kSigning = HMAC(kService, "aws4_request")
    /// ```
    ///
    /// Every intermediate stays a raw 32 byte array.
    pub fn derive(secret: &str, date: &str, region: &str, service: &str) -> Result<Self> {
        let mut secret_key = Vec::with_capacity(4 + secret.len());
        secret_key.extend_from_slice(b"AWS4");
        secret_key.extend_from_slice(secret.as_bytes());

        let k_date = hmac_sha256(&secret_key, date.as_bytes())?;
        let k_region = hmac_sha256(&k_date, region.as_bytes())?;
        let k_service = hmac_sha256(&k_region, service.as_bytes())?;
        let k_signing = hmac_sha256(&k_service, AWS4_REQUEST.as_bytes())?;

        Ok(Self(k_signing))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; SHA256_LEN] {
        &self.0
    }

    /// Sign the string to sign, returning the lower-case hex signature.
    ///
    /// This is the only step of the chain that hex encodes.
    pub fn sign(&self, string_to_sign: &str) -> Result<String> {
        hex_hmac_sha256(&self.0, string_to_sign.as_bytes())
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(***)")
    }
}

/// Cache of the last derived signing key.
///
/// A key only depends on the secret, date, region and service, so requests
/// signed on the same UTC day with the same secret reuse it. Any other
/// scope or secret replaces the cached key.
#[derive(Debug, Default)]
pub struct SigningKeyCache {
    slot: Mutex<Option<CachedKey>>,
}

#[derive(Debug)]
struct CachedKey {
    /// SHA256 of the secret, the secret itself is never kept.
    secret_hash: [u8; SHA256_LEN],
    date: String,
    region: String,
    service: String,
    key: SigningKey,
}

impl SigningKeyCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached key for this scope, deriving and storing it on miss.
    pub fn get_or_derive(
        &self,
        secret: &str,
        date: &str,
        region: &str,
        service: &str,
    ) -> Result<SigningKey> {
        let secret_hash = sha256(secret.as_bytes());
        {
            let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = slot.as_ref().filter(|v| {
                v.secret_hash == secret_hash
                    && v.date == date
                    && v.region == region
                    && v.service == service
            }) {
                return Ok(cached.key);
            }
        }

        // Two threads may derive the same key at once, both results are equal.
        debug!("derive signing key for {date}/{region}/{service}");
        let key = SigningKey::derive(secret, date, region, service)?;

        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(CachedKey {
            secret_hash,
            date: date.to_string(),
            region: region.to_string(),
            service: service.to_string(),
            key,
        });
        Ok(key)
    }

    /// Drop the cached key.
    pub fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    #[cfg(test)]
    fn is_cached(&self, date: &str) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|v| v.date == date)
    }
}
