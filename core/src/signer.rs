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

use crate::time::now;
use crate::{Result, SignRequest, SigningCredential, SigningOutput, SigningRequest};
use log::debug;
use std::sync::{Arc, PoisonError, RwLock};

/// Signer is the main struct used to sign the request.
///
/// It owns the configured credential and nothing else that changes between
/// calls. `configure` swaps the credential under a write lock while `sign`
/// holds the read lock for the whole call, so a signature never mixes two
/// configurations.
#[derive(Debug)]
pub struct Signer<S: SignRequest> {
    builder: S,
    credential: RwLock<Option<Arc<S::Credential>>>,
}

impl<S: SignRequest> Signer<S> {
    /// Create a new signer without credential.
    ///
    /// Signing is disabled until [`Signer::configure`] is called with a valid
    /// credential.
    pub fn new(builder: S) -> Self {
        Self {
            builder,
            credential: RwLock::new(None),
        }
    }

    /// Create a new signer with the given credential.
    pub fn with_credential(builder: S, credential: S::Credential) -> Self {
        let signer = Self::new(builder);
        signer.configure(credential);
        signer
    }

    /// Replace the configured credential.
    ///
    /// Signing is enabled only if the credential is valid. The last call
    /// wins; requests signed before this call are unaffected.
    pub fn configure(&self, credential: S::Credential) {
        let enabled = credential.is_valid();

        let mut guard = self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        self.builder.reset();
        *guard = enabled.then(|| Arc::new(credential));

        debug!("signer configured, signing enabled: {enabled}");
    }

    /// Check if signing is enabled.
    pub fn is_enabled(&self) -> bool {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Sign one request attempt.
    ///
    /// Returns `Ok(None)` if signing is disabled: the request must then be
    /// sent exactly as it is.
    pub fn sign(&self, req: &SigningRequest) -> Result<Option<S::Output>> {
        let guard = self
            .credential
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let Some(cred) = guard.as_deref() else {
            debug!("no credential configured, skip signing");
            return Ok(None);
        };

        self.builder.sign_request(req, cred).map(Some)
    }

    /// Sign the request parts at the current time and merge the produced
    /// headers into them.
    pub fn sign_parts(&self, parts: &mut http::request::Parts) -> Result<()> {
        let req = SigningRequest::build(parts, now());
        if let Some(output) = self.sign(&req)? {
            output.apply(&mut parts.headers)?;
        }

        Ok(())
    }
}
