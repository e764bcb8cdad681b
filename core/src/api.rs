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

use crate::{Result, SigningRequest};
use http::HeaderMap;
use std::fmt::Debug;

/// SigningCredential is the trait used by signer as the signing credential.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential enables signing.
    ///
    /// A credential that is not valid turns the signer into a pass-through.
    fn is_valid(&self) -> bool;
}

/// SigningOutput is the set of headers a signer hands back to the transport.
pub trait SigningOutput: Debug + Send + Sync + 'static {
    /// Merge the produced headers into the outgoing request's headers.
    fn apply(&self, headers: &mut HeaderMap) -> Result<()>;
}

/// SignRequest is the trait used by signer to sign one request attempt.
///
/// Implementations must be pure with respect to their inputs: signing the
/// same request with the same credential twice yields the same output.
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this signer.
    type Credential: SigningCredential;

    /// Output produced for a signed request.
    type Output: SigningOutput;

    /// Sign the request.
    ///
    /// The request is built fresh for every attempt, headers that take part
    /// in the signature must not be changed after this call.
    fn sign_request(
        &self,
        req: &SigningRequest,
        credential: &Self::Credential,
    ) -> Result<Self::Output>;

    /// Drop any state derived from the previously configured credential.
    ///
    /// Called by [`crate::Signer::configure`] while no signing is in flight.
    fn reset(&self) {}
}
