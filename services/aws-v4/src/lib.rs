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

//! AWS SigV4 signer for S3-compatible object stores.
//!
//! Every outgoing request attempt is signed with a fresh timestamp:
//!
//! ```
//! use http::Request;
//! use s3sign_aws_v4::{Config, RequestSigner, Signer};
//! use s3sign_core::time::now;
//! use s3sign_core::SigningRequest;
//!
//! # fn main() -> s3sign_core::Result<()> {
//! let config = Config::default()
//!     .with_provider("aws:amz:us-east-1:s3")?
//!     .with_user_password("minioadmin:minioadmin")?;
//! let signer = Signer::with_credential(RequestSigner::new(&config.service), config.credential());
//!
//! let (mut parts, _) = Request::get("http://127.0.0.1:9000/cern-test-bucket/")
//!     .body(())?
//!     .into_parts();
//! let output = signer
//!     .sign(&SigningRequest::build(&parts, now()))?
//!     .expect("signing is enabled");
//! s3sign_core::SigningOutput::apply(&output, &mut parts.headers)?;
//! assert!(parts.headers.contains_key("authorization"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod range;
pub use range::ByteRange;

mod canonical;
pub use canonical::CanonicalRequest;

mod key;
pub use key::SigningKey;
pub use key::SigningKeyCache;

mod sign_request;
pub use sign_request::RequestSigner;
pub use sign_request::SignatureResult;

/// Signer façade for AWS SigV4.
pub type Signer = s3sign_core::Signer<RequestSigner>;
