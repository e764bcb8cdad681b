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

//! Core components for signing requests to S3-compatible object stores.
//!
//! This crate provides the service-agnostic building blocks: hashing
//! primitives over explicit byte slices, time formatting, the per-attempt
//! [`SigningRequest`], and the [`Signer`] façade a transport calls once per
//! outgoing request attempt.
//!
//! Signing is synchronous and performs no I/O.
//!
//! ## Example
//!
//! ```
//! use http::HeaderMap;
//! use s3sign_core::time::now;
//! use s3sign_core::{Result, SignRequest, Signer, SigningCredential, SigningOutput, SigningRequest};
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     key: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.key.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyOutput;
//!
//! impl SigningOutput for MyOutput {
//!     fn apply(&self, _: &mut HeaderMap) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyBuilder;
//!
//! impl SignRequest for MyBuilder {
//!     type Credential = MyCredential;
//!     type Output = MyOutput;
//!
//!     fn sign_request(&self, _: &SigningRequest, _: &MyCredential) -> Result<MyOutput> {
//!         Ok(MyOutput)
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let signer = Signer::new(MyBuilder);
//! signer.configure(MyCredential { key: "my-access-key".to_string() });
//!
//! let uri = "http://127.0.0.1:9000/bucket".parse::<http::Uri>()?;
//! let req = SigningRequest::new(http::Method::GET, &uri, HeaderMap::new(), now());
//! assert!(signer.sign(&req)?.is_some());
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod env;
pub use env::Env;
pub use env::OsEnv;
pub use env::StaticEnv;

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{SignRequest, SigningCredential, SigningOutput};
mod request;
pub use request::SigningRequest;
mod signer;
pub use signer::Signer;
