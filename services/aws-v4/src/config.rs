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

use log::debug;
use s3sign_core::{Env, Error, Result};

use crate::constants::*;
use crate::Credential;

/// Config for signing requests to S3-compatible services.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_ACCESS_KEY_ID`]
    /// - user password string: the part before the first `:`
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SECRET_ACCESS_KEY`]
    /// - user password string: the part after the first `:`
    pub secret_access_key: Option<String>,
    /// `session_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SESSION_TOKEN`]
    pub session_token: Option<String>,
    /// `region` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_REGION`], then [`AWS_DEFAULT_REGION`]
    /// - provider string: the third part
    /// - default to `us-east-1`
    pub region: Option<String>,
    /// `service` will be loaded from:
    ///
    /// - provider string: the fourth part
    /// - default to `s3`
    pub service: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            region: None,
            service: S3_SERVICE.to_string(),
        }
    }
}

impl Config {
    /// Load unset fields from env.
    pub fn from_env(mut self, env: &impl Env) -> Self {
        if self.access_key_id.is_none() {
            self.access_key_id = env.var(AWS_ACCESS_KEY_ID);
        }
        if self.secret_access_key.is_none() {
            self.secret_access_key = env.var(AWS_SECRET_ACCESS_KEY);
        }
        if self.session_token.is_none() {
            self.session_token = env.var(AWS_SESSION_TOKEN);
        }
        if self.region.is_none() {
            self.region = env
                .var(AWS_REGION)
                .or_else(|| env.var(AWS_DEFAULT_REGION));
        }

        self
    }

    /// Apply a SigV4 provider string like `aws:amz:us-east-1:s3`.
    ///
    /// The format is `provider1[:provider2[:region[:service]]]`. Only the
    /// `aws` provider is supported since the algorithm token is always
    /// `AWS4-HMAC-SHA256`. Empty parts keep the current value.
    pub fn with_provider(mut self, provider: &str) -> Result<Self> {
        let mut parts = provider.split(':');

        // `split` always yields at least one item.
        let provider1 = parts.next().unwrap_or_default();
        if !provider1.eq_ignore_ascii_case("aws") {
            return Err(Error::config_invalid(format!(
                "provider {provider1:?} is not supported, only aws is"
            )));
        }
        let _provider2 = parts.next();
        if let Some(region) = parts.next().filter(|v| !v.is_empty()) {
            self.region = Some(region.to_string());
        }
        if let Some(service) = parts.next().filter(|v| !v.is_empty()) {
            self.service = service.to_string();
        }
        if parts.next().is_some() {
            return Err(Error::config_invalid(format!(
                "provider string {provider:?} has too many parts"
            )));
        }

        Ok(self)
    }

    /// Apply a `<access_key_id>:<secret_access_key>` user password string.
    pub fn with_user_password(mut self, userpwd: &str) -> Result<Self> {
        let Some((ak, sk)) = userpwd.split_once(':') else {
            return Err(Error::config_invalid(
                "user password must be in <access_key_id>:<secret_access_key> form",
            ));
        };

        self.access_key_id = Some(ak.to_string());
        self.secret_access_key = Some(sk.to_string());
        Ok(self)
    }

    /// Build the credential described by this config.
    ///
    /// A config without access key yields an empty credential, which disables
    /// signing.
    pub fn credential(&self) -> Credential {
        let region = match &self.region {
            Some(v) => v.clone(),
            None => {
                debug!("region is not set, fallback to {DEFAULT_REGION}");
                DEFAULT_REGION.to_string()
            }
        };

        let mut cred = Credential::new(
            self.access_key_id.clone().unwrap_or_default(),
            self.secret_access_key.clone().unwrap_or_default(),
            region,
        );
        if let Some(token) = &self.session_token {
            cred = cred.with_session_token(token.as_str());
        }
        cred
    }
}
