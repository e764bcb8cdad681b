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

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use s3sign_aws_v4::{Credential, RequestSigner, Signer};

use super::{bucket_request, minio_signer};

const TIME: &str = "20260227T000000Z";

fn signature_for(cred: Credential) -> String {
    Signer::with_credential(RequestSigner::default().without_key_cache(), cred)
        .sign(&bucket_request(TIME))
        .expect("sign must succeed")
        .expect("signing must be enabled")
        .authorization()
        .to_string()
}

#[test]
fn test_concurrent_sign_is_deterministic() {
    let signer = minio_signer();
    let expected = signature_for(Credential::new("minioadmin", "minioadmin", "us-east-1"));

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for _ in 0..200 {
                    let output = signer
                        .sign(&bucket_request(TIME))
                        .expect("sign must succeed")
                        .expect("signing must be enabled");
                    assert_eq!(output.authorization(), expected);
                }
            });
        }
    });
}

#[test]
fn test_configure_is_never_observed_mid_update() {
    let first = Credential::new("minioadmin", "minioadmin", "us-east-1");
    let second = Credential::new("otheradmin", "othersecret", "eu-west-1");
    let expected = [signature_for(first.clone()), signature_for(second.clone())];

    let signer = Signer::with_credential(RequestSigner::default(), first.clone());
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        let mut workers = Vec::new();
        for _ in 0..4 {
            workers.push(s.spawn(|| {
                while !done.load(Ordering::Relaxed) {
                    let output = signer
                        .sign(&bucket_request(TIME))
                        .expect("sign must succeed")
                        .expect("signing must be enabled");
                    assert!(
                        expected.iter().any(|v| v == output.authorization()),
                        "signature mixes two configurations: {}",
                        output.authorization()
                    );
                }
            }));
        }

        for i in 0..500 {
            let cred = if i % 2 == 0 { &second } else { &first };
            signer.configure(cred.clone());
        }
        done.store(true, Ordering::Relaxed);

        for worker in workers {
            worker.join().expect("worker must not panic");
        }
    });
}
