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

use http::header::{AUTHORIZATION, RANGE};
use http::{Method, Request};
use pretty_assertions::assert_eq;
use s3sign_aws_v4::{ByteRange, Config, Credential, RequestSigner, Signer};
use s3sign_core::time::parse_iso8601;
use s3sign_core::{SigningOutput, SigningRequest, StaticEnv};
use test_case::test_case;

const MINIO: &str = "http://127.0.0.1:9000";
const TIME: &str = "20260227T000000Z";

fn minio_signer() -> Signer {
    Signer::with_credential(
        RequestSigner::default(),
        Credential::new("minioadmin", "minioadmin", "us-east-1"),
    )
}

fn signing_request(method: Method, path: &str, range: Option<ByteRange>) -> SigningRequest {
    let mut req = Request::builder()
        .method(method)
        .uri(format!("{MINIO}{path}"))
        .body(())
        .expect("request must be valid");
    if let Some(range) = range {
        range
            .insert_into(req.headers_mut())
            .expect("range must be valid");
    }

    let (parts, _) = req.into_parts();
    SigningRequest::build(&parts, parse_iso8601(TIME).expect("time must be valid"))
}

#[test_case(Method::GET, "/cern-test-bucket/", None, "host;x-amz-date", "eb09ff29ab7750f44459fd82d2a8ccc49249b79ec244dbd615176e32bcecc9d4"; "list bucket")]
#[test_case(Method::HEAD, "/cern-test-bucket/data.root", None, "host;x-amz-date", "9664d44d33c3dbf815994403352100f9737bf15bd36412010b5e1358a30735a3"; "head object")]
#[test_case(Method::GET, "/cern-test-bucket/data.root", Some((0, 1024)), "host;range;x-amz-date", "07c15829b5e22fd78902277dfa8b8abb6d94bc257adca1a98f0c5ed62e25b657"; "first batch")]
#[test_case(Method::GET, "/cern-test-bucket/data.root", Some((1024, 1024)), "host;range;x-amz-date", "15cb2219c0a75851da0b8abefeb439bf8453df201a61c7ccf9ebec08e11e5f2f"; "second batch")]
fn test_minio_vectors(
    method: Method,
    path: &str,
    range: Option<(u64, u64)>,
    signed_headers: &str,
    signature: &str,
) {
    let range = range.map(|(offset, size)| {
        ByteRange::from_offset(offset, size).expect("range must be valid")
    });
    let output = minio_signer()
        .sign(&signing_request(method, path, range))
        .expect("sign must succeed")
        .expect("signing must be enabled");

    assert_eq!(output.signed_headers(), signed_headers);
    assert_eq!(output.signature(), signature);
    assert_eq!(
        output.authorization(),
        format!(
            "AWS4-HMAC-SHA256 Credential=minioadmin/20260227/us-east-1/s3/aws4_request, SignedHeaders={signed_headers}, Signature={signature}"
        )
    );
}

#[test]
fn test_signature_shape() {
    let output = minio_signer()
        .sign(&signing_request(Method::GET, "/cern-test-bucket/", None))
        .expect("sign must succeed")
        .expect("signing must be enabled");

    assert_eq!(output.signature().len(), 64);
    assert!(output
        .signature()
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    assert!(output
        .authorization()
        .starts_with("AWS4-HMAC-SHA256 Credential=minioadmin/20260227/us-east-1/s3/aws4_request, SignedHeaders=host;x-amz-date, Signature="));
}

#[test]
fn test_head_request_has_no_range() {
    let output = minio_signer()
        .sign(&signing_request(Method::HEAD, "/cern-test-bucket/data.root", None))
        .expect("sign must succeed")
        .expect("signing must be enabled");

    let headers = output.headers().expect("headers must be valid");
    assert!(!headers.contains_key(RANGE));
    assert!(!output.signed_headers().split(';').any(|v| v == "range"));
}

#[test]
fn test_config_from_provider_string() {
    // Equivalent of `--aws-sigv4 aws:amz:us-east-1:s3 --user minioadmin:minioadmin`.
    let config = Config::default()
        .with_provider("aws:amz:us-east-1:s3")
        .and_then(|v| v.with_user_password("minioadmin:minioadmin"))
        .expect("config must be valid");
    let signer = Signer::with_credential(RequestSigner::new(&config.service), config.credential());

    let output = signer
        .sign(&signing_request(Method::GET, "/cern-test-bucket/", None))
        .expect("sign must succeed")
        .expect("signing must be enabled");
    assert_eq!(
        output.signature(),
        "eb09ff29ab7750f44459fd82d2a8ccc49249b79ec244dbd615176e32bcecc9d4"
    );
}

#[test]
fn test_config_from_env() {
    let env = StaticEnv::from_pairs([
        ("AWS_ACCESS_KEY_ID", "minioadmin"),
        ("AWS_SECRET_ACCESS_KEY", "minioadmin"),
        ("AWS_SESSION_TOKEN", "session-token"),
    ]);
    let config = Config::default().from_env(&env);
    let signer = Signer::with_credential(RequestSigner::default(), config.credential());

    let output = signer
        .sign(&signing_request(Method::GET, "/cern-test-bucket/", None))
        .expect("sign must succeed")
        .expect("signing must be enabled");
    assert_eq!(
        output.signed_headers(),
        "host;x-amz-date;x-amz-security-token"
    );
    assert_eq!(
        output.signature(),
        "237b866ce6375046eb2fd36679b9cd6906e651b2e228fbf22f067716a71d5c58"
    );
}

#[test]
fn test_apply_merges_headers() {
    let req = Request::builder()
        .method(Method::GET)
        .uri(format!("{MINIO}/cern-test-bucket/data.root"))
        .header(RANGE, "bytes=0-1023")
        .header("user-agent", "s3sign-test")
        .body(())
        .expect("request must be valid");
    let (mut parts, _) = req.into_parts();

    let output = minio_signer()
        .sign(&SigningRequest::build(
            &parts,
            parse_iso8601(TIME).expect("time must be valid"),
        ))
        .expect("sign must succeed")
        .expect("signing must be enabled");
    output
        .apply(&mut parts.headers)
        .expect("apply must succeed");

    assert_eq!(parts.headers["x-amz-date"], TIME);
    assert_eq!(parts.headers[RANGE], "bytes=0-1023");
    assert_eq!(parts.headers["user-agent"], "s3sign-test");
    assert_eq!(
        parts.headers[AUTHORIZATION].to_str().expect("must be ascii"),
        output.authorization()
    );
    assert!(!parts.headers.contains_key("x-amz-security-token"));
}
