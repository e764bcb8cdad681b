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

use std::str::FromStr;

use http::{Method, Request, StatusCode};
use log::warn;
use s3sign_aws_v4::ByteRange;
use s3sign_core::hash::hex_sha256;
use s3sign_core::Result;

use super::{init_signing_test, send_signed_request};

#[tokio::test]
async fn test_list_bucket() -> Result<()> {
    let Some((signer, url)) = init_signing_test() else {
        warn!("S3SIGN_AWS_V4_TEST is not set, skipped");
        return Ok(());
    };

    let mut req = Request::new(String::new());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = http::Uri::from_str(&format!("{url}/"))?;

    let (status, _body) = send_signed_request(&signer, req).await?;
    assert_eq!(StatusCode::OK, status);
    Ok(())
}

#[tokio::test]
async fn test_list_bucket_with_query() -> Result<()> {
    let Some((signer, url)) = init_signing_test() else {
        warn!("S3SIGN_AWS_V4_TEST is not set, skipped");
        return Ok(());
    };

    let mut req = Request::new(String::new());
    *req.method_mut() = Method::GET;
    *req.uri_mut() =
        http::Uri::from_str(&format!("{url}?list-type=2&delimiter=/&encoding-type=url"))?;

    let (status, _body) = send_signed_request(&signer, req).await?;
    assert_eq!(StatusCode::OK, status);
    Ok(())
}

#[tokio::test]
async fn test_head_object() -> Result<()> {
    let Some((signer, url)) = init_signing_test() else {
        warn!("S3SIGN_AWS_V4_TEST is not set, skipped");
        return Ok(());
    };

    let mut req = Request::new(String::new());
    *req.method_mut() = Method::HEAD;
    *req.uri_mut() = http::Uri::from_str(&format!("{url}/not_exist_file"))?;

    let (status, _body) = send_signed_request(&signer, req).await?;
    assert_eq!(StatusCode::NOT_FOUND, status);
    Ok(())
}

#[tokio::test]
async fn test_put_then_ranged_get() -> Result<()> {
    let Some((signer, url)) = init_signing_test() else {
        warn!("S3SIGN_AWS_V4_TEST is not set, skipped");
        return Ok(());
    };

    let body = "0123456789abcdefghijklmnopqrstuvwxyz";
    let uri = format!("{url}/ranged_get_test");

    let mut req = Request::new(body.to_string());
    req.headers_mut().insert(
        "x-amz-content-sha256",
        hex_sha256(body.as_bytes())
            .parse()
            .expect("parse digest failed"),
    );
    *req.method_mut() = Method::PUT;
    *req.uri_mut() = http::Uri::from_str(&uri)?;

    let (status, _body) = send_signed_request(&signer, req).await?;
    assert_eq!(StatusCode::OK, status);

    // Every batch is a new attempt with its own range and signature.
    for (offset, size) in [(0, 10), (10, 10), (20, 16)] {
        let range = ByteRange::from_offset(offset, size)?;

        let mut req = Request::new(String::new());
        *req.method_mut() = Method::GET;
        *req.uri_mut() = http::Uri::from_str(&uri)?;
        range.insert_into(req.headers_mut())?;

        let (status, content) = send_signed_request(&signer, req).await?;
        assert_eq!(StatusCode::PARTIAL_CONTENT, status);
        assert_eq!(
            &body[range.start() as usize..=range.end() as usize],
            content,
            "content mismatch for {range}"
        );
    }
    Ok(())
}
