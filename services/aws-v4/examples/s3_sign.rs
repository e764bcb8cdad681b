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

use anyhow::Result;
use reqwest::Client;
use s3sign_aws_v4::{ByteRange, Config, RequestSigner, Signer};
use s3sign_core::OsEnv;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    // `S3SIGN_URL` points to an object, e.g. http://127.0.0.1:9000/cern-test-bucket/data.root
    let url = std::env::var("S3SIGN_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:9000/cern-test-bucket/data.root".to_string());

    let mut config = Config::default().from_env(&OsEnv);
    if config.access_key_id.is_none() {
        println!("No AWS credentials found, using minio demo credentials");
        config = config.with_user_password("minioadmin:minioadmin")?;
    }

    let signer = Signer::with_credential(RequestSigner::new(&config.service), config.credential());
    let client = Client::new();

    // Example 1: HEAD the object.
    let (mut parts, body) = http::Request::head(url.as_str())
        .body(reqwest::Body::from(""))?
        .into_parts();
    signer.sign_parts(&mut parts)?;
    println!("HEAD authorization: {:?}", parts.headers["authorization"]);
    send(&client, http::Request::from_parts(parts, body)).await;

    // Example 2: read the object in batches, each attempt signed with its own range.
    for offset in [0, 1024, 2048] {
        let (mut parts, body) = http::Request::get(url.as_str())
            .body(reqwest::Body::from(""))?
            .into_parts();
        ByteRange::from_offset(offset, 1024)?.insert_into(&mut parts.headers)?;
        signer.sign_parts(&mut parts)?;
        println!(
            "GET {:?} authorization: {:?}",
            parts.headers["range"], parts.headers["authorization"]
        );
        send(&client, http::Request::from_parts(parts, body)).await;
    }

    Ok(())
}

async fn send(client: &Client, req: http::Request<reqwest::Body>) {
    let req = match reqwest::Request::try_from(req) {
        Ok(req) => req,
        Err(err) => {
            println!("failed to convert request: {err}");
            return;
        }
    };

    match client.execute(req).await {
        Ok(resp) => println!("response status: {}", resp.status()),
        Err(err) => println!("request not sent ({err}), is the server running?"),
    }
}
