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

use std::fmt;
use std::str::FromStr;

use http::header::RANGE;
use http::{HeaderMap, HeaderValue};
use s3sign_core::{Error, Result};

/// An inclusive byte range sent as `range: bytes=<start>-<end>`.
///
/// Ranged reads of one object are usually split into several attempts with a
/// different range each, so every attempt needs its own signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    start: u64,
    end: u64,
}

impl ByteRange {
    /// Create a new range covering `start..=end`.
    pub fn new(start: u64, end: u64) -> Result<Self> {
        if start > end {
            return Err(Error::invalid_signing_input(format!(
                "byte range start {start} is after end {end}"
            )));
        }

        Ok(Self { start, end })
    }

    /// Create a range of `size` bytes starting at `offset`.
    pub fn from_offset(offset: u64, size: u64) -> Result<Self> {
        if size == 0 {
            return Err(Error::invalid_signing_input("byte range must not be empty"));
        }
        let end = offset.checked_add(size - 1).ok_or_else(|| {
            Error::invalid_signing_input(format!("byte range {offset}+{size} overflows"))
        })?;

        Self::new(offset, end)
    }

    /// First byte of the range.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Last byte of the range, inclusive.
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Set the `range` header, replacing any previous value.
    pub fn insert_into(&self, headers: &mut HeaderMap) -> Result<()> {
        headers.insert(RANGE, HeaderValue::from_str(&self.to_string())?);
        Ok(())
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bytes={}-{}", self.start, self.end)
    }
}

impl FromStr for ByteRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid =
            || Error::invalid_signing_input(format!("range {s:?} is not bytes=<start>-<end>"));

        let (start, end) = s
            .strip_prefix("bytes=")
            .and_then(|v| v.split_once('-'))
            .ok_or_else(invalid)?;
        let is_digits = |v: &str| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(start) || !is_digits(end) {
            return Err(invalid());
        }

        let start = start.parse().map_err(|e| invalid().with_source(e))?;
        let end = end.parse().map_err(|e| invalid().with_source(e))?;
        Self::new(start, end)
    }
}
