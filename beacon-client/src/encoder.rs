//! `multipart/form-data` framing.
//!
//! The notification server parses bodies framed with bare `\n` line endings
//! rather than CRLF; every byte emitted here follows that convention.

use crate::{error::Error, types::Part};

use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of the boundary token, in characters from `[A-Za-z0-9]`.
pub const BOUNDARY_LENGTH: usize = 16;

/// How many candidate boundaries are tried before giving up.
pub const BOUNDARY_ATTEMPTS: usize = 3;

/// Encode a single part: a header block, a blank line, then the raw content.
/// The surrounding boundary delimiters are the assembler's job.
pub fn encode_part(part: &Part) -> Vec<u8> {
    let mut disposition =
        format!("Content-Disposition: form-data; name=\"{}\"", part.name);

    if let Some(filename) = &part.filename {
        disposition.push_str("; filename=\"");
        disposition.push_str(filename);
        disposition.push('"');
    }

    let mut encoded = disposition.into_bytes();

    if let Some(content_type) = &part.content_type {
        encoded.extend_from_slice(format!("\nContent-Type: {}", content_type).as_bytes());
    }

    encoded.extend_from_slice(b"\n\n");
    encoded.extend_from_slice(&part.body);
    encoded
}

/// Pick a boundary that occurs in none of the already encoded parts.
///
/// A part containing the literal boundary would be cut apart by the receiving
/// parser, so candidates are checked against the full encoded byte sequences,
/// header blocks included. With 62^16 possible tokens a collision is all but
/// impossible, but the retry budget keeps a pathological payload from looping
/// forever.
pub fn choose_boundary<R: Rng>(rng: &mut R, encoded: &[Vec<u8>]) -> Result<String, Error> {
    for _ in 0..BOUNDARY_ATTEMPTS {
        let candidate: String = (0..BOUNDARY_LENGTH)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect();

        if encoded
            .iter()
            .all(|part| !contains(part, candidate.as_bytes()))
        {
            return Ok(candidate);
        }
    }

    Err(Error::BoundaryExhausted {
        attempts: BOUNDARY_ATTEMPTS,
    })
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// A fully assembled form body together with the boundary that frames it.
///
/// The boundary is exposed separately so the caller can build the outer
/// `Content-Type: multipart/form-data; boundary=...` header; the encoder
/// itself never touches HTTP headers.
#[derive(Debug)]
pub struct FormData {
    boundary: String,
    body: Vec<u8>,
}

impl FormData {
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

/// Collects parts and assembles them into a [`FormData`].
///
/// Parts are emitted in the order supplied. The wire format does not care,
/// but a human reading the notification does, so a caption placed before a
/// figure stays before it.
pub struct FormBuilder {
    parts: Vec<Part>,
}

impl FormBuilder {
    /// Create a new empty builder
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Add a part to the list of parts
    pub fn part(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// Append all of the provided parts
    pub fn parts(&mut self, parts: Vec<Part>) {
        let mut parts = parts;
        self.parts.append(&mut parts);
    }

    /// Assemble the body using the thread-local generator.
    pub fn build(self) -> Result<FormData, Error> {
        self.build_with(&mut rand::rng())
    }

    /// Assemble the body, drawing boundary candidates from `rng`.
    pub fn build_with<R: Rng>(self, rng: &mut R) -> Result<FormData, Error> {
        let encoded: Vec<Vec<u8>> = self.parts.iter().map(encode_part).collect();
        let boundary = choose_boundary(rng, &encoded)?;

        let mut body = Vec::new();
        for part in &encoded {
            body.extend_from_slice(b"\n--");
            body.extend_from_slice(boundary.as_bytes());
            body.push(b'\n');
            body.extend_from_slice(part);
        }
        body.extend_from_slice(b"\n--");
        body.extend_from_slice(boundary.as_bytes());
        body.extend_from_slice(b"--\n\n");

        Ok(FormData { boundary, body })
    }
}

impl Default for FormBuilder {
    fn default() -> Self {
        Self::new()
    }
}
