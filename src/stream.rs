//! Streaming encryption over arbitrary `Read`/`Write` pairs.
//!
//! Large inputs are processed as a sequence of fixed-size chunks, each
//! framed as an ordinary record. The counter-mode keystream carries across
//! chunk boundaries, so the whole stream is one logical encryption, while
//! every record still carries its own salt and authentication tag and stays
//! individually verifiable. Output is plain concatenated records; the
//! decrypt side re-frames them by reading each record's header first and
//! sizing the rest of the read from the version it names.

use std::io::{Read, Write};

use crate::error::{DecryptError, StreamError};
use crate::format::{self, HEADER_LEN};
use crate::record::{decrypt_chunk, encrypt_chunk};

/// Plaintext bytes per streamed record.
pub const CHUNK_SIZE: usize = 100 * 1024 * 1024;

/// Encrypt everything `input` yields, writing concatenated records to
/// `output`. Returns the number of ciphertext bytes written.
///
/// The caller keeps ownership of both streams; nothing is flushed or closed
/// here.
pub fn encrypt_stream<R: Read + ?Sized, W: Write + ?Sized>(
    password: &str,
    input: &mut R,
    output: &mut W,
) -> Result<u64, StreamError> {
    encrypt_stream_chunked(password, input, output, CHUNK_SIZE)
}

/// [`encrypt_stream`] with an explicit chunk size. Both sides of a stream
/// must agree on the chunk size, or record boundaries will not line up.
pub fn encrypt_stream_chunked<R: Read + ?Sized, W: Write + ?Sized>(
    password: &str,
    input: &mut R,
    output: &mut W,
    chunk_size: usize,
) -> Result<u64, StreamError> {
    assert!(chunk_size > 0, "chunk size must be positive");

    let mut buf = vec![0u8; chunk_size];
    let mut state = None;
    let mut written = 0u64;

    loop {
        let n = read_fill(input, &mut buf)?;
        if n == 0 {
            break;
        }
        let (record, next) = encrypt_chunk(password.as_bytes(), &buf[..n], state)?;
        output.write_all(&record)?;
        written += record.len() as u64;
        state = Some(next);
    }

    Ok(written)
}

/// Decrypt a concatenation of records from `input`, writing recovered
/// plaintext to `output`. Returns the number of plaintext bytes written.
pub fn decrypt_stream<R: Read + ?Sized, W: Write + ?Sized>(
    password: &str,
    input: &mut R,
    output: &mut W,
) -> Result<u64, StreamError> {
    decrypt_stream_chunked(password, input, output, CHUNK_SIZE)
}

/// [`decrypt_stream`] with an explicit chunk size matching the one used at
/// encryption time.
pub fn decrypt_stream_chunked<R: Read + ?Sized, W: Write + ?Sized>(
    password: &str,
    input: &mut R,
    output: &mut W,
    chunk_size: usize,
) -> Result<u64, StreamError> {
    assert!(chunk_size > 0, "chunk size must be positive");

    let mut state = None;
    let mut written = 0u64;

    loop {
        // The header names the version, and the version fixes the record
        // overhead, so read it first and size the rest of the frame from it.
        let mut header = [0u8; HEADER_LEN];
        let got = read_fill(input, &mut header)?;
        if got == 0 {
            break;
        }
        if got < HEADER_LEN {
            if got >= format::MAGIC.len() && header[..format::MAGIC.len()] != format::MAGIC {
                return Err(DecryptError::BadHeader.into());
            }
            return Err(DecryptError::MissingHeader.into());
        }

        let format = match format::lookup(&header) {
            Some(format) => format,
            None if header[..2] != format::MAGIC => return Err(DecryptError::BadHeader.into()),
            None => return Err(DecryptError::UnsupportedVersion(header).into()),
        };

        let mut record = vec![0u8; chunk_size + format.overhead()];
        record[..HEADER_LEN].copy_from_slice(&header);
        let rest = read_fill(input, &mut record[HEADER_LEN..])?;
        record.truncate(HEADER_LEN + rest);

        let (plaintext, next) = decrypt_chunk(password.as_bytes(), &record, state)?;
        output.write_all(&plaintext)?;
        written += plaintext.len() as u64;
        state = Some(next);
    }

    Ok(written)
}

/// Read until `buf` is full or the source is exhausted; short reads from
/// pipes and sockets must not truncate a chunk.
fn read_fill<R: Read + ?Sized>(input: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = input.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
