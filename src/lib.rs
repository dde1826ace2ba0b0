//! Saltbox - Password-Based Authenticated Encryption
//!
//! Encrypts opaque byte payloads under a password into a compact, versioned,
//! self-describing record, and decrypts any registered record version back.
//! A streaming variant applies the same scheme to inputs of any size without
//! holding them in memory.
//!
//! ## Record format
//!
//! ```text
//! [4 bytes: header tag][16/32 bytes: salt][ciphertext][32 bytes: HMAC tag]
//! ```
//!
//! - **Header tag**: 2-byte magic `sc` plus a 2-byte version. Encryption
//!   always emits the latest version; decryption dispatches on the tag.
//! - **Salt**: fresh random bytes per record, feeding PBKDF2-HMAC-SHA256 key
//!   derivation and (first 8 bytes) the AES-CTR nonce prefix.
//! - **Ciphertext**: AES-256-CTR, same length as the plaintext.
//! - **Tag**: HMAC-SHA256 over everything before it, keyed separately from
//!   encryption, verified before any decryption happens.
//!
//! ## Example
//!
//! ```
//! let record = saltbox::encrypt("correct horse", b"attack at dawn").unwrap();
//! let plaintext = saltbox::decrypt("correct horse", &record).unwrap();
//! assert_eq!(plaintext, b"attack at dawn");
//! ```
//!
//! Streaming works over any `Read`/`Write` pair:
//!
//! ```no_run
//! use std::fs::File;
//!
//! let mut input = File::open("archive.tar")?;
//! let mut output = File::create("archive.tar.sc")?;
//! saltbox::encrypt_stream("correct horse", &mut input, &mut output)?;
//! # Ok::<(), saltbox::StreamError>(())
//! ```

pub mod cli;
pub mod error;
pub mod format;
pub mod kdf;
pub mod record;
pub mod stream;

pub use error::{DecryptError, EncryptError, StreamError};
pub use record::{decrypt, decrypt_chunk, encrypt, encrypt_chunk, Keystream};
pub use stream::{
    decrypt_stream, decrypt_stream_chunked, encrypt_stream, encrypt_stream_chunked, CHUNK_SIZE,
};
