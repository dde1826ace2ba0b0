//! Single-record encryption and decryption.
//!
//! Record layout (binary):
//! ```text
//! [4 bytes: header tag][salt][N bytes: ciphertext][32 bytes: HMAC-SHA256 tag]
//! ```
//! The tag covers `header ‖ salt ‖ ciphertext`. The salt feeds both key
//! derivation and, through its leading 8 bytes, the counter-mode nonce
//! prefix. Ciphertext length equals plaintext length; AES-256-CTR adds no
//! padding.
//!
//! Verification happens strictly before decryption, and compares MACs of the
//! two tags rather than the tags themselves, so neither a timing oracle nor
//! a verification oracle leaks through the comparison.

use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::{DecryptError, EncryptError};
use crate::format::{self, Format, BLOCK_LEN, HEADER_LEN, KEY_LEN, MAGIC, NONCE_LEN, TAG_LEN};
use crate::kdf;

type Aes256Ctr = ctr::Ctr128BE<Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// One cipher instance covers at most 2^64 counter blocks; a longer message
/// would wrap the counter and reuse keystream.
const MAX_MESSAGE_LEN: u128 = 1 << (NONCE_LEN * 8);

/// The counter-mode continuation state of one logical stream.
///
/// Exclusively owned: thread it sequentially through the chunks of a single
/// stream, never share it between streams. Dropping it ends the stream.
pub struct Keystream(Aes256Ctr);

impl Keystream {
    /// Key a fresh CTR instance. The counter block is the first 8 salt
    /// bytes followed by a big-endian block counter starting at 1, matching
    /// the on-wire format of every existing record.
    fn fresh(enc_key: &[u8; KEY_LEN], salt: &[u8]) -> Self {
        let mut iv = [0u8; BLOCK_LEN];
        iv[..NONCE_LEN].copy_from_slice(&salt[..NONCE_LEN]);
        iv[BLOCK_LEN - 1] = 1;
        Keystream(Aes256Ctr::new(&(*enc_key).into(), &iv.into()))
    }
}

impl std::fmt::Debug for Keystream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keystream").finish_non_exhaustive()
    }
}

fn hmac_tag(key: &[u8; KEY_LEN], data: &[u8]) -> [u8; TAG_LEN] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    tag
}

/// Double-MAC comparison: authenticate the tags themselves, then compare
/// those outputs in constant time. Never compare record tags directly.
fn tags_match(auth_key: &[u8; KEY_LEN], stored: &[u8], computed: &[u8; TAG_LEN]) -> bool {
    let a = hmac_tag(auth_key, stored);
    let b = hmac_tag(auth_key, computed);
    a[..].ct_eq(&b[..]).into()
}

/// Encrypt one payload into one self-contained record.
///
/// Every call draws a fresh salt, so encrypting the same message twice
/// yields different records.
pub fn encrypt(password: &str, plaintext: &[u8]) -> Result<Vec<u8>, EncryptError> {
    let (record, _) = encrypt_chunk(password.as_bytes(), plaintext, None)?;
    Ok(record)
}

/// Decrypt one self-contained record. Accepts any registered format version.
pub fn decrypt(password: &str, record: &[u8]) -> Result<Vec<u8>, DecryptError> {
    let (plaintext, _) = decrypt_chunk(password.as_bytes(), record, None)?;
    Ok(plaintext)
}

/// Encrypt one chunk, optionally continuing the keystream of a previous
/// chunk in the same stream.
///
/// The chunk always gets its own fresh salt and freshly derived
/// authentication key, so it can be verified on its own. When `state` is
/// supplied the encryption keystream continues from where the previous
/// chunk stopped and the newly derived encryption key goes unused.
pub fn encrypt_chunk(
    password: &[u8],
    plaintext: &[u8],
    state: Option<Keystream>,
) -> Result<(Vec<u8>, Keystream), EncryptError> {
    encrypt_with(format::latest(), password, plaintext, state)
}

pub(crate) fn encrypt_with(
    format: &'static Format,
    password: &[u8],
    plaintext: &[u8],
    state: Option<Keystream>,
) -> Result<(Vec<u8>, Keystream), EncryptError> {
    // For AES this never fires on realistic inputs; a wrapped counter would
    // reuse keystream.
    if plaintext.len() as u128 > MAX_MESSAGE_LEN {
        return Err(EncryptError::TooLong {
            len: plaintext.len() as u128,
        });
    }

    let salt = kdf::fresh_salt(format.salt_len);
    let keys = kdf::expand(password, &salt, format.work_factor);

    let mut stream = match state {
        Some(stream) => stream,
        None => Keystream::fresh(&keys.enc, &salt),
    };

    let mut record = Vec::with_capacity(format.overhead() + plaintext.len());
    record.extend_from_slice(&format.header);
    record.extend_from_slice(&salt);
    let body = record.len();
    record.extend_from_slice(plaintext);
    stream.0.apply_keystream(&mut record[body..]);

    let tag = hmac_tag(&keys.auth, &record);
    record.extend_from_slice(&tag);

    Ok((record, stream))
}

/// Decrypt one chunk, optionally continuing the keystream of a previous
/// chunk in the same stream.
///
/// Authentication always precedes decryption: the ciphertext is never
/// touched unless the tag verifies under this chunk's own derived key.
pub fn decrypt_chunk(
    password: &[u8],
    record: &[u8],
    state: Option<Keystream>,
) -> Result<(Vec<u8>, Keystream), DecryptError> {
    // A wrong magic prefix is recognizable from two bytes on; report it
    // ahead of the length checks so foreign data gets the clearer message.
    if record.len() >= MAGIC.len() && record[..MAGIC.len()] != MAGIC {
        return Err(DecryptError::BadHeader);
    }
    if record.len() < HEADER_LEN {
        return Err(DecryptError::MissingHeader);
    }

    let mut header = [0u8; HEADER_LEN];
    header.copy_from_slice(&record[..HEADER_LEN]);
    let format = format::lookup(&header).ok_or(DecryptError::UnsupportedVersion(header))?;

    if record.len() < format.min_record_len() {
        return Err(DecryptError::MissingData {
            len: record.len(),
            need: format.min_record_len(),
        });
    }

    let salt = &record[HEADER_LEN..HEADER_LEN + format.salt_len];
    let keys = kdf::expand(password, salt, format.work_factor);

    let body_end = record.len() - TAG_LEN;
    let stored = &record[body_end..];
    let computed = hmac_tag(&keys.auth, &record[..body_end]);
    if !tags_match(&keys.auth, stored, &computed) {
        return Err(DecryptError::BadPassword);
    }

    let mut stream = match state {
        Some(stream) => stream,
        None => Keystream::fresh(&keys.enc, salt),
    };

    let mut plaintext = record[HEADER_LEN + format.salt_len..body_end].to_vec();
    stream.0.apply_keystream(&mut plaintext);

    Ok((plaintext, stream))
}
