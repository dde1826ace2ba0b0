//! The registry of wire-format versions.
//!
//! Every record starts with a 4-byte header: a fixed 2-byte magic prefix
//! followed by a 2-byte version discriminant. Each registered version fixes
//! the salt length and the PBKDF2 work factor used for that record. The
//! table is append-only across releases: encryption always emits the latest
//! entry, decryption dispatches on whatever header it finds, so old records
//! stay readable.

/// Magic prefix shared by all format versions.
pub const MAGIC: [u8; 2] = *b"sc";

/// Record header length in bytes (magic + version).
pub const HEADER_LEN: usize = 4;

/// HMAC-SHA256 tag length in bytes.
pub const TAG_LEN: usize = 32;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// AES block length in bytes.
pub const BLOCK_LEN: usize = 16;

/// Counter-mode nonce prefix length: half an AES block. The leading
/// `NONCE_LEN` bytes of a record's salt double as this prefix, which is why
/// every registered salt length must be at least `2 * NONCE_LEN`.
pub const NONCE_LEN: usize = BLOCK_LEN / 2;

/// One registered wire-format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    /// Position in the registry; also the version discriminant value.
    pub index: u8,
    /// The 4-byte header tag that opens every record of this version.
    pub header: [u8; 4],
    /// Salt length in bytes.
    pub salt_len: usize,
    /// PBKDF2 iteration count.
    pub work_factor: u32,
}

const FORMATS: [Format; 3] = [
    Format {
        index: 0,
        header: *b"sc\x00\x00",
        salt_len: 16,
        work_factor: 10_000,
    },
    Format {
        index: 1,
        header: *b"sc\x00\x01",
        salt_len: 32,
        work_factor: 10_000,
    },
    Format {
        index: 2,
        header: *b"sc\x00\x02",
        salt_len: 32,
        work_factor: 100_000,
    },
];

/// The version used for all newly encrypted records.
pub fn latest() -> &'static Format {
    &FORMATS[FORMATS.len() - 1]
}

/// Resolve a header tag to its registered version. `None` means the record
/// was produced by a format this build does not know about (it is distinct
/// from a malformed header, which never reaches the lookup).
pub fn lookup(header: &[u8; 4]) -> Option<&'static Format> {
    FORMATS.iter().find(|f| &f.header == header)
}

impl Format {
    /// Bytes a record of this version adds on top of its payload.
    pub fn overhead(&self) -> usize {
        HEADER_LEN + self.salt_len + TAG_LEN
    }

    /// The shortest well-formed record: empty payload plus overhead.
    pub fn min_record_len(&self) -> usize {
        self.overhead()
    }
}
