use thiserror::Error;

/// Failures while producing a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncryptError {
    #[error("Message too long: {len} bytes exceed the counter space of one cipher instance")]
    TooLong { len: u128 },
}

/// Failures while consuming a record.
///
/// Authentication failure deliberately reports one undifferentiated message:
/// distinguishing a wrong password from tampered ciphertext would hand an
/// attacker a verification oracle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecryptError {
    #[error("Missing header")]
    MissingHeader,

    #[error("Data were not produced by this format (bad header)")]
    BadHeader,

    #[error(
        "Data appear to be encrypted with a more recent format version \
         (header {0:02x?}); update and try again"
    )]
    UnsupportedVersion([u8; 4]),

    #[error("Missing data: {len} bytes, need at least {need} for this format version")]
    MissingData { len: usize, need: usize },

    #[error("Bad password or corrupt / modified data")]
    BadPassword,
}

/// Failures from the streaming layer and the CLI, which also touch I/O.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Encrypt(#[from] EncryptError),

    #[error(transparent)]
    Decrypt(#[from] DecryptError),
}
