use crate::error::StreamError;
use crate::stream::encrypt_stream;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Options for the encrypt command
#[derive(Debug, Clone)]
pub struct EncryptOptions {
    pub password: String,
}

/// Encrypt a file into a stream of records.
/// Returns the number of ciphertext bytes written.
pub fn encrypt_file(
    input_path: &Path,
    output_path: &Path,
    options: &EncryptOptions,
) -> Result<u64, StreamError> {
    let mut reader = BufReader::new(File::open(input_path)?);
    let mut writer = BufWriter::new(File::create(output_path)?);

    let written = encrypt_stream(&options.password, &mut reader, &mut writer)?;
    writer.flush()?;
    Ok(written)
}
