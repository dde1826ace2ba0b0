use crate::error::StreamError;
use crate::stream::decrypt_stream;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Options for the decrypt command
#[derive(Debug, Clone)]
pub struct DecryptOptions {
    pub password: String,
}

/// Decrypt a file of concatenated records back to its plaintext.
/// Returns the number of plaintext bytes written.
pub fn decrypt_file(
    input_path: &Path,
    output_path: &Path,
    options: &DecryptOptions,
) -> Result<u64, StreamError> {
    let mut reader = BufReader::new(File::open(input_path)?);
    let mut writer = BufWriter::new(File::create(output_path)?);

    let written = decrypt_stream(&options.password, &mut reader, &mut writer)?;
    writer.flush()?;
    Ok(written)
}
