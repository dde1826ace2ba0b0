use crate::error::{DecryptError, StreamError};
use crate::format::{self, HEADER_LEN, TAG_LEN};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Display information about an encrypted file by parsing the header of its
/// first record. Touches no key material: everything shown is public.
pub fn show_info(path: &Path) -> Result<String, StreamError> {
    let mut file = File::open(path)?;
    let file_len = file.metadata()?.len();

    let mut header = [0u8; HEADER_LEN];
    let got = read_upto(&mut file, &mut header)?;
    if got >= 2 && header[..2] != format::MAGIC {
        return Err(DecryptError::BadHeader.into());
    }
    if got < HEADER_LEN {
        return Err(DecryptError::MissingHeader.into());
    }

    let version = format::lookup(&header).ok_or(DecryptError::UnsupportedVersion(header))?;

    let mut salt = vec![0u8; version.salt_len];
    let got = read_upto(&mut file, &mut salt)?;
    if got < salt.len() {
        return Err(DecryptError::MissingData {
            len: HEADER_LEN + got,
            need: version.min_record_len(),
        }
        .into());
    }

    let mut output = String::new();

    output.push_str("Saltbox Encrypted File Information\n");
    output.push_str("==================================\n\n");

    output.push_str(&format!("File: {}\n", path.display()));
    output.push_str(&format!("Size: {}\n", format_size(file_len)));
    output.push('\n');

    output.push_str("Format:\n");
    output.push_str(&format!("  Version: {}\n", version.index));
    output.push_str(&format!("  Header tag: {}\n", hex::encode(version.header)));
    output.push_str(&format!("  Salt bits: {}\n", version.salt_len * 8));
    output.push_str(&format!("  Work factor: {}\n", version.work_factor));
    output.push_str(&format!(
        "  Overhead per record: {} bytes ({} header + {} salt + {} tag)\n",
        version.overhead(),
        HEADER_LEN,
        version.salt_len,
        TAG_LEN
    ));
    output.push('\n');

    output.push_str("First record:\n");
    output.push_str(&format!("  Salt: {}\n", hex::encode(&salt)));

    Ok(output)
}

fn read_upto(file: &mut File, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = file.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
