//! Stream operations: cat, cp, mv, hash, compress, decompress.
//!
//! Data always moves through chunked pipelines (`io::copy` or an explicit
//! read/update loop), never whole-file buffering, so files larger than
//! memory are fine. File handles are scoped to each operation and released
//! on every exit path. Underlying failures are collapsed into one fixed
//! message per operation.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use brotli::enc::BrotliEncoderParams;
use sha2::{Digest, Sha256};

use fmsh_types::{FmError, Result};

use crate::check_args;
use crate::path::resolve_path;

/// Chunk size for the hashing loop.
const HASH_BUF_SIZE: usize = 64 * 1024;

/// Execute one stream operation verb, writing any output to `out`.
pub fn run(verb: &str, args: &[String], cwd: &Path, out: &mut dyn Write) -> Result<()> {
    match verb {
        "cat" => show_file(args, cwd, out),
        "cp" => copy_file(args, cwd),
        "mv" => move_file(args, cwd),
        "hash" => calculate_hash(args, cwd, out),
        "compress" => compress_file(args, cwd),
        "decompress" => decompress_file(args, cwd),
        _ => Err(FmError::input("Unknown stream operation")),
    }
}

/// Verify the path names a regular file.
fn ensure_regular_file(path: &Path) -> io::Result<()> {
    let meta = fs::metadata(path)?;
    if !meta.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        ));
    }
    Ok(())
}

/// Destination path for cp/mv: the target directory plus the source's
/// base name. The target must be an existing directory.
fn dest_in_dir(from: &Path, to_dir: &Path) -> io::Result<PathBuf> {
    let meta = fs::metadata(to_dir)?;
    if !meta.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "destination is not a directory",
        ));
    }
    let name = from
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "source has no file name"))?;
    Ok(to_dir.join(name))
}

/// Chunked copy from `from` to a freshly created `to`.
fn copy_stream(from: &Path, to: &Path) -> io::Result<u64> {
    let mut reader = File::open(from)?;
    let mut writer = File::create(to)?;
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    Ok(bytes)
}

/// `cat <file>` — stream file bytes to the output sink.
fn show_file(args: &[String], cwd: &Path, out: &mut dyn Write) -> Result<()> {
    check_args(args, 1, "cat")?;
    let path = resolve_path(cwd, &args[0]);

    let streamed = (|| -> io::Result<()> {
        ensure_regular_file(&path)?;
        let mut reader = File::open(&path)?;
        io::copy(&mut reader, out)?;
        out.flush()
    })();

    streamed.map_err(|err| {
        log::debug!("cat: {} failed: {err}", path.display());
        FmError::operation("Cannot read file")
    })
}

/// `cp <file> <destDir>` — stream-copy keeping the base name.
fn copy_file(args: &[String], cwd: &Path) -> Result<()> {
    check_args(args, 2, "cp")?;
    let from = resolve_path(cwd, &args[0]);
    let to_dir = resolve_path(cwd, &args[1]);

    let copied = (|| -> io::Result<()> {
        ensure_regular_file(&from)?;
        let to = dest_in_dir(&from, &to_dir)?;
        copy_stream(&from, &to)?;
        Ok(())
    })();

    copied.map_err(|err| {
        log::debug!(
            "cp: {} -> {} failed: {err}",
            from.display(),
            to_dir.display()
        );
        FmError::operation("Cannot copy file")
    })
}

/// `mv <file> <destDir>` — stream-copy, then delete the source.
///
/// The source is removed only after the copy stream has fully completed. If
/// the delete itself fails the copy is left in place, so the caller sees an
/// error and a duplicated file.
fn move_file(args: &[String], cwd: &Path) -> Result<()> {
    check_args(args, 2, "mv")?;
    let from = resolve_path(cwd, &args[0]);
    let to_dir = resolve_path(cwd, &args[1]);

    let moved = (|| -> io::Result<()> {
        ensure_regular_file(&from)?;
        let to = dest_in_dir(&from, &to_dir)?;
        copy_stream(&from, &to)?;
        fs::remove_file(&from)
    })();

    moved.map_err(|err| {
        log::debug!(
            "mv: {} -> {} failed: {err}",
            from.display(),
            to_dir.display()
        );
        FmError::operation("Cannot move file")
    })
}

/// `hash <file>` — stream through SHA-256 and print the hex digest.
fn calculate_hash(args: &[String], cwd: &Path, out: &mut dyn Write) -> Result<()> {
    check_args(args, 1, "hash")?;
    let path = resolve_path(cwd, &args[0]);

    let hashed = (|| -> io::Result<()> {
        ensure_regular_file(&path)?;
        let mut reader = File::open(&path)?;
        let mut hasher = Sha256::new();
        let mut buf = vec![0u8; HASH_BUF_SIZE];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        writeln!(out, "{}", hex::encode(hasher.finalize()))
    })();

    hashed.map_err(|err| {
        log::debug!("hash: {} failed: {err}", path.display());
        FmError::operation("Cannot calculate hash")
    })
}

/// `compress <file> <destPath>` — Brotli-encode into the destination.
fn compress_file(args: &[String], cwd: &Path) -> Result<()> {
    check_args(args, 2, "compress")?;
    let from = resolve_path(cwd, &args[0]);
    let to = resolve_path(cwd, &args[1]);

    let compressed = (|| -> io::Result<()> {
        ensure_regular_file(&from)?;
        let mut reader = File::open(&from)?;
        let mut writer = File::create(&to)?;
        let params = BrotliEncoderParams::default();
        brotli::BrotliCompress(&mut reader, &mut writer, &params)?;
        writer.flush()
    })();

    compressed.map_err(|err| {
        log::debug!(
            "compress: {} -> {} failed: {err}",
            from.display(),
            to.display()
        );
        FmError::operation("Cannot compress file")
    })
}

/// `decompress <file> <destPath>` — inverse of `compress`.
fn decompress_file(args: &[String], cwd: &Path) -> Result<()> {
    check_args(args, 2, "decompress")?;
    let from = resolve_path(cwd, &args[0]);
    let to = resolve_path(cwd, &args[1]);

    let decompressed = (|| -> io::Result<()> {
        ensure_regular_file(&from)?;
        let mut reader = File::open(&from)?;
        let mut writer = File::create(&to)?;
        brotli::BrotliDecompress(&mut reader, &mut writer)?;
        writer.flush()
    })();

    decompressed.map_err(|err| {
        log::debug!(
            "decompress: {} -> {} failed: {err}",
            from.display(),
            to.display()
        );
        FmError::operation("Cannot decompress file")
    })
}
