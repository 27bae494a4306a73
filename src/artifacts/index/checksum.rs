use crate::artifacts::index::CHECKSUM_SIZE;
use anyhow::{Context, bail};
use bytes::Bytes;
use file_guard::FileGuard;
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::{Read, Write};
use std::ops::DerefMut;

/// Locked index file that hashes every byte passing through it
///
/// The SHA-1 of everything before the trailer is what the trailer must hold:
/// writers append it with `write_checksum`, readers compare it with `verify`.
#[derive(Debug)]
pub struct Checksum<'f> {
    file: FileGuard<&'f mut File>,
    digest: Sha1,
}

impl<'f> Checksum<'f> {
    pub(crate) fn new(file: FileGuard<&'f mut File>) -> Self {
        Checksum {
            file,
            digest: Sha1::new(),
        }
    }

    fn locked_file(&mut self) -> &mut File {
        self.file.deref_mut()
    }

    pub(crate) fn read(&mut self, size: usize) -> anyhow::Result<Bytes> {
        let mut buffer = vec![0; size];
        self.locked_file()
            .read_exact(&mut buffer)
            .context("Unexpected end of index file")?;

        self.digest.update(&buffer);
        Ok(Bytes::from(buffer))
    }

    pub(crate) fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.digest.update(data);
        self.locked_file().write_all(data)?;

        Ok(())
    }

    fn digest_bytes(&self) -> [u8; CHECKSUM_SIZE] {
        let mut checksum = [0u8; CHECKSUM_SIZE];
        checksum.copy_from_slice(&self.digest.clone().finalize());
        checksum
    }

    pub(crate) fn write_checksum(&mut self) -> anyhow::Result<()> {
        let trailer = self.digest_bytes();
        self.locked_file()
            .write_all(&trailer)
            .context("Unable to write the index checksum")?;

        Ok(())
    }

    pub(crate) fn verify(&mut self) -> anyhow::Result<()> {
        let mut trailer = [0u8; CHECKSUM_SIZE];
        self.locked_file()
            .read_exact(&mut trailer)
            .context("Index file has no checksum")?;

        if trailer != self.digest_bytes() {
            bail!("Index checksum mismatch, the file is corrupted");
        }

        Ok(())
    }
}
