//! Bounds-checked reader over raw account data

use {
    crate::error::ProposalClientError,
    solana_sdk::pubkey::{Pubkey, PUBKEY_BYTES},
};

/// Sequential cursor over account data
///
/// Every read is checked against the end of the buffer and fails with
/// `UnexpectedEndOfData` the moment it would overrun, leaving the cursor where it was
#[derive(Debug)]
pub struct AccountDataReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> AccountDataReader<'a> {
    /// Creates a reader positioned at the start of the data
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Current read position
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes not consumed yet
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Reads the next `len` bytes
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ProposalClientError> {
        if len > self.remaining() {
            return Err(ProposalClientError::UnexpectedEndOfData {
                offset: self.offset,
                needed: len,
                remaining: self.remaining(),
            });
        }

        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Reads a fixed size byte array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ProposalClientError> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    /// Reads a single byte
    pub fn read_u8(&mut self) -> Result<u8, ProposalClientError> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Reads a little-endian u32
    pub fn read_u32(&mut self) -> Result<u32, ProposalClientError> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Reads a little-endian u64
    pub fn read_u64(&mut self) -> Result<u64, ProposalClientError> {
        self.read_array().map(u64::from_le_bytes)
    }

    /// Reads a little-endian u64 if at least 8 bytes remain, otherwise consumes nothing
    pub fn read_optional_u64(&mut self) -> Option<u64> {
        self.read_u64().ok()
    }

    /// Reads a 32 byte account identifier
    pub fn read_pubkey(&mut self) -> Result<Pubkey, ProposalClientError> {
        self.read_array::<PUBKEY_BYTES>().map(Pubkey::new_from_array)
    }

    /// Reads a string prefixed with its little-endian u32 byte length
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected
    pub fn read_string(&mut self) -> Result<String, ProposalClientError> {
        let len = self.read_u32()? as usize;
        if len == 0 {
            return Ok(String::new());
        }

        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}
