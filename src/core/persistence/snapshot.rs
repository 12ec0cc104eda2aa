// src/core/persistence/snapshot.rs

//! The `EXODB` binary snapshot format.
//!
//! Layout: a 5-byte magic `EXODB`, an 8-byte `num_keys` count, then exactly
//! `num_keys` entries packed back to back. Each entry is:
//!
//! ```text
//! key_len: u64 LE | key bytes | type_tag: 4 bytes ("BSTR" | "ZSET") | payload
//! ```
//!
//! `BSTR` payload: `value_len: u64 LE | value bytes`. TTLs are not persisted;
//! every key loaded from a snapshot comes back with no expiry.
//!
//! `ZSET` payload: `member_count: u64 LE`, then for each member:
//! `score: f64 LE bits | member_len: u64 LE | member bytes`, in unspecified
//! order.

use crate::core::errors::ExoDbError;
use crate::core::storage::{BinaryString, SortedSet, Value};
use bytes::Bytes;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

const MAGIC: &[u8; 5] = b"EXODB";
const TAG_BSTR: &[u8; 4] = b"BSTR";
const TAG_ZSET: &[u8; 4] = b"ZSET";

fn write_u64<W: Write>(w: &mut W, v: u64) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

fn write_bytes<W: Write>(w: &mut W, b: &[u8]) -> io::Result<()> {
    write_u64(w, b.len() as u64)?;
    w.write_all(b)
}

/// Writes every key in `data` to `path` as an `EXODB` snapshot. Overwrites
/// any existing file at that path.
pub fn save(path: &Path, data: &HashMap<Bytes, Value>) -> Result<(), ExoDbError> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    w.write_all(MAGIC)?;
    write_u64(&mut w, data.len() as u64)?;

    for (key, value) in data {
        write_bytes(&mut w, key)?;
        match value {
            Value::BinaryString(s) => {
                w.write_all(TAG_BSTR)?;
                write_bytes(&mut w, s.bytes())?;
            }
            Value::SortedSet(z) => {
                w.write_all(TAG_ZSET)?;
                let members = z.element_range(0, z.size());
                write_u64(&mut w, members.len() as u64)?;
                for (member, score) in members {
                    w.write_all(&score.to_le_bytes())?;
                    write_bytes(&mut w, &member)?;
                }
            }
        }
    }

    w.flush()?;
    Ok(())
}

fn read_exact_vec<R: Read>(r: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

fn read_u64<R: Read>(r: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn read_f64<R: Read>(r: &mut R) -> io::Result<f64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

fn read_len_prefixed<R: Read>(r: &mut R) -> io::Result<Bytes> {
    let len = read_u64(r)? as usize;
    Ok(Bytes::from(read_exact_vec(r, len)?))
}

/// Loads a snapshot from `path` into a fresh map. Parsing happens entirely
/// into a staging map; only a fully successful read is returned, so a
/// truncated or corrupt file never leaves partial state for the caller to
/// adopt.
pub fn load(path: &Path) -> Result<HashMap<Bytes, Value>, ExoDbError> {
    let file = File::open(path)?;
    let mut r = BufReader::new(file);

    let mut magic = [0u8; 5];
    r.read_exact(&mut magic)
        .map_err(|e| ExoDbError::LoadError(format!("truncated header: {e}")))?;
    if &magic != MAGIC {
        return Err(ExoDbError::LoadError("bad magic".to_string()));
    }
    let num_keys =
        read_u64(&mut r).map_err(|e| ExoDbError::LoadError(format!("truncated num_keys: {e}")))?;

    let mut staging = HashMap::new();

    for _ in 0..num_keys {
        let key_len = read_u64(&mut r)
            .map_err(|e| ExoDbError::LoadError(format!("truncated key length: {e}")))?
            as usize;
        let key = Bytes::from(
            read_exact_vec(&mut r, key_len)
                .map_err(|e| ExoDbError::LoadError(format!("truncated key: {e}")))?,
        );

        let mut tag = [0u8; 4];
        r.read_exact(&mut tag)
            .map_err(|e| ExoDbError::LoadError(format!("truncated type tag: {e}")))?;

        let value = if tag == *TAG_BSTR {
            let bytes = read_len_prefixed(&mut r)
                .map_err(|e| ExoDbError::LoadError(format!("truncated bstr payload: {e}")))?;
            Value::BinaryString(BinaryString::new(bytes))
        } else if tag == *TAG_ZSET {
            let count = read_u64(&mut r)
                .map_err(|e| ExoDbError::LoadError(format!("truncated zset count: {e}")))?;
            let mut zset = SortedSet::new();
            for _ in 0..count {
                let score = read_f64(&mut r)
                    .map_err(|e| ExoDbError::LoadError(format!("truncated zset score: {e}")))?;
                let member = read_len_prefixed(&mut r)
                    .map_err(|e| ExoDbError::LoadError(format!("truncated zset member: {e}")))?;
                zset.add(score, member);
            }
            Value::SortedSet(zset)
        } else {
            return Err(ExoDbError::LoadError(format!(
                "unknown type tag {:?}",
                tag
            )));
        };

        staging.insert(key, value);
    }

    Ok(staging)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn round_trips_a_mixed_store() {
        let mut data = HashMap::new();
        data.insert(
            Bytes::from_static(b"greeting"),
            Value::BinaryString(BinaryString::new(Bytes::from_static(b"hello"))),
        );
        let mut z = SortedSet::new();
        z.add(1.0, Bytes::from_static(b"a"));
        z.add(2.5, Bytes::from_static(b"b"));
        data.insert(Bytes::from_static(b"ranks"), Value::SortedSet(z));

        let file = NamedTempFile::new().unwrap();
        save(file.path(), &data).unwrap();
        let loaded = load(file.path()).unwrap();

        assert_eq!(loaded.len(), 2);
        let greeting = loaded.get(&Bytes::from_static(b"greeting")).unwrap();
        assert_eq!(greeting.as_binary_string().unwrap().bytes().as_ref(), b"hello");
        let ranks = loaded.get(&Bytes::from_static(b"ranks")).unwrap();
        let ranks = ranks.as_sorted_set().unwrap();
        assert_eq!(ranks.size(), 2);
        assert_eq!(ranks.get_score(&Bytes::from_static(b"b")), 2.5);
    }

    #[test]
    fn ttl_is_not_persisted() {
        let mut data = HashMap::new();
        data.insert(
            Bytes::from_static(b"k"),
            Value::BinaryString(BinaryString::new_with_ttl(Bytes::from_static(b"v"), 60_000)),
        );
        let file = NamedTempFile::new().unwrap();
        save(file.path(), &data).unwrap();
        let loaded = load(file.path()).unwrap();
        let v = loaded.get(&Bytes::from_static(b"k")).unwrap();
        assert!(v.as_binary_string().unwrap().expiry().is_none());
    }

    #[test]
    fn bad_magic_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"NOPE!garbage").unwrap();
        assert!(load(file.path()).is_err());
    }

    #[test]
    fn num_keys_is_written_right_after_the_magic() {
        let mut data = HashMap::new();
        data.insert(
            Bytes::from_static(b"a"),
            Value::BinaryString(BinaryString::new(Bytes::from_static(b"1"))),
        );
        let file = NamedTempFile::new().unwrap();
        save(file.path(), &data).unwrap();

        let bytes = std::fs::read(file.path()).unwrap();
        assert_eq!(&bytes[0..5], MAGIC);
        let num_keys = u64::from_le_bytes(bytes[5..13].try_into().unwrap());
        assert_eq!(num_keys, 1);
    }

    #[test]
    fn truncated_num_keys_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"EXODB\x01\x00").unwrap();
        assert!(load(file.path()).is_err());
    }

    #[test]
    fn empty_store_round_trips() {
        let data = HashMap::new();
        let file = NamedTempFile::new().unwrap();
        save(file.path(), &data).unwrap();
        let loaded = load(file.path()).unwrap();
        assert!(loaded.is_empty());
    }
}
