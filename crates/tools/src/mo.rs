//! # Compiled message catalogs
//!
//! A reader for the binary `.mo` format produced by `msgfmt`. The typo checks
//! work on compiled catalogs rather than on `.po` sources, so that escapes,
//! continuation lines and obsolete entries are already resolved by gettext.
//!
//! The layout is a 28 byte header followed by two tables of
//! `(length, offset)` pairs, one for original strings and one for
//! translations. Plural forms and message contexts are encoded inside the
//! strings with NUL and EOT separators.

use std::fs;
use std::path::Path;

use crate::errors::Error;

#[cfg(test)]
#[path = "mo_tests.rs"]
mod tests;

const MAGIC: u32 = 0x9504_12de;
const HEADER_SIZE: usize = 28;
const CONTEXT_SEPARATOR: u8 = 0x04;

/// One message of a compiled catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    /// Message context (`msgctxt`), if any
    pub context: Option<String>,

    /// The original string (`msgid`)
    pub id: String,

    /// The original plural string (`msgid_plural`), if any
    pub id_plural: Option<String>,

    /// The translations, one per plural form
    pub translations: Vec<String>,
}

impl Entry {
    /// Whether this is the catalog header, whose `msgid` is empty.
    pub fn is_header(&self) -> bool {
        self.id.is_empty() && self.context.is_none()
    }

    fn key_bytes(&self) -> Vec<u8> {
        let mut key = Vec::new();
        if let Some(context) = &self.context {
            key.extend_from_slice(context.as_bytes());
            key.push(CONTEXT_SEPARATOR);
        }
        key.extend_from_slice(self.id.as_bytes());
        if let Some(plural) = &self.id_plural {
            key.push(0);
            key.extend_from_slice(plural.as_bytes());
        }
        key
    }

    fn translation_bytes(&self) -> Vec<u8> {
        self.translations.join("\0").into_bytes()
    }
}

/// A compiled catalog loaded into memory.
///
/// # Examples
///
/// ```
/// use l10n_guard_tools::mo::{Entry, MoCatalog};
///
/// let data = MoCatalog::encode(&[Entry {
///     id: "Cannot $action".to_string(),
///     translations: vec!["No se puede $action".to_string()],
///     ..Entry::default()
/// }]);
///
/// let catalog = MoCatalog::parse(data).unwrap();
/// let entries: Vec<Entry> = catalog.entries().collect::<Result<_, _>>().unwrap();
/// assert_eq!(entries[0].translations[0], "No se puede $action");
/// ```
#[derive(Debug, Clone)]
pub struct MoCatalog {
    data: Vec<u8>,
    big_endian: bool,
    count: usize,
    originals: usize,
    translations: usize,
}

impl MoCatalog {
    /// Reads and validates the catalog stored at `path`.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let data = fs::read(path)?;
        Self::parse(data)
    }

    /// Validates the header of an in-memory catalog.
    ///
    /// Only the header and the bounds of the two string tables are checked
    /// here; problems inside individual strings surface while iterating.
    ///
    /// # Arguments
    ///
    /// * `data` - The complete content of a `.mo` file
    ///
    /// # Returns
    ///
    /// A `Result` containing the catalog, or [`Error::MalformedCatalog`]
    pub fn parse(data: Vec<u8>) -> Result<Self, Error> {
        if data.len() < HEADER_SIZE {
            return Err(Error::MalformedCatalog(format!(
                "file too short ({} bytes)",
                data.len()
            )));
        }
        let magic = [data[0], data[1], data[2], data[3]];
        let big_endian = if u32::from_le_bytes(magic) == MAGIC {
            false
        } else if u32::from_be_bytes(magic) == MAGIC {
            true
        } else {
            return Err(Error::MalformedCatalog("bad magic number".to_string()));
        };

        let mut catalog = Self {
            data,
            big_endian,
            count: 0,
            originals: 0,
            translations: 0,
        };
        let revision = catalog.read_u32(4)?;
        if revision >> 16 > 1 {
            return Err(Error::MalformedCatalog(format!(
                "unsupported revision {:#x}",
                revision
            )));
        }
        catalog.count = catalog.read_u32(8)? as usize;
        catalog.originals = catalog.read_u32(12)? as usize;
        catalog.translations = catalog.read_u32(16)? as usize;

        let table_len = catalog
            .count
            .checked_mul(8)
            .ok_or_else(|| Error::MalformedCatalog("too many entries".to_string()))?;
        for table in [catalog.originals, catalog.translations] {
            let fits = table
                .checked_add(table_len)
                .is_some_and(|end| end <= catalog.data.len());
            if !fits {
                return Err(Error::MalformedCatalog(format!(
                    "string table at {} exceeds file size",
                    table
                )));
            }
        }
        Ok(catalog)
    }

    /// Number of messages, including the header entry.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the catalog holds no messages at all.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterates over the messages in catalog order.
    ///
    /// Each call starts a new pass. The iterator yields `Err` at most once,
    /// for the first entry that cannot be decoded, and ends after it.
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            catalog: self,
            next: 0,
            failed: false,
        }
    }

    /// Serializes `entries` into a little-endian catalog without a hash
    /// table.
    ///
    /// Entries are sorted by their original string, as `msgfmt` does.
    pub fn encode(entries: &[Entry]) -> Vec<u8> {
        let mut pairs: Vec<(Vec<u8>, Vec<u8>)> = entries
            .iter()
            .map(|e| (e.key_bytes(), e.translation_bytes()))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        let count = pairs.len();
        let originals = HEADER_SIZE;
        let translations = originals + count * 8;
        let strings_start = translations + count * 8;

        let mut tables = Vec::with_capacity(count * 16);
        let mut strings = Vec::new();
        let mut translation_table = Vec::with_capacity(count * 8);
        for (key, _) in &pairs {
            push_slot(&mut tables, key.len(), strings_start + strings.len());
            strings.extend_from_slice(key);
            strings.push(0);
        }
        for (_, translation) in &pairs {
            push_slot(
                &mut translation_table,
                translation.len(),
                strings_start + strings.len(),
            );
            strings.extend_from_slice(translation);
            strings.push(0);
        }
        tables.extend(translation_table);

        let mut data = Vec::with_capacity(strings_start + strings.len());
        for word in [
            MAGIC,
            0,
            count as u32,
            originals as u32,
            translations as u32,
            0,
            strings_start as u32,
        ] {
            data.extend_from_slice(&word.to_le_bytes());
        }
        data.extend(tables);
        data.extend(strings);
        data
    }

    fn read_u32(&self, offset: usize) -> Result<u32, Error> {
        let bytes: [u8; 4] = offset
            .checked_add(4)
            .and_then(|end| self.data.get(offset..end))
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| {
                Error::MalformedCatalog(format!("offset {} is out of range", offset))
            })?;
        Ok(if self.big_endian {
            u32::from_be_bytes(bytes)
        } else {
            u32::from_le_bytes(bytes)
        })
    }

    fn string_at(&self, table: usize, index: usize) -> Result<&[u8], Error> {
        let slot = table + index * 8;
        let length = self.read_u32(slot)? as usize;
        let offset = self.read_u32(slot + 4)? as usize;
        offset
            .checked_add(length)
            .and_then(|end| self.data.get(offset..end))
            .ok_or_else(|| {
                Error::MalformedCatalog(format!("string #{} points outside the file", index))
            })
    }

    fn entry_at(&self, index: usize) -> Result<Entry, Error> {
        let original = self.string_at(self.originals, index)?;
        let translation = self.string_at(self.translations, index)?;

        let (context, key) = match original.iter().position(|b| *b == CONTEXT_SEPARATOR) {
            Some(pos) => (Some(decode(&original[..pos])), &original[pos + 1..]),
            None => (None, original),
        };
        let mut ids = key.split(|b| *b == 0);
        let id = decode(ids.next().unwrap_or_default());
        let id_plural = ids.next().map(decode);
        let translations = translation.split(|b| *b == 0).map(decode).collect();

        Ok(Entry {
            context,
            id,
            id_plural,
            translations,
        })
    }
}

fn push_slot(table: &mut Vec<u8>, length: usize, offset: usize) {
    table.extend_from_slice(&(length as u32).to_le_bytes());
    table.extend_from_slice(&(offset as u32).to_le_bytes());
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Iterator over the messages of a [`MoCatalog`].
#[derive(Debug)]
pub struct Entries<'a> {
    catalog: &'a MoCatalog,
    next: usize,
    failed: bool,
}

impl Iterator for Entries<'_> {
    type Item = Result<Entry, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next >= self.catalog.count {
            return None;
        }
        let entry = self.catalog.entry_at(self.next);
        self.next += 1;
        if entry.is_err() {
            self.failed = true;
        }
        Some(entry)
    }
}
