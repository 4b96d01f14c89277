//! Directory entries and their coarse file-type tags.

use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::{DirentError, Result};

/// Coarse file-type tag, obtainable without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// A directory.
    Directory,
    /// A regular file.
    Regular,
    /// A symbolic link, never resolved to its target.
    Symlink,
    /// Devices, sockets, FIFOs, and anything else.
    Other,
}

/// Mask selecting the file-format bits of a POSIX `st_mode`.
const S_IFMT: u32 = 0o170_000;

/// Canonical tag for each file-format value. The format field is an
/// enumeration, not a bit set: `S_IFLNK` shares bits with `S_IFREG`, so
/// matching must compare the masked value exactly.
const MODE_TABLE: [(u32, FileKind); 3] = [
    (0o040_000, FileKind::Directory),
    (0o100_000, FileKind::Regular),
    (0o120_000, FileKind::Symlink),
];

impl FileKind {
    /// Classifies a raw POSIX mode. Formats outside the table become `Other`.
    #[must_use]
    pub fn from_mode(mode: u32) -> Self {
        let format = mode & S_IFMT;
        MODE_TABLE
            .iter()
            .find(|(bits, _)| *bits == format)
            .map_or(Self::Other, |(_, kind)| *kind)
    }

    /// Short lowercase label, as used in text output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::Regular => "regular",
            Self::Symlink => "symlink",
            Self::Other => "other",
        }
    }
}

impl From<fs::FileType> for FileKind {
    /// Symlink is checked first so a link is never reported as its target.
    fn from(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::Regular
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One child of a directory: its base name and coarse type.
///
/// Equality compares both fields. Ordering, via [`Dirent::cmp_by_name`], uses
/// only the name's bytes.
///
/// Deserialized entries go through [`Dirent::new`], so a malformed name is
/// rejected there too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDirent")]
pub struct Dirent {
    #[serde(serialize_with = "os_name::serialize")]
    name: OsString,
    #[serde(rename = "type")]
    kind: FileKind,
}

/// Unvalidated wire form of a [`Dirent`].
#[derive(Deserialize)]
struct RawDirent {
    #[serde(with = "os_name")]
    name: OsString,
    #[serde(rename = "type")]
    kind: FileKind,
}

impl TryFrom<RawDirent> for Dirent {
    type Error = DirentError;

    fn try_from(raw: RawDirent) -> Result<Self> {
        Self::new(raw.name, raw.kind)
    }
}

impl Dirent {
    /// Creates an entry after validating its name.
    ///
    /// # Errors
    ///
    /// Returns [`DirentError::InvalidArgument`] when `name` is empty or
    /// contains a path separator.
    pub fn new(name: impl Into<OsString>, kind: FileKind) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DirentError::InvalidArgument("entry name is empty".to_string()));
        }
        if name.as_encoded_bytes().iter().any(|&b| std::path::is_separator(char::from(b))) {
            return Err(DirentError::InvalidArgument(format!(
                "entry name {name:?} contains a path separator"
            )));
        }
        Ok(Self { name, kind })
    }

    /// Names handed back by the OS are already base names.
    pub(crate) fn from_os(name: OsString, kind: FileKind) -> Self {
        Self { name, kind }
    }

    /// The entry's base name.
    #[must_use]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// The entry's coarse type tag.
    #[must_use]
    pub fn file_type(&self) -> FileKind {
        self.kind
    }

    /// Returns true if this entry is a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }

    /// Returns true if this entry is a regular file.
    #[must_use]
    pub fn is_regular(&self) -> bool {
        self.kind == FileKind::Regular
    }

    /// Returns true if this entry is a symbolic link.
    #[must_use]
    pub fn is_symlink(&self) -> bool {
        self.kind == FileKind::Symlink
    }

    /// Returns true if this entry is none of the above.
    #[must_use]
    pub fn is_other(&self) -> bool {
        self.kind == FileKind::Other
    }

    /// Byte-ordinal comparison of names. The type tag is not consulted.
    #[must_use]
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.name.as_encoded_bytes().cmp(other.name.as_encoded_bytes())
    }

    /// Consumes the entry, returning its name.
    #[must_use]
    pub fn into_name(self) -> OsString {
        self.name
    }
}

/// Owned collection of entries in OS order until sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dirents(Vec<Dirent>);

impl Dirents {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorts entries by name. Stable, and idempotent.
    pub fn sort_by_name(&mut self) {
        self.0.sort_by(Dirent::cmp_by_name);
    }

    /// Returns the entry with the given name, if present.
    #[must_use]
    pub fn get(&self, name: impl AsRef<OsStr>) -> Option<&Dirent> {
        let name = name.as_ref();
        self.0.iter().find(|d| d.name() == name)
    }

    /// Projects the names, keeping the current order.
    #[must_use]
    pub fn names(&self) -> Vec<OsString> {
        self.0.iter().map(|d| d.name.clone()).collect()
    }

    /// Returns the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<Dirent> {
        self.0
    }
}

impl Deref for Dirents {
    type Target = [Dirent];

    fn deref(&self) -> &[Dirent] {
        &self.0
    }
}

impl From<Vec<Dirent>> for Dirents {
    fn from(entries: Vec<Dirent>) -> Self {
        Self(entries)
    }
}

impl FromIterator<Dirent> for Dirents {
    fn from_iter<I: IntoIterator<Item = Dirent>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Dirents {
    type Item = Dirent;
    type IntoIter = std::vec::IntoIter<Dirent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dirents {
    type Item = &'a Dirent;
    type IntoIter = std::slice::Iter<'a, Dirent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Serializes names as strings when they are valid Unicode, and as
/// `{ bytes: [...] }` otherwise, so a name survives a cassette unchanged.
pub(crate) mod os_name {
    use std::ffi::{OsStr, OsString};
    use std::fmt;

    use serde::de::{self, MapAccess, Visitor};
    use serde::ser::{self, SerializeMap};
    use serde::{Deserializer, Serializer};

    const BYTES_KEY: &str = "bytes";

    pub fn serialize<S: Serializer>(name: &OsStr, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(text) = name.to_str() {
            return serializer.serialize_str(text);
        }
        let bytes = raw_bytes(name).map_err(ser::Error::custom)?;
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(BYTES_KEY, &bytes)?;
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OsString, D::Error> {
        deserializer.deserialize_any(NameVisitor)
    }

    #[cfg(unix)]
    fn raw_bytes(name: &OsStr) -> Result<Vec<u8>, String> {
        use std::os::unix::ffi::OsStrExt;

        Ok(name.as_bytes().to_vec())
    }

    #[cfg(not(unix))]
    fn raw_bytes(name: &OsStr) -> Result<Vec<u8>, String> {
        Err(format!("entry name {name:?} is not valid Unicode"))
    }

    #[cfg(unix)]
    fn from_raw_bytes(bytes: Vec<u8>) -> Result<OsString, String> {
        use std::os::unix::ffi::OsStringExt;

        Ok(OsString::from_vec(bytes))
    }

    #[cfg(not(unix))]
    fn from_raw_bytes(bytes: Vec<u8>) -> Result<OsString, String> {
        String::from_utf8(bytes).map(OsString::from).map_err(|e| e.to_string())
    }

    struct NameVisitor;

    impl<'de> Visitor<'de> for NameVisitor {
        type Value = OsString;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a name string or a map with a `bytes` list")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<OsString, E> {
            Ok(OsString::from(v))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<OsString, E> {
            Ok(OsString::from(v))
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<OsString, A::Error> {
            let mut bytes: Option<Vec<u8>> = None;
            while let Some(key) = map.next_key::<String>()? {
                if key != BYTES_KEY {
                    return Err(de::Error::unknown_field(&key, &[BYTES_KEY]));
                }
                if bytes.is_some() {
                    return Err(de::Error::duplicate_field(BYTES_KEY));
                }
                bytes = Some(map.next_value()?);
            }
            let bytes = bytes.ok_or_else(|| de::Error::missing_field(BYTES_KEY))?;
            from_raw_bytes(bytes).map_err(de::Error::custom)
        }
    }

    /// Same encoding, for a list of names.
    pub mod many {
        use std::ffi::{OsStr, OsString};

        use serde::ser::SerializeSeq;
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        struct Borrowed<'a>(&'a OsStr);

        impl Serialize for Borrowed<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                super::serialize(self.0, serializer)
            }
        }

        struct Owned(OsString);

        impl<'de> Deserialize<'de> for Owned {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                super::deserialize(deserializer).map(Owned)
            }
        }

        pub fn serialize<S: Serializer>(
            names: &[OsString],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(names.len()))?;
            for name in names {
                seq.serialize_element(&Borrowed(name))?;
            }
            seq.end()
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<OsString>, D::Error> {
            let names = Vec::<Owned>::deserialize(deserializer)?;
            Ok(names.into_iter().map(|n| n.0).collect())
        }
    }
}
