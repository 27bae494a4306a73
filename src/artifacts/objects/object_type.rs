use anyhow::{Context, bail};
use std::io::BufRead;
use std::str::FromStr;

/// Kind of a stored object, as named in its `<type> <size>\0` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }

    /// Consume the `<type> <size>\0` header and return the object type
    ///
    /// The size must be a decimal number; the body itself is left unread.
    pub fn parse_object_type(data_reader: &mut impl BufRead) -> anyhow::Result<ObjectType> {
        let mut header = Vec::new();
        data_reader.read_until(b'\0', &mut header)?;

        if header.pop() != Some(b'\0') {
            bail!("Object header is not NUL terminated");
        }

        let header = std::str::from_utf8(&header).context("Object header is not UTF-8")?;
        let (object_type, size) = header
            .split_once(' ')
            .with_context(|| format!("Malformed object header: {header:?}"))?;
        size.parse::<usize>()
            .with_context(|| format!("Invalid object size: {size:?}"))?;

        object_type.parse()
    }
}

impl FromStr for ObjectType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            _ => bail!("Invalid object type: {value}"),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
