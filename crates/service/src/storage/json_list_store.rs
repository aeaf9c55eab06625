use std::{
    io::{self, ErrorKind, Write},
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use tokio::fs;
use tracing::debug;

use crate::errors::ServiceError;

const INDENT: &[u8] = b"    ";

/// JSON file holding an ordered list of `T`.
///
/// Nothing is cached: `load` reads the whole file and `save` overwrites it.
/// There is no locking and no atomic rename, so two callers doing
/// load-modify-save at the same time can lose one of the writes, and a crash
/// mid-write can leave a truncated file behind.
#[derive(Debug)]
pub struct JsonListStore<T> {
    file_path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonListStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Bind the store to a path. The file is not touched until the first call.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), _marker: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read every item. A missing file is an empty list.
    pub async fn load(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "backing file absent; empty list");
                return Ok(Vec::new());
            }
            Err(e) => return Err(ServiceError::storage("read", e)),
        };
        let items: Vec<T> = serde_json::from_slice(&bytes)?;
        Ok(items)
    }

    /// Overwrite the file with `items` as 4-space indented, ASCII-only JSON.
    pub async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        let data = encode_pretty(items)?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::storage("write", e))?;
        debug!(path = %self.file_path.display(), count = items.len(), "backing file rewritten");
        Ok(())
    }

    /// Load, hand the list to `f`, then save the result.
    pub async fn update<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let mut items = self.load().await?;
        let out = f(&mut items);
        self.save(&items).await?;
        Ok(out)
    }
}

fn encode_pretty<T: Serialize>(items: &[T]) -> Result<Vec<u8>, ServiceError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, AsciiPrettyFormatter::new());
    items.serialize(&mut ser)?;
    Ok(buf)
}

/// Pretty printer that writes every non-ASCII char as a `\uXXXX` escape,
/// using a surrogate pair outside the BMP.
struct AsciiPrettyFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl<'a> AsciiPrettyFormatter<'a> {
    fn new() -> Self {
        Self { inner: PrettyFormatter::with_indent(INDENT) }
    }
}

impl<'a> Formatter for AsciiPrettyFormatter<'a> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units).iter() {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
