//! Text channel that carries share text between devices: a clipboard,
//! a share sheet, or stdin/stdout for the CLI.

use std::io::{Read, Write};

use log::debug;

use crate::error::CatalogError;
use crate::share::{self, DecodedRecipe};

pub trait Transport {
    /// Current contents, or `None` when the channel holds no text
    fn read_text(&mut self) -> Result<Option<String>, CatalogError>;

    fn write_text(&mut self, text: &str) -> Result<(), CatalogError>;
}

/// In-process clipboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTransport {
    contents: Option<String>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        MemoryTransport {
            contents: Some(text.into()),
        }
    }

    pub fn clear(&mut self) {
        self.contents = None;
    }
}

impl Transport for MemoryTransport {
    fn read_text(&mut self) -> Result<Option<String>, CatalogError> {
        Ok(self.contents.clone())
    }

    fn write_text(&mut self, text: &str) -> Result<(), CatalogError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Reads share text from one stream and writes it to another
pub struct StreamTransport<R, W> {
    reader: R,
    writer: W,
}

impl<R: Read, W: Write> StreamTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        StreamTransport { reader, writer }
    }
}

impl StreamTransport<std::io::Stdin, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin(), std::io::stdout())
    }
}

impl<R: Read, W: Write> Transport for StreamTransport<R, W> {
    fn read_text(&mut self) -> Result<Option<String>, CatalogError> {
        let mut text = String::new();
        self.reader.read_to_string(&mut text)?;
        Ok(if text.is_empty() { None } else { Some(text) })
    }

    fn write_text(&mut self, text: &str) -> Result<(), CatalogError> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Decode whatever the channel holds.
///
/// An empty (or whitespace-only) channel is [`CatalogError::NoData`], kept
/// apart from malformed text, which is [`CatalogError::Format`].
pub fn import_from_transport<T: Transport + ?Sized>(
    transport: &mut T,
) -> Result<DecodedRecipe, CatalogError> {
    let text = match transport.read_text()? {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            debug!("Transport is empty, nothing to import");
            return Err(CatalogError::NoData);
        }
    };
    share::decode(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_transport_is_no_data() {
        let mut transport = MemoryTransport::new();
        assert!(matches!(
            import_from_transport(&mut transport),
            Err(CatalogError::NoData)
        ));

        let mut transport = MemoryTransport::with_text("  \n ");
        assert!(matches!(
            import_from_transport(&mut transport),
            Err(CatalogError::NoData)
        ));
    }

    #[test]
    fn test_garbage_is_format_error() {
        let mut transport = MemoryTransport::with_text("just some text");
        assert!(matches!(
            import_from_transport(&mut transport),
            Err(CatalogError::Format(_))
        ));
    }

    #[test]
    fn test_memory_transport_write_then_read() {
        let mut transport = MemoryTransport::new();
        transport.write_text("hello").unwrap();
        assert_eq!(transport.read_text().unwrap().as_deref(), Some("hello"));
        transport.clear();
        assert_eq!(transport.read_text().unwrap(), None);
    }

    #[test]
    fn test_stream_transport() {
        let input = std::io::Cursor::new(Vec::<u8>::new());
        let mut output = Vec::new();
        {
            let mut transport = StreamTransport::new(input, &mut output);
            assert_eq!(transport.read_text().unwrap(), None);
            transport.write_text("shared").unwrap();
        }
        assert_eq!(output, b"shared");
    }
}
