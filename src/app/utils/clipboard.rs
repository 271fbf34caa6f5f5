// SPDX-License-Identifier: GPL-3.0-only

/// Minimal clipboard surface, so copying can be checked without a desktop session
pub trait ClipboardAccess {
    fn write(&mut self, text: &str) -> Result<(), anywho::Error>;
    fn read(&mut self) -> Result<String, anywho::Error>;
}

impl ClipboardAccess for arboard::Clipboard {
    fn write(&mut self, text: &str) -> Result<(), anywho::Error> {
        self.set_text(text)?;
        Ok(())
    }

    fn read(&mut self) -> Result<String, anywho::Error> {
        Ok(self.get_text()?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error("there is no code to copy")]
    NothingToCopy,
    #[error("could not write to the clipboard: {0}")]
    Write(anywho::Error),
    #[error("could not read the clipboard back: {0}")]
    Read(anywho::Error),
    #[error("the clipboard holds something else after copying")]
    Mismatch,
}

/// Copies `text` and reads it back, succeeding only if the clipboard now holds it
pub fn copy_verified<C>(clipboard: &mut C, text: &str) -> Result<(), CopyError>
where
    C: ClipboardAccess + ?Sized,
{
    let text = text.trim();
    if text.is_empty() {
        return Err(CopyError::NothingToCopy);
    }

    clipboard.write(text).map_err(CopyError::Write)?;
    let echoed = clipboard.read().map_err(CopyError::Read)?;

    if echoed.trim() == text {
        Ok(())
    } else {
        Err(CopyError::Mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anywho::anywho;

    #[derive(Default)]
    struct FakeClipboard {
        content: String,
        /// Replaces whatever gets written, like another app grabbing the clipboard
        hijack: Option<String>,
        broken: bool,
    }

    impl ClipboardAccess for FakeClipboard {
        fn write(&mut self, text: &str) -> Result<(), anywho::Error> {
            if self.broken {
                return Err(anywho!("no clipboard"));
            }
            self.content = self.hijack.clone().unwrap_or_else(|| text.to_string());
            Ok(())
        }

        fn read(&mut self) -> Result<String, anywho::Error> {
            Ok(self.content.clone())
        }
    }

    #[test]
    fn copies_and_verifies() {
        let mut clipboard = FakeClipboard::default();
        copy_verified(&mut clipboard, "  123456  ").unwrap();
        assert_eq!(clipboard.content, "123456");
    }

    #[test]
    fn refuses_empty_text() {
        let mut clipboard = FakeClipboard::default();
        assert!(matches!(
            copy_verified(&mut clipboard, "   "),
            Err(CopyError::NothingToCopy)
        ));
    }

    #[test]
    fn detects_a_different_read_back() {
        let mut clipboard = FakeClipboard {
            hijack: Some("something else".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            copy_verified(&mut clipboard, "123456"),
            Err(CopyError::Mismatch)
        ));
    }

    #[test]
    fn surfaces_write_failures() {
        let mut clipboard = FakeClipboard {
            broken: true,
            ..Default::default()
        };
        assert!(matches!(
            copy_verified(&mut clipboard, "123456"),
            Err(CopyError::Write(_))
        ));
    }
}
