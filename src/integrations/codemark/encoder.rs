// src/integrations/codemark/encoder.rs
//
// Scannable code marks
//
// Payloads are byte-mode QR symbols. The character set hint controls how the
// payload string becomes bytes; scanners on the playback side expect
// ISO-8859-15 for Latin text.

use qrcode::{Color, QrCode};

use crate::error::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterSet {
    /// Latin-9, falls back to UTF-8 for characters outside it
    Iso8859_15,
    Utf8,
}

impl CharacterSet {
    pub fn encode(&self, payload: &str) -> Vec<u8> {
        match self {
            CharacterSet::Utf8 => payload.as_bytes().to_vec(),
            CharacterSet::Iso8859_15 => match to_latin9(payload) {
                Some(bytes) => bytes,
                None => {
                    log::debug!("Payload not representable in ISO-8859-15, using UTF-8: {}", payload);
                    payload.as_bytes().to_vec()
                }
            },
        }
    }
}

fn to_latin9(payload: &str) -> Option<Vec<u8>> {
    payload.chars().map(latin9_byte).collect()
}

fn latin9_byte(c: char) -> Option<u8> {
    match c {
        '€' => Some(0xA4),
        'Š' => Some(0xA6),
        'š' => Some(0xA8),
        'Ž' => Some(0xB4),
        'ž' => Some(0xB8),
        'Œ' => Some(0xBC),
        'œ' => Some(0xBD),
        'Ÿ' => Some(0xBE),
        // Latin-1 code points that Latin-9 replaced
        '\u{A4}' | '\u{A6}' | '\u{A8}' | '\u{B4}' | '\u{B8}' | '\u{BC}' | '\u{BD}' | '\u{BE}' => None,
        c if (c as u32) <= 0xFF => Some(c as u32 as u8),
        _ => None,
    }
}

/// Square module matrix, row-major, `true` = dark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeMark {
    width: usize,
    modules: Vec<bool>,
}

impl CodeMark {
    pub fn new(width: usize, modules: Vec<bool>) -> Self {
        debug_assert_eq!(modules.len(), width * width);
        Self { width, modules }
    }

    /// Modules per side
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        if x >= self.width {
            return false;
        }
        self.modules.get(y * self.width + x).copied().unwrap_or(false)
    }
}

pub trait CodeMarkEncoder: Send + Sync {
    fn encode(&self, payload: &str, charset: CharacterSet) -> AppResult<CodeMark>;
}

#[derive(Debug, Default)]
pub struct QrCodeEncoder;

impl CodeMarkEncoder for QrCodeEncoder {
    fn encode(&self, payload: &str, charset: CharacterSet) -> AppResult<CodeMark> {
        let code = QrCode::new(charset.encode(payload))?;
        let modules = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();
        Ok(CodeMark::new(code.width(), modules))
    }
}
