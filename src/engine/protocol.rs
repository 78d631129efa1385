/// Terminates each text field on the engine's stdin.
pub const LINE_TERMINATOR: u8 = b'\n';

/// The exact bytes written to the engine: `text1 \n text2 \n`.
///
/// Texts are copied byte for byte with no escaping. A text that itself contains
/// [`LINE_TERMINATOR`] cannot be split back into two fields unambiguously; such
/// input is still passed through, see [`EncodedInput::is_ambiguous`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedInput {
    bytes: Vec<u8>,
    ambiguous: bool,
}

impl EncodedInput {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// True when one of the texts contained the line terminator.
    pub fn is_ambiguous(&self) -> bool {
        self.ambiguous
    }
}

pub fn encode(text1: &str, text2: &str) -> EncodedInput {
    let mut bytes = Vec::with_capacity(text1.len() + text2.len() + 2);
    bytes.extend_from_slice(text1.as_bytes());
    bytes.push(LINE_TERMINATOR);
    bytes.extend_from_slice(text2.as_bytes());
    bytes.push(LINE_TERMINATOR);

    let ambiguous = [text1, text2]
        .iter()
        .any(|text| text.as_bytes().contains(&LINE_TERMINATOR));

    EncodedInput { bytes, ambiguous }
}
