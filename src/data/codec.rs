// ============================================================
// Layer 4 — Character Codec
// ============================================================
// Turns text into the fixed-length integer sequences the model
// consumes, and model output back into text.
//
// There is no learned vocabulary: every character is its own
// token and its id is simply the Unicode code point.
//
//   "Hi" with max_length = 8
//   → [72, 105, 0, 0, 0, 0, 0, 0]
//
// Code 0 plays two roles at once. It is the padding marker AND
// the code of the NUL character, so a real NUL in the input is
// indistinguishable from padding and disappears on decode. The
// loss masking and decoding both rely on 0 meaning "filler".
//
// Reference: Rust Book §8 (Strings — chars vs bytes)

/// Padding id. Also the code of '\0'.
pub const PAD_ID: u32 = 0;

/// Substituted for characters the embedding table cannot hold.
pub const REPLACEMENT_ID: u32 = '?' as u32;

/// Encode `text` to exactly `max_length` character codes.
///
/// Longer text is truncated to its first `max_length` characters,
/// shorter text is right-padded with [`PAD_ID`].
pub fn encode(text: &str, max_length: usize) -> Vec<u32> {
    let mut ids: Vec<u32> = text.chars().take(max_length).map(u32::from).collect();
    ids.resize(max_length, PAD_ID);
    ids
}

/// Decode a sequence of codes back to text.
///
/// Padding is dropped wherever it appears, codes that are not a valid
/// `char` are skipped, and the result is trimmed.
pub fn decode<I>(ids: I) -> String
where
    I: IntoIterator,
    I::Item: Into<i64>,
{
    let text: String = ids
        .into_iter()
        .map(Into::into)
        .filter(|&id| id != PAD_ID as i64)
        .filter_map(|id| u32::try_from(id).ok().and_then(char::from_u32))
        .collect();
    text.trim().to_string()
}

/// Codec bound to one sequence length and vocabulary size.
#[derive(Debug, Clone, Copy)]
pub struct CharCodec {
    pub max_length: usize,
    pub vocab_size: usize,
}

impl CharCodec {
    pub fn new(max_length: usize, vocab_size: usize) -> Self {
        Self { max_length, vocab_size }
    }

    /// Like [`encode`], but characters outside the vocabulary become
    /// [`REPLACEMENT_ID`] so every id is a valid embedding row.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        let vocab = self.vocab_size as u32;
        encode(text, self.max_length)
            .into_iter()
            .map(|id| if id < vocab { id } else { REPLACEMENT_ID })
            .collect()
    }

    pub fn decode<I>(&self, ids: I) -> String
    where
        I: IntoIterator,
        I::Item: Into<i64>,
    {
        decode(ids)
    }
}
