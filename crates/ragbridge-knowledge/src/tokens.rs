//! Best-effort token counting with the `cl100k_base` encoding.

use std::sync::LazyLock;

use tiktoken_rs::CoreBPE;

static CL100K: LazyLock<Option<CoreBPE>> = LazyLock::new(|| match tiktoken_rs::cl100k_base() {
    Ok(bpe) => Some(bpe),
    Err(e) => {
        tracing::warn!("cl100k_base tokenizer unavailable, token counts will be 0: {e}");
        None
    }
});

/// Count `cl100k_base` tokens in `text`, or 0 if the encoder failed to load.
#[must_use]
pub fn count_tokens(text: &str) -> usize {
    CL100K
        .as_ref()
        .map_or(0, |bpe| bpe.encode_ordinary(text).len())
}
