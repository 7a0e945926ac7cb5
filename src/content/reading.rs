//! Reading-time estimation
//!
//! Word counting splits on single spaces only - no punctuation
//! normalization, no multi-space collapsing. This keeps the estimate
//! stable against the CMS editor's plain text exactly as authored.

use crate::cms::ContentBlock;

/// Average reading speed used for the estimate
pub const WORDS_PER_MINUTE: usize = 200;

/// Count words in a text by splitting on single spaces
pub fn word_count(text: &str) -> usize {
    text.split(' ').count()
}

/// Total word count of a post: every section heading plus every body
/// paragraph, in display order
pub fn total_words(content: &[ContentBlock]) -> usize {
    content
        .iter()
        .map(|block| {
            word_count(&block.heading)
                + block
                    .body
                    .iter()
                    .map(|paragraph| word_count(&paragraph.text))
                    .sum::<usize>()
        })
        .sum()
}

/// Estimated reading time in whole minutes, rounded up
pub fn read_time(total_words: usize) -> u32 {
    total_words.div_ceil(WORDS_PER_MINUTE) as u32
}
