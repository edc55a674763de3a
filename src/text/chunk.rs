/// Splits text into contiguous slices of at most `chunk_size` chars.
/// Slices are cut on char boundaries with no sentence awareness; their
/// concatenation reproduces the input exactly, in order.
pub fn split_chunks(text: &str, chunk_size: usize) -> Vec<&str> {
    if chunk_size == 0 || text.is_empty() {
        return vec![text];
    }

    let mut chunks = Vec::with_capacity(text.len() / chunk_size + 1);
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == chunk_size {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    chunks.push(&text[start..]);

    chunks
}
