use crate::constants::TRUNCATION_MARKER;
use crate::text::{clean_model_output, split_chunks, truncate_output};

#[test]
fn short_text_is_a_single_chunk() {
    let chunks = split_chunks("hello", 1800);
    assert_eq!(chunks, vec!["hello"]);
}

#[test]
fn chunk_count_is_ceiling_of_length_over_size() {
    let text = "x".repeat(2500);
    let chunks = split_chunks(&text, 1800);
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].chars().count(), 1800);
    assert_eq!(chunks[1].chars().count(), 700);

    let text = "x".repeat(3600);
    assert_eq!(split_chunks(&text, 1800).len(), 2);

    let text = "x".repeat(3601);
    assert_eq!(split_chunks(&text, 1800).len(), 3);
}

#[test]
fn chunks_reassemble_to_the_input_in_order() {
    let text: String = (0..5000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
    let chunks = split_chunks(&text, 1800);

    let reassembled: String = chunks.concat();
    assert_eq!(reassembled, text);

    // every slice is contiguous and in original order
    let mut offset = 0;
    for chunk in &chunks {
        assert_eq!(&text[offset..offset + chunk.len()], *chunk);
        offset += chunk.len();
    }
}

#[test]
fn chunking_counts_chars_not_bytes() {
    let text = "日本語のテキストです"; // 10 chars, 30 bytes
    let chunks = split_chunks(text, 4);
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].chars().count(), 4);
    assert_eq!(chunks[1].chars().count(), 4);
    assert_eq!(chunks[2].chars().count(), 2);
    assert_eq!(chunks.concat(), text);
}

#[test]
fn fence_delimiters_are_stripped_but_content_kept() {
    let raw = "```json\n{\"a\":1}\n```\ntrailing";
    let cleaned = clean_model_output(raw);
    assert_eq!(cleaned, "{\"a\":1}\ntrailing");
}

#[test]
fn control_and_zero_width_chars_are_removed() {
    let raw = "he\0llo\u{200B} wo\u{FEFF}rld\u{200D}";
    assert_eq!(clean_model_output(raw), "hello world");
}

#[test]
fn clean_trims_surrounding_whitespace() {
    assert_eq!(clean_model_output("  answer  \n\n"), "answer");
}

#[test]
fn long_output_is_truncated_with_marker() {
    let text = "x".repeat(500);
    let truncated = truncate_output(&text, 100);

    assert!(truncated.ends_with(TRUNCATION_MARKER));
    assert_eq!(
        truncated.chars().count(),
        100 + TRUNCATION_MARKER.chars().count()
    );
    assert!(truncated.starts_with(&"x".repeat(100)));
}

#[test]
fn output_at_the_limit_is_untouched() {
    let text = "x".repeat(100);
    let result = truncate_output(&text, 100);
    assert_eq!(result, text);
    assert!(!result.contains(TRUNCATION_MARKER));
}

#[test]
fn truncation_respects_char_boundaries() {
    let text = "中".repeat(50);
    let truncated = truncate_output(&text, 10);
    assert!(truncated.starts_with(&"中".repeat(10)));
    assert!(truncated.ends_with(TRUNCATION_MARKER));
}
