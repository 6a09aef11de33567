// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "## Sample Content\n\nLorem ipsum *dolor* sit amet, consectetur adipiscing elit.\n\n- First item with `code`\n- Second item\n\n> Quoted text that spans\n> a couple of lines.\n\n";
    base.repeat(size)
}

/// Evenly spaced, non-overlapping highlights across `text_len` chars
#[allow(dead_code)]
pub fn generate_highlights(
    count: usize,
    text_len: usize,
) -> Vec<persistent_highlights_engine::Highlight> {
    let stride = (text_len / count.max(1)).max(2);
    (0..count)
        .map(|i| {
            let start = i * stride;
            persistent_highlights_engine::Highlight::new(
                format!("h{i}"),
                start,
                (start + stride / 2).min(text_len),
                "yellow",
            )
        })
        .collect()
}
