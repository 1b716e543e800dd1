//! Splitting of string literal contents into space-preserving segments.

/// Split literal contents so that every space is its own segment and each
/// run of non-space characters is another. A trailing `\n` escape is
/// split off its segment.
///
/// Concatenating the segments always reproduces `text`. A leading space
/// yields an empty first segment, and empty `text` yields one empty segment.
pub(crate) fn split_keep_space(text: &str) -> Vec<(&str, usize)> {
    let mut cuts = vec![0];
    let mut prev_space = false;
    for (i, c) in text.char_indices() {
        if c == ' ' || prev_space {
            cuts.push(i);
        }
        prev_space = c == ' ';
    }
    cuts.push(text.len());

    let mut segments = Vec::with_capacity(cuts.len());
    for window in cuts.windows(2) {
        let (start, end) = (window[0], window[1]);
        let segment = &text[start..end];
        match segment.strip_suffix("\\n") {
            Some(head) => {
                segments.push((head, start));
                segments.push(("\\n", start + head.len()));
            }
            None => segments.push((segment, start)),
        }
    }
    segments
}

#[cfg(test)]
mod tests;
