//! Generic cleanup of host text before it is spoken

/// Strip `<tag>` markup and `{control}` sequences, collapse whitespace and
/// trim. An opening bracket without a matching close is kept verbatim.
pub fn clean_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    let mut rest = raw;

    while let Some(c) = rest.chars().next() {
        let closer = match c {
            '<' => Some('>'),
            '{' => Some('}'),
            _ => None,
        };

        if let Some(close) = closer.and_then(|close| rest.find(close)) {
            rest = &rest[close + 1..];
            continue;
        }

        if c.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }

    out
}
