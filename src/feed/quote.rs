/// Undo git's C-style path quoting and drop a trailing `/`.
///
/// Paths with special bytes come back as `"dir/caf\303\251"`; anything not wrapped in
/// double quotes is returned as-is.
pub(crate) fn normalize_path(raw: &str) -> String {
    let unquoted = unquote(raw).unwrap_or_else(|| raw.to_string());
    match unquoted.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => unquoted,
    }
}

fn unquote(raw: &str) -> Option<String> {
    let inner = raw.strip_prefix('"')?.strip_suffix('"')?;
    let mut bytes = Vec::with_capacity(inner.len());
    let mut iter = inner.bytes().peekable();
    while let Some(b) = iter.next() {
        if b != b'\\' {
            bytes.push(b);
            continue;
        }
        let escaped = iter.next()?;
        let decoded = match escaped {
            b'a' => 0x07,
            b'b' => 0x08,
            b'f' => 0x0c,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'v' => 0x0b,
            b'0'..=b'7' => {
                let mut value = u32::from(escaped - b'0');
                for _ in 0..2 {
                    match iter.peek() {
                        Some(&d) if d.is_ascii_digit() && d < b'8' => {
                            value = value * 8 + u32::from(d - b'0');
                            iter.next();
                        }
                        _ => break,
                    }
                }
                u8::try_from(value).ok()?
            }
            other => other,
        };
        bytes.push(decoded);
    }
    Some(String::from_utf8_lossy(&bytes).into_owned())
}
