//! Scanner for the `${identifier}` placeholder micro-grammar:
//! `${` then `[A-Za-z_][A-Za-z0-9_]*` then `}`.

/// One placeholder occurrence inside a byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    /// Byte offset of the `$`.
    pub start: usize,
    /// Byte offset one past the closing `}`.
    pub end: usize,
}

impl Placeholder {
    /// The literal bytes of this occurrence, e.g. `${host}`.
    pub fn literal(&self) -> Vec<u8> {
        format!("${{{}}}", self.name).into_bytes()
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Find every `${identifier}` occurrence in `bytes`.
///
/// Malformed candidates (`${`, `${}`, `${1x}`, a bare `$`) are skipped, not
/// errors: inside a string literal they are ordinary content.
pub fn scan(bytes: &[u8]) -> Vec<Placeholder> {
    let mut found = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }
        match match_at(bytes, i) {
            Some(ph) => {
                i = ph.end;
                found.push(ph);
            }
            None => i += 1,
        }
    }

    found
}

/// Succeeds only if `bytes` is exactly one `${identifier}`; returns the name.
pub fn exact(bytes: &[u8]) -> Option<String> {
    let ph = match_at(bytes, 0)?;
    if ph.end == bytes.len() {
        Some(ph.name)
    } else {
        None
    }
}

/// Try to match a placeholder whose `$` sits at `start`.
fn match_at(bytes: &[u8], start: usize) -> Option<Placeholder> {
    let mut i = start;
    if bytes.get(i) != Some(&b'$') || bytes.get(i + 1) != Some(&b'{') {
        return None;
    }
    i += 2;

    if !is_ident_start(*bytes.get(i)?) {
        return None;
    }
    let name_start = i;
    while i < bytes.len() && is_ident_byte(bytes[i]) {
        i += 1;
    }

    if bytes.get(i) != Some(&b'}') {
        return None;
    }
    let name = String::from_utf8(bytes[name_start..i].to_vec()).ok()?;

    Some(Placeholder {
        name,
        start,
        end: i + 1,
    })
}
