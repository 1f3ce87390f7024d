/// A line split into its verb and parameter tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// The first token.
    pub verb: &'a str,
    /// Remaining tokens in order. Consecutive spaces yield empty tokens.
    pub params: Vec<&'a str>,
}

/// Split a line into verb and parameters.
///
/// Surrounding whitespace is trimmed first. Returns `None` for a line that is
/// empty after trimming. There is no colon-introduced trailing parameter at
/// this level; see [`trailing`].
pub fn tokenize(line: &str) -> Option<RawLine<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut tokens = line.split(' ');
    let verb = tokens.next()?;
    Some(RawLine {
        verb,
        params: tokens.collect(),
    })
}

/// Join free-text tokens back together with single spaces, dropping one
/// leading `:` if the client sent one.
pub fn trailing(params: &[&str]) -> String {
    let joined = params.join(" ");
    match joined.strip_prefix(':') {
        Some(rest) => rest.to_string(),
        None => joined,
    }
}
