//! Placeholder syntax shared by the fragment builder and the renderer.

/// The placeholder character callers write in template text.
pub const PLACEHOLDER: char = '?';

/// Two placeholder characters in a row stand for one literal `?`.
pub const ESCAPED_PLACEHOLDER: &str = "??";

/// Internal marker written in place of every resolved placeholder.
///
/// Built fragments carry this marker until a [`Renderer`](crate::Renderer)
/// rewrites it into dialect syntax. It contains no `?`, so it can never be
/// confused with an unresolved or escaped placeholder.
pub const PARAM_MARKER: &str = "{{quill_param}}";

/// One piece of a template split at its placeholder sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'t> {
    /// Literal text, escaped `??` runs included verbatim
    Text(&'t str),
    /// A lone `?` waiting for an argument
    Site,
}

/// Splits template text at its placeholder sites in one left-to-right pass.
///
/// `??` is consumed as an escape pair before a lone `?` is considered, so
/// `???` is one escaped `?` followed by one site.
pub(crate) fn segments(template: &str) -> Vec<Segment<'_>> {
    let bytes = template.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'?' {
            i += 1;
            continue;
        }
        if bytes.get(i + 1) == Some(&b'?') {
            i += 2;
            continue;
        }
        if start < i {
            out.push(Segment::Text(&template[start..i]));
        }
        out.push(Segment::Site);
        i += 1;
        start = i;
    }

    if start < bytes.len() {
        out.push(Segment::Text(&template[start..]));
    }
    out
}

/// Counts the placeholder sites in a template.
pub(crate) fn count_sites(template: &str) -> usize {
    segments(template)
        .iter()
        .filter(|segment| matches!(segment, Segment::Site))
        .count()
}
