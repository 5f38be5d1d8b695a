use crate::model::{Fragment, FragmentKind};

/// Flattens fragments into non-blank, trimmed lines in reading order.
///
/// Text fragments contribute one line each; table fragments contribute one
/// line per row. Other fragment kinds carry no text and are skipped.
pub fn extract_lines(fragments: &[Fragment]) -> Vec<String> {
    let mut lines = Vec::new();

    for fragment in fragments {
        match &fragment.kind {
            FragmentKind::Text => {
                let text = fragment.content.trim();
                if !text.is_empty() {
                    lines.push(text.to_string());
                }
            }
            FragmentKind::Table => {
                lines.extend(
                    fragment
                        .content
                        .split('\n')
                        .map(str::trim)
                        .filter(|row| !row.is_empty())
                        .map(ToOwned::to_owned),
                );
            }
            FragmentKind::Other(_) => {}
        }
    }

    lines
}
