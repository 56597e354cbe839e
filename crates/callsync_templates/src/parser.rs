//! Template body parsing.
//!
//! Bodies mix literal text with `{{...}}` markers. Three marker forms are
//! recognized: scalar tokens `{{name}}`, block openers `{{#each name}}`
//! and the block closer `{{/each}}`. Marker contents are trimmed; names
//! may contain dots. Anything else, including a `{{` with no closing
//! `}}`, is literal text.
//!
//! Parsing yields a flat instruction list. Blocks may not nest; the
//! structural check rejects malformed block markup before any rendering
//! happens.

use crate::error::TemplateSyntaxError;

/// One rendering instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Literal text, emitted as-is.
    Text(String),
    /// A `{{name}}` substitution token.
    Var(String),
    /// Start of a `{{#each name}}` block.
    OpenEach(String),
    /// End of the open block.
    CloseEach,
}

/// Parses a body into instructions, validating block structure.
pub fn parse(body: &str) -> Result<Vec<Op>, TemplateSyntaxError> {
    let ops = lex(body);
    check_blocks(&ops)?;
    Ok(ops)
}

fn lex(body: &str) -> Vec<Op> {
    let mut ops = Vec::new();
    let mut rest = body;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let len = match after.find("}}") {
            Some(len) => len,
            // No closing marker ahead; everything left is literal.
            None => break,
        };
        match marker_op(after[..len].trim()) {
            Some(op) => {
                push_text(&mut ops, &rest[..start]);
                ops.push(op);
                rest = &rest[start + 2 + len + 2..];
            }
            None => {
                // Not a recognized marker. Emit the braces literally and
                // rescan right after them, so a marker starting inside
                // the unrecognized span is still found.
                push_text(&mut ops, &rest[..start + 2]);
                rest = &rest[start + 2..];
            }
        }
    }

    push_text(&mut ops, rest);
    ops
}

fn push_text(ops: &mut Vec<Op>, chunk: &str) {
    if chunk.is_empty() {
        return;
    }
    if let Some(Op::Text(last)) = ops.last_mut() {
        last.push_str(chunk);
    } else {
        ops.push(Op::Text(chunk.to_string()));
    }
}

fn marker_op(token: &str) -> Option<Op> {
    if token == "/each" {
        return Some(Op::CloseEach);
    }
    if let Some(rest) = token.strip_prefix("#each") {
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let name = rest.trim_start();
        return is_name(name).then(|| Op::OpenEach(name.to_string()));
    }
    is_name(token).then(|| Op::Var(token.to_string()))
}

/// Variable names start with a letter or underscore; dots are allowed
/// after that for grouping.
fn is_name(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

fn check_blocks(ops: &[Op]) -> Result<(), TemplateSyntaxError> {
    let mut open: Option<&str> = None;
    for op in ops {
        match op {
            Op::OpenEach(name) => match open {
                Some(outer) => {
                    return Err(TemplateSyntaxError::NestedBlock {
                        outer: outer.to_string(),
                        inner: name.clone(),
                    });
                }
                None => open = Some(name),
            },
            Op::CloseEach => {
                if open.take().is_none() {
                    return Err(TemplateSyntaxError::UnexpectedClose);
                }
            }
            _ => {}
        }
    }
    match open {
        Some(name) => Err(TemplateSyntaxError::UnclosedBlock { name: name.to_string() }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_one_instruction() {
        let ops = parse("Hello world").unwrap();
        assert_eq!(ops, vec![Op::Text("Hello world".to_string())]);
    }

    #[test]
    fn test_tokens_and_text_interleave() {
        let ops = parse("Hi {{name}}, welcome to {{company.name}}!").unwrap();
        assert_eq!(
            ops,
            vec![
                Op::Text("Hi ".to_string()),
                Op::Var("name".to_string()),
                Op::Text(", welcome to ".to_string()),
                Op::Var("company.name".to_string()),
                Op::Text("!".to_string()),
            ]
        );
    }

    #[test]
    fn test_each_block_instructions() {
        let ops = parse("{{#each items}}<li>{{this}}</li>{{/each}}").unwrap();
        assert_eq!(
            ops,
            vec![
                Op::OpenEach("items".to_string()),
                Op::Text("<li>".to_string()),
                Op::Var("this".to_string()),
                Op::Text("</li>".to_string()),
                Op::CloseEach,
            ]
        );
    }

    #[test]
    fn test_marker_contents_are_trimmed() {
        let ops = parse("{{ name }}{{#each  items }}{{ /each }}").unwrap();
        assert_eq!(
            ops,
            vec![
                Op::Var("name".to_string()),
                Op::OpenEach("items".to_string()),
                Op::CloseEach,
            ]
        );
    }

    #[test]
    fn test_unterminated_marker_stays_literal() {
        let ops = parse("Hello {{name").unwrap();
        assert_eq!(ops, vec![Op::Text("Hello {{name".to_string())]);
    }

    #[test]
    fn test_unrecognized_marker_stays_literal() {
        let ops = parse("{{#if x}}a{{ }}b").unwrap();
        assert_eq!(ops, vec![Op::Text("{{#if x}}a{{ }}b".to_string())]);
    }

    #[test]
    fn test_marker_found_after_stray_braces() {
        let ops = parse("{{a b}} and {{c}}").unwrap();
        assert_eq!(
            ops,
            vec![Op::Text("{{a b}} and ".to_string()), Op::Var("c".to_string())]
        );
    }

    #[test]
    fn test_unclosed_block_is_rejected() {
        let err = parse("{{#each items}}<li>{{this}}</li>").unwrap_err();
        assert_eq!(err, TemplateSyntaxError::UnclosedBlock { name: "items".to_string() });
    }

    #[test]
    fn test_stray_close_is_rejected() {
        let err = parse("text {{/each}}").unwrap_err();
        assert_eq!(err, TemplateSyntaxError::UnexpectedClose);
    }

    #[test]
    fn test_nested_blocks_are_rejected() {
        let err = parse("{{#each outer}}{{#each inner}}{{/each}}{{/each}}").unwrap_err();
        assert_eq!(
            err,
            TemplateSyntaxError::NestedBlock {
                outer: "outer".to_string(),
                inner: "inner".to_string(),
            }
        );
    }

    #[test]
    fn test_sequential_blocks_are_fine() {
        let ops = parse("{{#each a}}x{{/each}}{{#each b}}y{{/each}}").unwrap();
        assert_eq!(ops.iter().filter(|op| matches!(op, Op::CloseEach)).count(), 2);
    }
}
