//! Instruction interpretation against a resolved variable table.
//!
//! Expansion is deterministic: the same body and table always produce the
//! same output. Scalar entries substitute `{{name}}` tokens; list entries
//! drive `{{#each name}}` blocks. Tokens that match nothing are left in
//! the output untouched.

use crate::error::TemplateSyntaxError;
use crate::parser::{self, Op};
use crate::value::{ListItem, ResolvedVariables};

/// Renders a template body against a resolved variable table.
pub fn expand(body: &str, variables: &ResolvedVariables) -> Result<String, TemplateSyntaxError> {
    let ops = parser::parse(body)?;
    Ok(run(&ops, variables))
}

fn run(ops: &[Op], variables: &ResolvedVariables) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i < ops.len() {
        match &ops[i] {
            Op::Text(chunk) => out.push_str(chunk),
            Op::Var(name) => emit_var(&mut out, name, variables, None),
            Op::OpenEach(name) => {
                let close = closing_index(ops, i);
                if let Some(items) = variables.list(name) {
                    for item in items {
                        run_block(&mut out, &ops[i + 1..close], variables, item);
                    }
                }
                // Absent or scalar-valued names expand to nothing.
                i = close;
            }
            Op::CloseEach => {}
        }
        i += 1;
    }
    out
}

/// Index of the close matching the block opened at `open`. The parser
/// guarantees one exists before any other block marker.
fn closing_index(ops: &[Op], open: usize) -> usize {
    ops[open..]
        .iter()
        .position(|op| matches!(op, Op::CloseEach))
        .map(|offset| open + offset)
        .unwrap_or(ops.len())
}

fn run_block(out: &mut String, ops: &[Op], variables: &ResolvedVariables, item: &ListItem) {
    for op in ops {
        match op {
            Op::Text(chunk) => out.push_str(chunk),
            Op::Var(name) => emit_var(out, name, variables, Some(item)),
            Op::OpenEach(_) | Op::CloseEach => {}
        }
    }
}

/// Emits the substitution for one token. A scalar table entry always
/// wins; inside a block, `this` then the item's fields are tried next;
/// tokens that resolve to nothing are re-emitted literally.
fn emit_var(out: &mut String, name: &str, variables: &ResolvedVariables, item: Option<&ListItem>) {
    if let Some(scalar) = variables.scalar(name) {
        out.push_str(&scalar.to_string());
        return;
    }
    if let Some(item) = item {
        if name == "this" {
            if let Some(scalar) = item.as_scalar() {
                out.push_str(&scalar.to_string());
                return;
            }
        }
        if let Some(scalar) = item.field(name) {
            out.push_str(&scalar.to_string());
            return;
        }
    }
    out.push_str("{{");
    out.push_str(name);
    out.push_str("}}");
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::value::{Scalar, TemplateValue};

    fn row(pairs: &[(&str, i64)]) -> ListItem {
        ListItem::Map(
            pairs.iter().map(|(k, v)| ((*k).to_string(), Scalar::Int(*v))).collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn test_scalar_substitution() {
        let mut variables = ResolvedVariables::new();
        variables.insert("name", TemplateValue::text("Acme"));
        variables.insert("unused", TemplateValue::text("nope"));

        let out = expand("Welcome, {{name}}.", &variables).unwrap();
        assert_eq!(out, "Welcome, Acme.");
    }

    #[test]
    fn test_unknown_token_is_untouched() {
        let variables = ResolvedVariables::new();
        let out = expand("Hi {{stranger}}", &variables).unwrap();
        assert_eq!(out, "Hi {{stranger}}");
    }

    #[test]
    fn test_list_valued_token_is_untouched() {
        let mut variables = ResolvedVariables::new();
        variables.insert("items", TemplateValue::texts(["a"]));

        let out = expand("all: {{items}}", &variables).unwrap();
        assert_eq!(out, "all: {{items}}");
    }

    #[test]
    fn test_each_over_scalars() {
        let mut variables = ResolvedVariables::new();
        variables.insert("items", TemplateValue::texts(["a", "b", "c"]));

        let out = expand("{{#each items}}<li>{{this}}</li>{{/each}}", &variables).unwrap();
        assert_eq!(out, "<li>a</li><li>b</li><li>c</li>");
    }

    #[test]
    fn test_each_over_rows() {
        let mut variables = ResolvedVariables::new();
        variables.insert(
            "rows",
            TemplateValue::List(vec![row(&[("a", 1), ("b", 2)]), row(&[("a", 3), ("b", 4)])]),
        );

        let out = expand("{{#each rows}}{{a}}-{{b}};{{/each}}", &variables).unwrap();
        assert_eq!(out, "1-2;3-4;");
    }

    #[test]
    fn test_missing_block_name_renders_empty() {
        let variables = ResolvedVariables::new();
        let out = expand("before{{#each missing}}X{{/each}}after", &variables).unwrap();
        assert_eq!(out, "beforeafter");
    }

    #[test]
    fn test_scalar_named_block_renders_empty() {
        let mut variables = ResolvedVariables::new();
        variables.insert("items", TemplateValue::text("not a list"));

        let out = expand("{{#each items}}X{{/each}}", &variables).unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn test_empty_list_renders_empty() {
        let mut variables = ResolvedVariables::new();
        variables.insert("items", TemplateValue::List(Vec::new()));

        let out = expand("{{#each items}}X{{/each}}", &variables).unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn test_mixed_template() {
        let mut variables = ResolvedVariables::new();
        variables.insert("name", TemplateValue::text("Sam"));
        variables.insert("items", TemplateValue::texts(["A", "B"]));

        let body = "Hello {{name}}, you have {{#each items}}{{this}}, {{/each}}pending";
        let out = expand(body, &variables).unwrap();
        assert_eq!(out, "Hello Sam, you have A, B, pending");
    }

    #[test]
    fn test_scalar_entry_wins_inside_block() {
        let mut variables = ResolvedVariables::new();
        variables.insert("label", TemplateValue::text("fixed"));
        variables.insert(
            "rows",
            TemplateValue::List(vec![ListItem::Map(BTreeMap::from([(
                "label".to_string(),
                Scalar::Text("from row".to_string()),
            )]))]),
        );

        let out = expand("{{#each rows}}{{label}}{{/each}}", &variables).unwrap();
        assert_eq!(out, "fixed");
    }

    #[test]
    fn test_this_on_row_item_is_untouched() {
        let mut variables = ResolvedVariables::new();
        variables.insert("rows", TemplateValue::List(vec![row(&[("a", 1)])]));

        let out = expand("{{#each rows}}{{this}}{{/each}}", &variables).unwrap();
        assert_eq!(out, "{{this}}");
    }

    #[test]
    fn test_unknown_field_inside_block_is_untouched() {
        let mut variables = ResolvedVariables::new();
        variables.insert("items", TemplateValue::texts(["a"]));

        let out = expand("{{#each items}}{{missing}}{{/each}}", &variables).unwrap();
        assert_eq!(out, "{{missing}}");
    }

    #[test]
    fn test_expansion_is_idempotent() {
        let mut variables = ResolvedVariables::new();
        variables.insert("name", TemplateValue::text("Sam"));
        variables.insert("items", TemplateValue::texts(["A", "B"]));

        let body = "Hello {{name}}: {{#each items}}{{this}};{{/each}}";
        let first = expand(body, &variables).unwrap();
        let second = expand(&first, &variables).unwrap();
        assert_eq!(first, second);
    }
}
