//! Human-readable rendering of effect trees.
//!
//! The text follows the order the resolver visits nodes, two spaces of
//! indentation per nesting level:
//!
//! ```text
//! Si tienes Justicia activa:
//!   Gana 1 comida
//! En caso contrario:
//!   Pierde 1 comida
//! Luego: Elige uno:
//! A) Gana 1 carbón
//! B) Gana 1 madera
//! ```

use std::fmt;

use super::effect::Effect;

const OTHERWISE: &str = "En caso contrario:";
const ELSE_IF: &str = "De lo contrario, ";
const ELSE: &str = "De lo contrario:";
const THEN: &str = "Luego: ";

/// Render `effect` at the given indentation level.
#[must_use]
pub fn render(effect: &Effect, indent: usize) -> String {
    let prefix = "  ".repeat(indent);

    match effect {
        Effect::Basic(basic) => format!("{prefix}{}", basic.description),

        Effect::Conditional(cond) => {
            let mut text = format!("{prefix}{}:\n", cond.condition.description);
            text.push_str(&render(&cond.if_true, indent + 1));
            if let Some(if_false) = &cond.if_false {
                text.push_str(&format!("\n{prefix}{OTHERWISE}\n"));
                text.push_str(&render(if_false, indent + 1));
            }
            text
        }

        Effect::MultiConditional(multi) => {
            let mut text = String::new();
            let last = multi.branches.len().saturating_sub(1);
            for (i, branch) in multi.branches.iter().enumerate() {
                let else_if = if i == 0 { "" } else { ELSE_IF };
                text.push_str(&format!("{prefix}{else_if}{}:\n", branch.condition.description));
                text.push_str(&render(&branch.effect, indent + 1));
                if i < last {
                    text.push('\n');
                }
            }
            if let Some(default) = &multi.default {
                text.push_str(&format!("\n{prefix}{ELSE}\n"));
                text.push_str(&render(default, indent + 1));
            }
            text
        }

        Effect::Choice(choice) => {
            let mut text = format!("{prefix}{}\n", choice.description);
            for (i, option) in choice.options.iter().enumerate() {
                text.push_str(&format!(
                    "{prefix}{}) {}\n",
                    option_letter(i),
                    render(option, 0).trim()
                ));
            }
            text.trim_end().to_string()
        }

        Effect::ForEach(for_each) => format!(
            "{prefix}{}: {}",
            for_each.description,
            render(&for_each.effect, 0).trim()
        ),

        Effect::Composite(composite) => composite
            .effects
            .iter()
            .map(|e| render(e, indent))
            .collect::<Vec<_>>()
            .join(&format!("\n{prefix}{THEN}")),
    }
}

/// A, B, C, ... continuing through the code points after `Z`.
fn option_letter(index: usize) -> char {
    u32::try_from(index)
        .ok()
        .and_then(|i| char::from_u32(u32::from(b'A') + i))
        .unwrap_or('?')
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self, 0))
    }
}
