//! Schema names to Rust identifiers.

use proc_macro2::{Ident, Span};

/// Keywords that can be written as raw identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn",
    "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers either; these get a trailing `_`.
const PATH_KEYWORDS: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Converts `snake_case` or `UPPER_SNAKE` to `PascalCase`.
///
/// Segments already in mixed case keep their inner capitals.
pub fn pascal_case(input: &str) -> String {
    input
        .split('_')
        .map(|item| {
            let shouting = item.chars().all(|c| !c.is_ascii_lowercase());
            let mut chars = item.chars();

            match chars.next() {
                Some(first) => {
                    let rest = chars.as_str();
                    let rest = match shouting {
                        true => rest.to_ascii_lowercase(),
                        false => rest.to_string(),
                    };
                    format!("{}{}", first.to_ascii_uppercase(), rest)
                }
                None => String::new(),
            }
        })
        .collect::<String>()
}

/// Converts `PascalCase` or `camelCase` to `snake_case`. Acronyms stay
/// together: `HTTPServer` becomes `http_server`.
pub fn snake_case(input: &str) -> String {
    let chars = input.chars().collect::<Vec<_>>();
    let mut result = String::with_capacity(input.len() + 4);

    for (i, c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i != 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).map_or(false, |n| n.is_ascii_lowercase());

            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_lower);

            if prev != '_' && boundary {
                result.push('_');
            }
        }
        result.push(c.to_ascii_lowercase());
    }

    result
}

/// Name of the constant holding a field's tag, e.g. `USER_ID_TAG`.
pub fn tag_const_name(field: &str) -> String {
    format!("{}_TAG", snake_case(field).to_ascii_uppercase())
}

/// Identifier for `name`, escaped when it collides with a keyword.
pub fn ident(name: &str) -> Ident {
    if PATH_KEYWORDS.contains(&name) {
        return Ident::new(&format!("{}_", name), Span::call_site());
    }

    match KEYWORDS.contains(&name) {
        true => Ident::new_raw(name, Span::call_site()),
        false => Ident::new(name, Span::call_site()),
    }
}

/// Module holding the nested declarations of a message.
pub fn module_ident(message: &str) -> Ident {
    ident(&snake_case(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("user_id"), "UserId");
        assert_eq!(pascal_case("STATUS_PENDING"), "StatusPending");
        assert_eq!(pascal_case("already_Mixed_caseName"), "AlreadyMixedCaseName");
        assert_eq!(pascal_case("x"), "X");
        assert_eq!(pascal_case("trailing_"), "Trailing");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("OrderItem"), "order_item");
        assert_eq!(snake_case("HTTPServer"), "http_server");
        assert_eq!(snake_case("userId"), "user_id");
        assert_eq!(snake_case("Vec3D"), "vec3_d");
        assert_eq!(snake_case("already_snake"), "already_snake");
        assert_eq!(snake_case("Snake_Case"), "snake_case");
    }

    #[test]
    fn test_tag_const_name() {
        assert_eq!(tag_const_name("user_id"), "USER_ID_TAG");
        assert_eq!(tag_const_name("displayName"), "DISPLAY_NAME_TAG");
    }

    #[test]
    fn test_keywords() {
        assert_eq!(ident("type").to_string(), "r#type");
        assert_eq!(ident("self").to_string(), "self_");
        assert_eq!(ident("kind").to_string(), "kind");
        assert_eq!(module_ident("Match").to_string(), "r#match");
    }
}
