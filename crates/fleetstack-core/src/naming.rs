//! Name normalization shared by validation and resource naming

/// `"my-api_v2"` -> `"MyApiV2"`
///
/// Logical names only allow ASCII alphanumerics, so every other character
/// acts as a word boundary and is dropped. Two inputs that normalize to the
/// same string end up with the same resource names.
pub fn pascal_case(input: &str) -> String {
    input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
