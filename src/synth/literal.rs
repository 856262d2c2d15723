use crate::model::Primitive;

// Kotlin spellings. Stateless so targets can be synthesized in parallel.

pub const NULL: &str = "null";
/// Stands in for a `void` value in argument position.
pub const UNIT: &str = "Unit";

const HARD_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw",
    "true", "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Backtick-quotes hard keywords used as names.
pub fn ident(name: &str) -> String {
    if HARD_KEYWORDS.contains(&name) {
        format!("`{name}`")
    } else {
        name.to_string()
    }
}

pub fn primitive(kind: Primitive) -> &'static str {
    match kind {
        Primitive::String => "\"\"",
        Primitive::Int32 => "0",
        Primitive::Int64 => "0L",
        Primitive::Int16 => "0.toShort()",
        Primitive::Byte => "0.toByte()",
        Primitive::Float32 => "0.0f",
        Primitive::Float64 => "0.0",
        Primitive::Boolean => "false",
        Primitive::Char => "' '",
        Primitive::Void => "",  // no value; the callable body stays empty
    }
}

pub const EMPTY_LIST: &str = "emptyList()";
pub const EMPTY_SET: &str = "emptySet()";
pub const EMPTY_MAP: &str = "emptyMap()";
pub const EMPTY_ARRAY: &str = "emptyArray()";

/// `Name(a = x, b = y)`
pub fn constructor_call<'a, I>(type_name: &str, args: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let args = args
        .into_iter()
        .map(|(field, value)| format!("{} = {value}", ident(field)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({args})", ident(type_name))
}
