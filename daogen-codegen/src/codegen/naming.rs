//! Naming utilities for code generation

use heck::ToSnakeCase;

/// Suffix appended to an interface name to form its implementation name
pub const IMPLEMENTATION_SUFFIX: &str = "_Impl";

/// Name of the private field holding the session in every implementation
pub const SESSION_FIELD: &str = "session";

/// Deterministic implementation name for an interface
/// e.g., "UserDao" -> "UserDao_Impl"
pub fn implementation_name(interface_name: &str) -> String {
    format!("{}{}", interface_name, IMPLEMENTATION_SUFFIX)
}

/// Module (and file stem) an implementation is emitted into
/// e.g., "UserDao_Impl" -> "user_dao_impl"
pub fn module_name(implementation_name: &str) -> String {
    implementation_name.to_snake_case()
}

/// Record name used for an entity without an explicit table
/// e.g., "UserAccount" -> "user_account"
pub fn default_table_name(entity_name: &str) -> String {
    entity_name.to_snake_case()
}

/// Field holding the prepared statement of a DAO method
/// e.g., "find_by_name" -> "find_by_name_statement"
pub fn statement_field_name(method_name: &str) -> String {
    format!("{}_statement", method_name.trim_start_matches("r#"))
}

/// Check if a name is a Rust reserved keyword
pub fn is_rust_keyword(name: &str) -> bool {
    matches!(
        name,
        "as" | "async"
            | "await"
            | "break"
            | "const"
            | "continue"
            | "crate"
            | "dyn"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "static"
            | "struct"
            | "super"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "abstract"
            | "become"
            | "box"
            | "do"
            | "final"
            | "macro"
            | "override"
            | "priv"
            | "try"
            | "typeof"
            | "unsized"
            | "virtual"
            | "yield"
    )
}

/// Escape an identifier if it's a Rust keyword; already-raw names pass through
pub fn escape_ident(name: &str) -> String {
    if is_rust_keyword(name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}

/// Whether `name` can be declared as a binding, field or method name once
/// keywords are escaped. `self` and the other path keywords never can.
pub fn is_identifier(name: &str) -> bool {
    name != "self" && syn::parse_str::<syn::Ident>(&escape_ident(name)).is_ok()
}

/// Whether `ty` parses as a Rust type
pub fn is_type(ty: &str) -> bool {
    syn::parse_str::<syn::Type>(ty).is_ok()
}

/// Render a string as a Rust string literal
pub fn string_literal(value: &str) -> String {
    format!("{:?}", value)
}
