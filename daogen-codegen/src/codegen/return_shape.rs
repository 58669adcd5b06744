//! Declared type analysis: how a DAO method converts its result

use syn::{GenericArgument, PathArguments, Type};

/// How a generated method converts the session's response, chosen from the
/// declared return type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnShape {
    /// `()` - fire and forget
    Unit,
    /// `bool` - whether a write touched at least one record
    Applied,
    /// `WriteOutcome` - the raw write outcome
    WriteOutcome,
    /// `ResultSet` - the raw result handle
    ResultSet,
    /// `E` - exactly one mapped entity
    Entity(String),
    /// `Option<E>` - the first mapped entity, if any
    OptionalEntity(String),
    /// `Vec<E>` - every row mapped
    EntityList(String),
    /// Anything else, carrying the declared type text
    Unsupported(String),
}

impl ReturnShape {
    /// Resolve a declared return type
    pub fn resolve(declared: &str) -> Self {
        let Ok(ty) = syn::parse_str::<Type>(declared) else {
            return ReturnShape::Unsupported(declared.to_string());
        };
        Self::from_type(&ty).unwrap_or_else(|| ReturnShape::Unsupported(declared.to_string()))
    }

    fn from_type(ty: &Type) -> Option<Self> {
        match ty {
            Type::Tuple(tuple) if tuple.elems.is_empty() => Some(ReturnShape::Unit),
            Type::Paren(inner) => Self::from_type(&inner.elem),
            Type::Path(path) if path.qself.is_none() => {
                let segment = path.path.segments.last()?;
                let ident = segment.ident.to_string();
                match (&segment.arguments, ident.as_str()) {
                    (PathArguments::None, "bool") => Some(ReturnShape::Applied),
                    (PathArguments::None, "WriteOutcome") => Some(ReturnShape::WriteOutcome),
                    (PathArguments::None, "ResultSet") => Some(ReturnShape::ResultSet),
                    (PathArguments::None, _) => Some(ReturnShape::Entity(ident)),
                    (PathArguments::AngleBracketed(_), "Option") => {
                        single_type_argument(&segment.arguments)
                            .and_then(entity_name_of_type)
                            .map(ReturnShape::OptionalEntity)
                    }
                    (PathArguments::AngleBracketed(_), "Vec") => {
                        single_type_argument(&segment.arguments)
                            .and_then(entity_name_of_type)
                            .map(ReturnShape::EntityList)
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Entity the shape maps rows into, if any
    pub fn entity(&self) -> Option<&str> {
        match self {
            ReturnShape::Entity(name)
            | ReturnShape::OptionalEntity(name)
            | ReturnShape::EntityList(name) => Some(name),
            _ => None,
        }
    }
}

fn single_type_argument(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(generic) = arguments else {
        return None;
    };
    if generic.args.len() != 1 {
        return None;
    }
    match generic.args.first()? {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    }
}

fn entity_name_of_type(ty: &Type) -> Option<String> {
    match ty {
        Type::Reference(reference) => entity_name_of_type(&reference.elem),
        Type::Paren(inner) => entity_name_of_type(&inner.elem),
        Type::Path(path) if path.qself.is_none() => {
            let segment = path.path.segments.last()?;
            match segment.arguments {
                PathArguments::None => Some(segment.ident.to_string()),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Name of the entity a declared parameter type refers to, ignoring
/// references and module paths (e.g. `&crate::models::User` -> `User`)
pub fn entity_name_of(declared: &str) -> Option<String> {
    syn::parse_str::<Type>(declared)
        .ok()
        .and_then(|ty| entity_name_of_type(&ty))
}
