use crate::words::{self, ValueType};
use std::fmt;

/// How many tokens a parameter takes and whether it may be left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Exactly one token.
    Required,
    /// Zero or one token.
    Optional,
    /// One or more tokens.
    VariadicRequired,
    /// Zero or more tokens.
    VariadicOptional,
}

/// A named, typed slot in a signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    types: Vec<ValueType>,
    description: String,
    arity: Arity,
}

impl Parameter {
    /// Create a required, single-token parameter.
    pub fn new(name: impl Into<String>, types: impl IntoIterator<Item = ValueType>) -> Self {
        let mut declared: Vec<ValueType> = Vec::new();
        for ty in types {
            if !declared.contains(&ty) {
                declared.push(ty);
            }
        }
        Self {
            name: name.into(),
            types: declared,
            description: String::new(),
            arity: Arity::Required,
        }
    }

    /// Shorthand for a parameter accepting any string.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, [ValueType::String])
    }

    /// Allow the parameter to be left out.
    pub fn optional(mut self) -> Self {
        self.arity = match self.arity {
            Arity::Required | Arity::Optional => Arity::Optional,
            Arity::VariadicRequired | Arity::VariadicOptional => Arity::VariadicOptional,
        };
        self
    }

    /// Let the parameter consume every remaining token.
    pub fn variadic(mut self) -> Self {
        self.arity = match self.arity {
            Arity::Required | Arity::VariadicRequired => Arity::VariadicRequired,
            Arity::Optional | Arity::VariadicOptional => Arity::VariadicOptional,
        };
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn types(&self) -> &[ValueType] {
        &self.types
    }

    pub fn help(&self) -> &str {
        &self.description
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn is_optional(&self) -> bool {
        matches!(self.arity, Arity::Optional | Arity::VariadicOptional)
    }

    pub fn is_required(&self) -> bool {
        matches!(self.arity, Arity::Required | Arity::VariadicRequired)
    }

    pub fn is_variadic(&self) -> bool {
        matches!(self.arity, Arity::VariadicRequired | Arity::VariadicOptional)
    }

    /// Whether this parameter can take exactly `tokens`.
    ///
    /// Checks arity first, then that every token fits one of the declared types.
    pub fn matches<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        if tokens.is_empty() {
            return self.is_optional();
        }
        if !self.is_variadic() && tokens.len() > 1 {
            return false;
        }
        tokens.iter().all(|token| {
            self.types
                .iter()
                .any(|ty| words::is_type(*ty, token.as_ref()))
        })
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dots = if self.is_variadic() { "..." } else { "" };
        if self.is_optional() {
            write!(f, "[{}{dots}]", self.name)
        } else {
            write!(f, "<{}{dots}>", self.name)
        }
    }
}
