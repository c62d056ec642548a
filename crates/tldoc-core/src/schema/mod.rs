//! Parsed representation of a TL schema
//!
//! A schema is an ordered list of [`SchemaObject`]s. Each object is either a
//! constructor (a concrete value of some type) or a function (a callable
//! request with a declared result type).

mod error;
mod parser;

pub use error::{SchemaError, SchemaErrorKind};
pub use parser::SchemaParser;

use flate2::Crc;

use crate::docs::naming;

/// A parsed schema file
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Objects in declaration order
    pub objects: Vec<SchemaObject>,
    /// Layer number from a `// LAYER <n>` comment, if present
    pub layer: Option<u32>,
}

impl Schema {
    pub fn functions(&self) -> impl Iterator<Item = &SchemaObject> {
        self.objects.iter().filter(|o| o.is_function)
    }
}

/// A constructor or function definition
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaObject {
    /// Bare name, without the namespace
    pub name: String,
    pub namespace: Option<String>,
    /// Constructor id, explicit or inferred
    pub id: u32,
    pub args: Vec<Argument>,
    /// Type produced by a constructor, or returned by a function
    pub result: String,
    pub is_function: bool,
}

impl SchemaObject {
    /// Create an object from a possibly namespaced name (`auth.sentCode`).
    /// The id is inferred from the definition; use [`SchemaObject::with_id`]
    /// to set an explicit one.
    pub fn new(fullname: &str, is_function: bool, result: impl Into<String>) -> Self {
        let (namespace, name) = match fullname.split_once('.') {
            Some((ns, name)) => (Some(ns.to_string()), name.to_string()),
            None => (None, fullname.to_string()),
        };
        let mut object = Self {
            name,
            namespace,
            id: 0,
            args: Vec::new(),
            result: result.into(),
            is_function,
        };
        object.id = object.infer_id();
        object
    }

    #[must_use]
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    /// Append an argument, re-inferring the id
    #[must_use]
    pub fn with_arg(mut self, arg: Argument) -> Self {
        self.args.push(arg);
        self.id = self.infer_id();
        self
    }

    /// `namespace.name`, or just `name`
    pub fn fullname(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        }
    }

    /// Display class name; functions get a `Request` suffix
    pub fn class_name(&self) -> String {
        let mut name = naming::class_name(&self.name);
        if self.is_function {
            name.push_str("Request");
        }
        name
    }

    pub fn file_name(&self) -> String {
        naming::file_name(&self.name)
    }

    pub fn html_file_name(&self) -> String {
        naming::html_file_name(&self.name)
    }

    /// Name of the `{X:Type}` parameter, if the definition is generic
    pub fn generic_parameter(&self) -> Option<&str> {
        self.args
            .iter()
            .find(|a| a.generic_definition)
            .map(|a| a.name.as_str())
    }

    /// Arguments shown in parameter tables: non-flag arguments first, flag
    /// arguments last, declaration order kept within each group
    pub fn displayable_args(&self) -> Vec<&Argument> {
        let mut args: Vec<&Argument> = self.args.iter().filter(|a| a.is_displayable()).collect();
        args.sort_by_key(|a| a.is_flag());
        args
    }

    /// Normalized definition text whose CRC32 is the constructor id
    pub fn canonical_repr(&self) -> String {
        let mut repr = self.fullname();
        for arg in &self.args {
            if arg.is_flag() && arg.ty == "true" {
                continue;
            }
            repr.push(' ');
            repr.push_str(&arg.to_string());
        }
        repr.push_str(" = ");
        repr.push_str(&self.result);

        repr.replace(":bytes ", ":string ")
            .replace("?bytes ", "?string ")
            .replace('<', " ")
            .replace(|c: char| matches!(c, '>' | '{' | '}'), "")
    }

    pub fn infer_id(&self) -> u32 {
        let mut crc = Crc::new();
        crc.update(self.canonical_repr().as_bytes());
        crc.sum()
    }
}

/// `flags.N?` prefix of an optional argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagBit {
    /// Name of the `#` argument holding the bitmask
    pub field: String,
    pub index: u32,
}

/// A single argument of a definition
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    /// Element type for vectors; `#` for flag indicators
    pub ty: String,
    pub is_vector: bool,
    /// Vector spelled `vector<T>` rather than `Vector<T>`
    pub bare_vector: bool,
    /// `!X`, a request whose result is only known at call time
    pub is_generic: bool,
    pub flag: Option<FlagBit>,
    /// `flags:#`
    pub flag_indicator: bool,
    /// `{X:Type}`
    pub generic_definition: bool,
}

impl Argument {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            is_vector: false,
            bare_vector: false,
            is_generic: false,
            flag: None,
            flag_indicator: false,
            generic_definition: false,
        }
    }

    pub fn flag_indicator(name: impl Into<String>) -> Self {
        Self {
            flag_indicator: true,
            ..Self::new(name, "#")
        }
    }

    pub fn generic_definition(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            generic_definition: true,
            ..Self::new(name, ty)
        }
    }

    #[must_use]
    pub fn with_flag(mut self, field: impl Into<String>, index: u32) -> Self {
        self.flag = Some(FlagBit {
            field: field.into(),
            index,
        });
        self
    }

    #[must_use]
    pub fn vector(mut self) -> Self {
        self.is_vector = true;
        self
    }

    #[must_use]
    pub fn generic(mut self) -> Self {
        self.is_generic = true;
        self
    }

    pub fn is_flag(&self) -> bool {
        self.flag.is_some()
    }

    /// Pseudo-arguments (`flags:#`, `{X:Type}`) are not listed as parameters
    pub fn is_displayable(&self) -> bool {
        !self.flag_indicator && !self.generic_definition
    }
}

impl std::fmt::Display for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.generic_definition {
            return write!(f, "{{{}:{}}}", self.name, self.ty);
        }
        write!(f, "{}:", self.name)?;
        if let Some(flag) = &self.flag {
            write!(f, "{}.{}?", flag.field, flag.index)?;
        }
        if self.is_generic {
            write!(f, "!")?;
        }
        if self.is_vector {
            let keyword = if self.bare_vector { "vector" } else { "Vector" };
            write!(f, "{}<{}>", keyword, self.ty)
        } else {
            write!(f, "{}", self.ty)
        }
    }
}
