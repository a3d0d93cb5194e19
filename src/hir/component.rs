//! Component entities: the class-like shape of a CFML file.
//!
//! Components are produced by the parser, cached by file identity and only
//! read by the resolver. Functions and properties are keyed by lowercase
//! name so every lookup is case-insensitive.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::variables::Variable;
use crate::base::{FileId, Location, Span};

/// Lowercase map key for a case-insensitive CFML name.
pub(crate) fn name_key(name: &str) -> SmolStr {
    SmolStr::from(name.to_lowercase())
}

/// Case-insensitive name comparison, consistent with [`name_key`].
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || (!(a.is_ascii() && b.is_ascii()) && a.to_lowercase() == b.to_lowercase())
}

/// A reference to another component by dotted path, e.g. `extends="models.Base"`.
///
/// The parser may already have resolved the path to a file; otherwise the
/// registry resolves `path` relative to the referring file on demand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentRef {
    /// The dotted path as written.
    pub path: SmolStr,
    /// The resolved target file, if known.
    pub target: Option<FileId>,
    /// Range of the reference in the referring file.
    pub range: Span,
}

impl ComponentRef {
    pub fn new(path: impl Into<SmolStr>, range: Span) -> Self {
        Self {
            path: path.into(),
            target: None,
            range,
        }
    }

    /// A reference whose target file is already known.
    pub fn resolved(path: impl Into<SmolStr>, target: FileId, range: Span) -> Self {
        Self {
            path: path.into(),
            target: Some(target),
            range,
        }
    }
}

/// Function access level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Access {
    #[default]
    Public,
    Private,
    Package,
    Remote,
}

impl Access {
    /// Parse an `access` attribute value, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "package" => Some(Self::Package),
            "remote" => Some(Self::Remote),
            _ => None,
        }
    }
}

/// A function parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Argument {
    pub name: SmolStr,
    pub name_range: Span,
    /// Declared type, when it names a component.
    pub data_type: Option<ComponentRef>,
}

impl Argument {
    pub fn new(name: impl Into<SmolStr>, name_range: Span) -> Self {
        Self {
            name: name.into(),
            name_range,
            data_type: None,
        }
    }

    pub fn with_type(mut self, data_type: ComponentRef) -> Self {
        self.data_type = Some(data_type);
        self
    }
}

/// One parameter list of a function.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    pub parameters: Vec<Argument>,
}

impl Signature {
    pub fn new(parameters: Vec<Argument>) -> Self {
        Self { parameters }
    }
}

/// A function declared in a component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserFunction {
    pub name: SmolStr,
    pub name_range: Span,
    pub access: Access,
    pub signatures: Vec<Signature>,
    pub body_range: Option<Span>,
    pub return_type: Option<ComponentRef>,
}

impl UserFunction {
    pub fn new(name: impl Into<SmolStr>, name_range: Span) -> Self {
        Self {
            name: name.into(),
            name_range,
            access: Access::Public,
            signatures: Vec::new(),
            body_range: None,
            return_type: None,
        }
    }

    pub fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signatures.push(signature);
        self
    }

    pub fn with_body(mut self, body_range: Span) -> Self {
        self.body_range = Some(body_range);
        self
    }

    pub fn with_return_type(mut self, return_type: ComponentRef) -> Self {
        self.return_type = Some(return_type);
        self
    }

    /// Every parameter across all signatures, in declaration order.
    pub fn parameters(&self) -> impl Iterator<Item = &Argument> {
        self.signatures.iter().flat_map(|sig| sig.parameters.iter())
    }
}

/// Explicit `getter`/`setter` attribute on a property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccessorFlag {
    /// Attribute absent: follow the component's `accessors` setting.
    #[default]
    Inherit,
    Enabled,
    Disabled,
}

impl AccessorFlag {
    pub fn from_attribute(value: Option<bool>) -> Self {
        match value {
            None => Self::Inherit,
            Some(true) => Self::Enabled,
            Some(false) => Self::Disabled,
        }
    }

    pub fn is_disabled(self) -> bool {
        self == Self::Disabled
    }
}

/// A `property` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub name: SmolStr,
    pub name_range: Span,
    pub data_type: Option<ComponentRef>,
    pub getter: AccessorFlag,
    pub setter: AccessorFlag,
}

impl Property {
    pub fn new(name: impl Into<SmolStr>, name_range: Span) -> Self {
        Self {
            name: name.into(),
            name_range,
            data_type: None,
            getter: AccessorFlag::Inherit,
            setter: AccessorFlag::Inherit,
        }
    }

    pub fn with_type(mut self, data_type: ComponentRef) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn with_getter(mut self, getter: AccessorFlag) -> Self {
        self.getter = getter;
        self
    }

    pub fn with_setter(mut self, setter: AccessorFlag) -> Self {
        self.setter = setter;
        self
    }
}

/// A class-like CFML entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    /// The file declaring this component.
    pub file: FileId,
    /// The component's name (usually the file stem).
    pub name: SmolStr,
    /// Range of the `component` declaration.
    pub declaration_range: Span,
    /// The base component, if any.
    pub extends: Option<ComponentRef>,
    /// Functions by lowercase name, in declaration order.
    pub functions: IndexMap<SmolStr, UserFunction>,
    /// Properties by lowercase name, in declaration order.
    pub properties: IndexMap<SmolStr, Property>,
    /// Variables assigned in the component (`variables` and `this` scope).
    pub variables: Vec<Variable>,
    /// Whether getters and setters are generated for properties.
    pub accessors: bool,
    /// Whether the component is written in script dialect.
    pub is_script: bool,
}

impl Component {
    pub fn new(file: FileId, name: impl Into<SmolStr>, declaration_range: Span) -> Self {
        Self {
            file,
            name: name.into(),
            declaration_range,
            extends: None,
            functions: IndexMap::new(),
            properties: IndexMap::new(),
            variables: Vec::new(),
            accessors: false,
            is_script: true,
        }
    }

    pub fn with_extends(mut self, extends: ComponentRef) -> Self {
        self.extends = Some(extends);
        self
    }

    /// Add a function. A later function with the same case-insensitive name
    /// does not replace the first one.
    pub fn with_function(mut self, function: UserFunction) -> Self {
        self.functions
            .entry(name_key(&function.name))
            .or_insert(function);
        self
    }

    /// Add a property. The first declaration of a name wins.
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties
            .entry(name_key(&property.name))
            .or_insert(property);
        self
    }

    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn with_accessors(mut self, accessors: bool) -> Self {
        self.accessors = accessors;
        self
    }

    pub fn with_script(mut self, is_script: bool) -> Self {
        self.is_script = is_script;
        self
    }

    /// The location to jump to for this component.
    pub fn location(&self) -> Location {
        Location::new(self.file, self.declaration_range)
    }

    /// Look up a function by name, case-insensitively.
    pub fn function(&self, name: &str) -> Option<&UserFunction> {
        self.functions.get(name_key(name).as_str())
    }

    /// Look up a property by name, case-insensitively.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name_key(name).as_str())
    }

    /// The function whose body contains `position`.
    pub fn function_at(&self, position: crate::base::Position) -> Option<&UserFunction> {
        self.functions.values().find(|function| {
            function
                .body_range
                .is_some_and(|body| body.contains(position))
        })
    }
}
