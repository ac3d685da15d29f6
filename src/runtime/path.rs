//! Lazily rendered resource addressing.
//!
//! A [`ResourcePath`] identifies a remote resource as a chain of segments
//! rooted at the service endpoint (`/_api`). Each link is either a plain
//! navigation segment (`Web`, `Lists`, `items`) or a service operation
//! invocation (`GetByTitle('Tasks')`, `getItemById(5)`).
//!
//! Paths are immutable: deriving a child never touches the parent, and
//! clones share their ancestry. Rendering into a URL string happens only
//! when a query is executed.
//!
//! `Display` renders string literals verbatim for logging. [`ResourcePath::to_url`]
//! percent-encodes them, so characters such as `#`, `?`, `%` and `/` in a
//! list title stay inside the argument.
//!
//! # Example
//!
//! ```rust
//! use sharepoint_api::runtime::{PathParameter, ResourcePath};
//!
//! let lists = ResourcePath::new("Web").child("Lists");
//! let list = lists.service_operation("GetByTitle", Some(vec!["Tasks".into()]));
//! let item = list.service_operation("getItemById", Some(vec![PathParameter::from(5)]));
//!
//! assert_eq!(item.to_url(), "Web/Lists/GetByTitle('Tasks')/getItemById(5)");
//! assert_eq!(item.parent(), Some(&list));
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// A single argument of a service operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathParameter {
    /// A string literal, rendered quoted (`'value'`).
    String(String),
    /// An integer literal.
    Int(i64),
    /// A boolean literal.
    Bool(bool),
    /// A GUID literal, rendered as `guid'value'`.
    Guid(String),
}

impl PathParameter {
    /// Converts a JSON scalar into a path parameter.
    ///
    /// Returns `None` for values that cannot appear in a path (null, floats,
    /// arrays and objects).
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n.as_i64().map(Self::Int),
            _ => None,
        }
    }
}

impl PathParameter {
    fn write(&self, f: &mut impl fmt::Write, encode: bool) -> fmt::Result {
        match self {
            Self::String(s) => {
                let escaped = s.replace('\'', "''");
                if encode {
                    write!(f, "'{}'", urlencoding::encode(&escaped))
                } else {
                    write!(f, "'{escaped}'")
                }
            }
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Guid(g) => write!(f, "guid'{g}'"),
        }
    }

    /// Renders the literal for use in a request URL.
    #[must_use]
    pub fn to_url(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write(&mut out, true);
        out
    }
}

impl fmt::Display for PathParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, false)
    }
}

impl From<&str> for PathParameter {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PathParameter {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for PathParameter {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for PathParameter {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for PathParameter {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for PathParameter {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// The last link of a [`ResourcePath`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Plain navigation to a property or collection.
    Entity(String),
    /// Invocation of a named service operation.
    ///
    /// `params: None` renders the bare name; `Some(vec![])` renders `Name()`.
    ServiceOperation {
        /// The operation name.
        name: String,
        /// Positional arguments, if the operation takes an argument list.
        params: Option<Vec<PathParameter>>,
    },
}

impl PathSegment {
    /// Returns the segment or operation name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Entity(name) | Self::ServiceOperation { name, .. } => name,
        }
    }
}

impl PathSegment {
    fn write(&self, f: &mut impl fmt::Write, encode: bool) -> fmt::Result {
        match self {
            Self::Entity(name)
            | Self::ServiceOperation {
                name,
                params: None,
            } => f.write_str(name),
            Self::ServiceOperation {
                name,
                params: Some(params),
            } => {
                write!(f, "{name}(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    param.write(f, encode)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, false)
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct PathNode {
    parent: Option<ResourcePath>,
    segment: PathSegment,
}

/// An immutable, composable resource address.
///
/// Cloning is cheap; equality is structural.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath(Arc<PathNode>);

impl ResourcePath {
    /// Creates a root path consisting of a single navigation segment.
    #[must_use]
    pub fn new(segment: impl Into<String>) -> Self {
        Self::from_parts(None, PathSegment::Entity(segment.into()))
    }

    /// Creates a root path consisting of a single service operation.
    #[must_use]
    pub fn root_operation(name: impl Into<String>, params: Option<Vec<PathParameter>>) -> Self {
        Self::from_parts(
            None,
            PathSegment::ServiceOperation {
                name: name.into(),
                params,
            },
        )
    }

    /// Derives a path to a navigation segment below this one.
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        Self::from_parts(Some(self.clone()), PathSegment::Entity(segment.into()))
    }

    /// Derives a path invoking a service operation on this resource.
    #[must_use]
    pub fn service_operation(
        &self,
        name: impl Into<String>,
        params: Option<Vec<PathParameter>>,
    ) -> Self {
        Self::from_parts(
            Some(self.clone()),
            PathSegment::ServiceOperation {
                name: name.into(),
                params,
            },
        )
    }

    fn from_parts(parent: Option<Self>, segment: PathSegment) -> Self {
        Self(Arc::new(PathNode { parent, segment }))
    }

    /// Returns the parent path, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.0.parent.as_ref()
    }

    /// Returns the last segment of this path.
    #[must_use]
    pub fn segment(&self) -> &PathSegment {
        &self.0.segment
    }

    /// Renders the path relative to the service endpoint, with string
    /// arguments percent-encoded.
    #[must_use]
    pub fn to_url(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write(&mut out, true);
        out
    }

    fn write(&self, f: &mut impl fmt::Write, encode: bool) -> fmt::Result {
        if let Some(parent) = &self.0.parent {
            parent.write(f, encode)?;
            f.write_char('/')?;
        }
        self.0.segment.write(f, encode)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, false)
    }
}

impl fmt::Debug for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourcePath({self})")
    }
}

// Verify ResourcePath is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourcePath>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_segments_join_with_slash() {
        let path = ResourcePath::new("Web").child("Lists");
        assert_eq!(path.to_url(), "Web/Lists");
        assert_eq!(path.segment().name(), "Lists");
    }

    #[test]
    fn test_service_operation_renders_arguments() {
        let path = ResourcePath::new("Web")
            .child("Lists")
            .service_operation("GetByTitle", Some(vec!["Tasks".into()]));
        assert_eq!(path.to_url(), "Web/Lists/GetByTitle('Tasks')");

        let path = ResourcePath::new("SP")
            .service_operation("Op", Some(vec![1_i64.into(), true.into(), "x".into()]));
        assert_eq!(path.to_url(), "SP/Op(1,true,'x')");
    }

    #[test]
    fn test_service_operation_without_params_renders_bare_name() {
        let path = ResourcePath::new("Web").service_operation("GetCheckedOutFiles", None);
        assert_eq!(path.to_url(), "Web/GetCheckedOutFiles");
    }

    #[test]
    fn test_service_operation_with_empty_params_renders_parens() {
        let path = ResourcePath::new("Web").service_operation("getRelatedFields", Some(vec![]));
        assert_eq!(path.to_url(), "Web/getRelatedFields()");
    }

    #[test]
    fn test_root_operation() {
        let path = ResourcePath::root_operation("SPSiteManager", None);
        assert_eq!(path.to_url(), "SPSiteManager");
        assert!(path.parent().is_none());
    }

    #[test]
    fn test_string_parameter_escapes_quotes() {
        let param = PathParameter::from("O'Brien's list");
        assert_eq!(param.to_string(), "'O''Brien''s list'");
    }

    #[test]
    fn test_url_encodes_string_arguments() {
        let path = ResourcePath::new("Web")
            .child("Lists")
            .service_operation("GetByTitle", Some(vec!["Q#A ?50%/Tasks".into()]));

        assert_eq!(
            path.to_url(),
            "Web/Lists/GetByTitle('Q%23A%20%3F50%25%2FTasks')"
        );
        assert_eq!(path.to_string(), "Web/Lists/GetByTitle('Q#A ?50%/Tasks')");
    }

    #[test]
    fn test_url_encodes_escaped_quotes() {
        let param = PathParameter::from("O'Brien");
        assert_eq!(param.to_url(), "'O%27%27Brien'");
    }

    #[test]
    fn test_guid_parameter() {
        let param = PathParameter::Guid("1b8f4ab4-0000-0000-0000-000000000000".to_string());
        assert_eq!(
            param.to_string(),
            "guid'1b8f4ab4-0000-0000-0000-000000000000'"
        );
    }

    #[test]
    fn test_parameter_from_json() {
        assert_eq!(
            PathParameter::from_json(&json!("a")),
            Some(PathParameter::String("a".to_string()))
        );
        assert_eq!(PathParameter::from_json(&json!(7)), Some(PathParameter::Int(7)));
        assert_eq!(
            PathParameter::from_json(&json!(false)),
            Some(PathParameter::Bool(false))
        );
        assert!(PathParameter::from_json(&json!(null)).is_none());
        assert!(PathParameter::from_json(&json!(1.5)).is_none());
        assert!(PathParameter::from_json(&json!({"a": 1})).is_none());
    }

    #[test]
    fn test_deriving_child_leaves_parent_untouched() {
        let parent = ResourcePath::new("Web");
        let child = parent.child("Lists");
        assert_eq!(parent.to_url(), "Web");
        assert_eq!(child.parent(), Some(&parent));
    }

    #[test]
    fn test_equality_is_structural() {
        let a = ResourcePath::new("Web").child("Lists");
        let b = ResourcePath::new("Web").child("Lists");
        assert_eq!(a, b);
        assert_ne!(a, ResourcePath::new("Web").child("lists"));
    }
}
