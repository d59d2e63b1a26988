use crate::{
    error::ComposeError,
    traits::{Decorated, Layer, Model, Path},
    value::Value,
};
use std::sync::Arc;

///
/// Author
///
/// Related fixture model. Raw surface: `name`, `handle`, `describe`.
///

#[derive(Clone, Debug, Default)]
pub struct Author {
    pub name: String,
    pub handle: String,
}

crate::impl_path!(Author => "test_fixtures::Author");

impl Decorated for Author {
    fn method_names(&self) -> Vec<&'static str> {
        vec!["name", "handle", "describe"]
    }

    fn invoke(&self, method: &str) -> Result<Value, ComposeError> {
        match method {
            "name" => Ok(Value::Text(self.name.clone())),
            "handle" => Ok(Value::Text(self.handle.clone())),
            "describe" => Ok(Value::Text(self.name.clone())),
            _ => Err(ComposeError::unknown_method(method)),
        }
    }
}

impl Model for Author {
    fn model_path(&self) -> &'static str {
        Self::PATH
    }

    fn relation(&self, name: &str) -> Result<Option<Arc<dyn Model>>, ComposeError> {
        Err(ComposeError::undeclared(name, Self::PATH))
    }
}

pub fn author(name: &str, handle: &str) -> Arc<Author> {
    Arc::new(Author {
        name: name.to_string(),
        handle: handle.to_string(),
    })
}

///
/// Post
///
/// Host fixture model with to-one `author` and `editor` relations.
/// Raw surface: `title`, `describe`.
///

#[derive(Clone, Debug, Default)]
pub struct Post {
    pub title: String,
    pub author: Option<Arc<Author>>,
    pub editor: Option<Arc<Author>>,
}

crate::impl_path!(Post => "test_fixtures::Post");

impl Decorated for Post {
    fn method_names(&self) -> Vec<&'static str> {
        vec!["title", "describe"]
    }

    fn invoke(&self, method: &str) -> Result<Value, ComposeError> {
        match method {
            "title" => Ok(Value::Text(self.title.clone())),
            "describe" => Ok(Value::Text(self.title.clone())),
            _ => Err(ComposeError::unknown_method(method)),
        }
    }
}

impl Model for Post {
    fn model_path(&self) -> &'static str {
        Self::PATH
    }

    fn relation(&self, name: &str) -> Result<Option<Arc<dyn Model>>, ComposeError> {
        match name {
            "author" => Ok(self.author.clone().map(|a| a as Arc<dyn Model>)),
            "editor" => Ok(self.editor.clone().map(|a| a as Arc<dyn Model>)),
            _ => Err(ComposeError::undeclared(name, Self::PATH)),
        }
    }
}

pub fn post(title: &str) -> Post {
    Post {
        title: title.to_string(),
        author: None,
        editor: None,
    }
}

///
/// TraceLayer
///
/// Overrides `describe` to wrap the inner description in its own name, so
/// tests can read application order off the nesting. Everything else is
/// forwarded inward.
///

struct TraceLayer {
    name: &'static str,
}

pub fn trace_layer(name: &'static str) -> Arc<dyn Layer> {
    Arc::new(TraceLayer { name })
}

impl Layer for TraceLayer {
    fn layer_name(&self) -> &'static str {
        self.name
    }

    fn wrap(&self, inner: Box<dyn Decorated>) -> Box<dyn Decorated> {
        Box::new(TraceWrapper {
            name: self.name,
            inner,
        })
    }
}

struct TraceWrapper {
    name: &'static str,
    inner: Box<dyn Decorated>,
}

impl Decorated for TraceWrapper {
    fn method_names(&self) -> Vec<&'static str> {
        self.inner.method_names()
    }

    fn invoke(&self, method: &str) -> Result<Value, ComposeError> {
        if method == "describe" {
            let inner = self.inner.invoke("describe")?;

            Ok(Value::Text(format!("{}({inner})", self.name)))
        } else {
            self.inner.invoke(method)
        }
    }
}

///
/// FullNameLayer
///
/// Adds `full_name`, rendered from the inner object's `name` and `handle`.
///

struct FullNameLayer;

pub fn full_name_layer() -> Arc<dyn Layer> {
    Arc::new(FullNameLayer)
}

impl Layer for FullNameLayer {
    fn layer_name(&self) -> &'static str {
        "FullNameLayer"
    }

    fn wrap(&self, inner: Box<dyn Decorated>) -> Box<dyn Decorated> {
        Box::new(FullNameWrapper { inner })
    }
}

struct FullNameWrapper {
    inner: Box<dyn Decorated>,
}

impl Decorated for FullNameWrapper {
    fn method_names(&self) -> Vec<&'static str> {
        prepend_method("full_name", self.inner.as_ref())
    }

    fn invoke(&self, method: &str) -> Result<Value, ComposeError> {
        if method == "full_name" {
            let name = self.inner.invoke("name")?;
            let handle = self.inner.invoke("handle")?;

            Ok(Value::Text(format!("{name} ({handle})")))
        } else {
            self.inner.invoke(method)
        }
    }
}

/// Method-name list with `extra` first and the inner surface after it,
/// deduplicated in order.
fn prepend_method(extra: &'static str, inner: &dyn Decorated) -> Vec<&'static str> {
    let mut names = vec![extra];
    for name in inner.method_names() {
        if !names.contains(&name) {
            names.push(name);
        }
    }

    names
}
