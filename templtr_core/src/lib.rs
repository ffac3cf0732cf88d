//! `templtr_core` is the core library for the templtr static-site renderer. It
//! merges page templates with structured data records and produces one
//! document per record.
//!
//! ## Template Syntax
//!
//! - `{key}` is replaced by the string stored under `key`.
//! - `{key.sub}` reaches into nested objects; paths can be any depth.
//! - `[ ... ]` marks a block that is repeated once per element of the array
//!   it references. Blocks nest, and the engine matches brackets by counting
//!   them.
//!
//! ```text
//! <h1>{title}</h1>
//! <ul>[<li>{tags}</li>]</ul>
//! <p>By {author.name}</p>
//! ```
//!
//! Rendered with `{"title": "Hello", "tags": ["a", "b"], "author": {"name":
//! "Ada"}}` this produces
//! `<h1>Hello</h1><ul><li>a</li><li>b</li></ul><p>By Ada</p>`.
//!
//! ## Modules
//!
//! - [`config`]: configuration loading from `templtr.toml` and record file
//!   decoding (JSON, TOML, YAML).
//! - [`project`]: page and record discovery, builds, and project
//!   initialisation.
//! - [`scanner`]: bracket matching for block regions.
//!
//! ## Quick Start
//!
//! ```rust
//! use templtr_core::Mapping;
//! use templtr_core::render_record;
//!
//! let record = Mapping::new()
//! 	.with("title", "Home")
//! 	.with("links", vec!["a", "b"]);
//! let rendered = render_record("<h1>{title}</h1>[<a>{links}</a>]", &record);
//!
//! assert_eq!(rendered, "<h1>Home</h1><a>a</a><a>b</a>");
//! ```

pub use config::TempltrConfig;
pub use engine::*;
pub use error::*;
pub use project::*;
pub use value::*;

pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
pub mod project;
pub mod scanner;
mod value;

#[cfg(test)]
mod __fixtures;
