//! Command signature matching.
//!
//! A [`Signature`] is a fixed prefix of literal command words followed by
//! positional parameters. [`match_argv`] checks a token sequence against it and
//! returns the coerced value bound to each parameter:
//!
//! ```
//! use sigmatch::{Parameter, Signature, Value};
//!
//! let signature = Signature::new(["foo", "bar"], vec![Parameter::string("baz").optional()])?;
//! assert_eq!(signature.to_string(), "foo bar [baz]");
//!
//! let bindings = signature.match_argv(&["foo", "bar", "value"]).unwrap();
//! assert_eq!(bindings["baz"], Value::String("value".to_string()));
//! assert!(signature.match_argv(&["foo", "bar", "v1", "v2"]).is_none());
//! # Ok::<(), sigmatch::SignatureError>(())
//! ```

pub mod error;
pub mod parameter;
pub mod signature;
pub mod validate;
pub mod words;

pub use error::{SignatureError, SignatureResult};
pub use parameter::{Arity, Parameter};
pub use signature::{Bindings, Signature, find_match, match_argv};
pub use words::{Value, ValueType};
