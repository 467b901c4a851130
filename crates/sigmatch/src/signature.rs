use crate::error::{SignatureError, SignatureResult};
use crate::parameter::Parameter;
use crate::validate;
use crate::words;
use crate::Value;
use indexmap::IndexMap;
use std::fmt;

/// Matched parameter values keyed by parameter name, in parameter order.
pub type Bindings = IndexMap<String, Value>;

/// A command pattern: literal words followed by positional parameters.
///
/// A `Signature` can only be obtained through [`Signature::new`], so every
/// instance satisfies the ordering rules for optional and variadic parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    command: Vec<String>,
    parameters: Vec<Parameter>,
}

impl Signature {
    /// Build a signature, validating the command words and parameter layout.
    ///
    /// Command words are stored trimmed.
    pub fn new<I, S>(command: I, parameters: Vec<Parameter>) -> SignatureResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let command: Vec<S> = command.into_iter().collect();

        validate::check_command(&command).map_err(SignatureError::InvalidCommand)?;
        validate::check_parameters(&parameters).map_err(SignatureError::InvalidParameters)?;

        if let Some(first_optional) = parameters.iter().position(Parameter::is_optional) {
            let required_after = parameters[first_optional..]
                .iter()
                .position(Parameter::is_required)
                .map(|offset| first_optional + offset);
            if required_after.is_some_and(|idx| idx > first_optional) {
                return Err(SignatureError::RequiredAfterOptional);
            }
        }

        if let Some(first_variadic) = parameters.iter().position(Parameter::is_variadic) {
            if first_variadic != parameters.len() - 1 {
                return Err(SignatureError::ParameterAfterVariadic);
            }
        }

        Ok(Self {
            command: command
                .iter()
                .map(|word| word.as_ref().trim().to_string())
                .collect(),
            parameters,
        })
    }

    /// Build a signature without parameters.
    pub fn command_only<I, S>(command: I) -> SignatureResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(command, Vec::new())
    }

    pub fn command(&self) -> &[String] {
        &self.command
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Match `argv` against this signature. See [`match_argv`].
    pub fn match_argv<S: AsRef<str>>(&self, argv: &[S]) -> Option<Bindings> {
        match_argv(self, argv)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.command.clone();
        parts.extend(self.parameters.iter().map(|p| p.to_string()));
        f.write_str(&parts.join(" "))
    }
}

#[derive(Debug, Default)]
struct Walk {
    bindings: Bindings,
    consumed: usize,
    accepted: usize,
    mismatch: bool,
}

/// Match a token sequence against `signature`.
///
/// The leading tokens must equal the command words exactly. The rest are bound
/// to parameters by position, with a trailing variadic parameter taking every
/// remaining token. Returns `None` when the tokens don't fit the signature.
pub fn match_argv<S: AsRef<str>>(signature: &Signature, argv: &[S]) -> Option<Bindings> {
    let prefix_len = signature.command.len();
    if argv.len() < prefix_len
        || !argv[..prefix_len]
            .iter()
            .zip(&signature.command)
            .all(|(token, word)| token.as_ref() == word)
    {
        tracing::trace!(signature = %signature, "command prefix mismatch");
        return None;
    }

    let args: Vec<&str> = argv[prefix_len..].iter().map(|s| s.as_ref()).collect();

    // Every parameter contributes to `consumed`, even after a mismatch.
    let mut walk = Walk::default();
    for (index, parameter) in signature.parameters.iter().enumerate() {
        let candidates: Vec<&str> = if parameter.is_variadic() {
            args.get(index..).map(|rest| rest.to_vec()).unwrap_or_default()
        } else {
            args.get(index)
                .copied()
                .filter(|token| !token.is_empty())
                .into_iter()
                .collect()
        };
        walk.consumed += candidates.len();

        if !parameter.matches(&candidates) {
            tracing::trace!(parameter = parameter.name(), ?candidates, "parameter rejected tokens");
            walk.mismatch = true;
            continue;
        }
        // An absent optional counts as accepted but adds no binding.
        walk.accepted += 1;
        if candidates.is_empty() {
            continue;
        }

        let value = if parameter.is_variadic() {
            Value::List(
                candidates
                    .iter()
                    .map(|token| words::evaluate(parameter.types(), token))
                    .collect(),
            )
        } else {
            words::evaluate(parameter.types(), candidates[0])
        };
        walk.bindings.insert(parameter.name().to_string(), value);
    }

    let partial = !walk.bindings.is_empty() && walk.accepted < signature.parameters.len();
    let trailing = walk.consumed < args.len();
    if partial || trailing || walk.mismatch {
        tracing::debug!(
            signature = %signature,
            partial,
            trailing,
            mismatch = walk.mismatch,
            "arguments do not fit signature"
        );
        return None;
    }

    Some(walk.bindings)
}

/// Return the first signature that matches `argv`, along with its bindings.
pub fn find_match<'s, S: AsRef<str>>(
    signatures: &'s [Signature],
    argv: &[S],
) -> Option<(&'s Signature, Bindings)> {
    signatures
        .iter()
        .find_map(|signature| match_argv(signature, argv).map(|b| (signature, b)))
}
