//! Structural checks run before a signature is built.

use crate::parameter::Parameter;
use std::collections::HashSet;

/// Check the literal command words, returning the reason on failure.
pub fn check_command<S: AsRef<str>>(command: &[S]) -> Result<(), String> {
    if command.is_empty() {
        return Err("command must have at least one word".to_string());
    }
    for (idx, word) in command.iter().enumerate() {
        if word.as_ref().trim().is_empty() {
            return Err(format!("command word #{idx} is empty"));
        }
    }
    Ok(())
}

pub fn is_command_valid<S: AsRef<str>>(command: &[S]) -> bool {
    check_command(command).is_ok()
}

/// Check the parameter collection, returning the reason on failure.
///
/// Names must be non-empty, free of whitespace and unique; every parameter
/// must declare at least one type.
pub fn check_parameters(parameters: &[Parameter]) -> Result<(), String> {
    let mut seen: HashSet<&str> = HashSet::new();
    for parameter in parameters {
        let name = parameter.name();
        if name.is_empty() {
            return Err("parameter name is empty".to_string());
        }
        if name.chars().any(char::is_whitespace) {
            return Err(format!("parameter name '{name}' contains whitespace"));
        }
        if parameter.types().is_empty() {
            return Err(format!("parameter '{name}' declares no type"));
        }
        if !seen.insert(name) {
            return Err(format!("duplicate parameter name '{name}'"));
        }
    }
    Ok(())
}

pub fn is_parameters_valid(parameters: &[Parameter]) -> bool {
    check_parameters(parameters).is_ok()
}
