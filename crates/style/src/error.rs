use quire_types::StyleName;
use thiserror::Error;

/// Failures raised while declaring or resolving named styles.
///
/// All of them are fatal and are reported before any layout pass starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("Style '{0}' is already defined.")]
    DuplicateStyle(StyleName),

    #[error("Style '{style}' names an undeclared parent '{parent}'.")]
    UnknownParent { style: StyleName, parent: StyleName },

    #[error("Style '{0}' was never declared.")]
    UnknownStyle(StyleName),

    #[error("Cannot define style '{0}': the style registry is frozen.")]
    RegistryFrozen(StyleName),

    #[error("Style '{style}' would close a parent cycle: {}", .chain.join(" -> "))]
    CyclicParent { style: StyleName, chain: Vec<String> },
}
