use thiserror::Error;

/// Failures surfaced by a render pass. Nothing here is retried: the first
/// error aborts the pass and is handed back to the caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    // The reducer refused its inputs.
    #[error("reducer error: {0}")]
    Reducer(String),

    // A provider was given plain nodes where a render callback was expected.
    #[error("children of `{0}` must be a render function")]
    ChildrenNotCallable(String),

    // A render callback showed up where plain children were expected.
    #[error("`{0}` cannot render a function as children")]
    UnexpectedRenderFn(String),

    #[error("`{0}` is not a renderable component")]
    NotRenderable(String),

    #[error("props must be a JSON object, got {0}")]
    InvalidProps(String),

    // Tag or attribute name that cannot be written as markup.
    #[error("invalid markup name `{0}`")]
    InvalidName(String),

    #[error("render depth exceeded {0}")]
    DepthExceeded(usize),

    // Malformed declarative tree.
    #[error("tree spec error: {0}")]
    Spec(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
