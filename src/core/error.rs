use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// User input was rejected before any workflow ran.
    InvalidInput(String),
    /// The workspace root could not be created or written.
    Initialization(String),
    /// A configuration error occurred.
    Config(String),
    /// An error occurred during file system operations.
    FileSystem(String),
    /// An error occurred in the LLM provider.
    LlmProvider { provider: String, details: String },
    /// An error occurred while rendering a template.
    TemplateRendering(String),
    /// The agent workflow ran out of steps before reaching its end node.
    RecursionLimit { limit: u32 },
    /// The model replied with something the agent could not interpret.
    AgentProtocol(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "{msg}"),
            Error::Initialization(msg) => write!(f, "Initialization error: {msg}"),
            Error::Config(msg) => write!(f, "Configuration error: {msg}"),
            Error::FileSystem(msg) => write!(f, "File system error: {msg}"),
            Error::LlmProvider { provider, details } => {
                write!(f, "LLM error ({provider}): {details}")
            }
            Error::TemplateRendering(msg) => write!(f, "Template error: {msg}"),
            Error::RecursionLimit { limit } => write!(
                f,
                "Recursion limit of {limit} reached without hitting a stop condition."
            ),
            Error::AgentProtocol(msg) => write!(f, "Agent protocol error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
