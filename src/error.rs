//! Typed errors raised by the command layer before or around API calls

use thiserror::Error;

/// Input, session and local-state errors surfaced to the user
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid --application-id flag provided. The value must be an integer. Run the command with --help for more information and try again")]
    ConvertApplicationId,

    #[error("Invalid --domain-id flag provided. The value must be an integer. Run the command with --help for more information and try again")]
    ConvertDomainId,

    #[error("Invalid --function-id flag provided. The value must be an integer. Run the command with --help for more information and try again")]
    ConvertFunctionId,

    #[error("Invalid --connector-id flag provided. The value must be an integer. Run the command with --help for more information and try again")]
    ConvertConnectorId,

    #[error("Invalid --workload-id flag provided. The value must be an integer. Run the command with --help for more information and try again")]
    ConvertWorkloadId,

    #[error("Invalid --{flag} flag provided. The value must be 'true' or 'false'. Run the command with --help for more information and try again")]
    ConvertBool { flag: &'static str },

    #[error("Invalid --expiration flag provided. Use a date (YYYY-MM-DD) or a relative period such as 30d, 2w, 6m or 1y")]
    ConvertExpiration,

    #[error("Failed to unmarshal the given file. Check if the file exists and its content is valid JSON, then try again")]
    UnmarshalReader,

    #[error("A value for '{field}' is required. Provide it with the matching flag or answer the prompt")]
    MissingValue { field: &'static str },

    #[error("Token not found. Use 'azion login' or the --token flag to authenticate and try again")]
    TokenNotFound,

    #[error("You are not logged in. Use 'azion login' to authenticate and try again")]
    NotLoggedIn,

    #[error("Profile '{0}' was not found. Run 'azion profiles list' to see the available profiles")]
    ProfileNotFound(String),

    #[error("Profile name '{0}' is invalid. Use a name without path separators")]
    InvalidProfileName(String),

    #[error("Profile '{0}' already exists")]
    ProfileExists(String),

    #[error("Profile '{0}' is active and cannot be deleted. Switch to another profile first")]
    CannotDeleteActiveProfile(String),

    #[error("Failed to read the project manifest at {0}. Run 'azion link' or 'azion init' first")]
    ManifestNotFound(String),
}
