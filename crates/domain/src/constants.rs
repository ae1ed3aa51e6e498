//! Wire-level constants
//!
//! Header names and resource paths that the Nfield server contract fixes.

// Authentication
pub const AUTHENTICATION_TOKEN_HEADER: &str = "X-AuthenticationToken";
pub const AUTHORIZATION_SCHEME: &str = "Basic";

// Resource paths, relative to the server address
pub const SIGN_IN_PATH: &str = "SignIn";
pub const INTERVIEWERS_PATH: &str = "api/interviewers";

// Sign-in form fields
pub const SIGN_IN_DOMAIN_FIELD: &str = "Domain";
pub const SIGN_IN_USERNAME_FIELD: &str = "Username";
pub const SIGN_IN_PASSWORD_FIELD: &str = "Password";

// Client defaults
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
