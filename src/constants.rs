//! Common constants used throughout the eztemplate application.

/// Engine used when `--engine` is not given
pub const DEFAULT_ENGINE: &str = "string.Template";

/// Pseudo engine name that lists the registry instead of running
pub const HELP_ENGINE: &str = "help";

/// Conventional path marker for standard input and standard output
pub const STDIO_MARKER: &str = "-";

/// Token that closes the current argument group
pub const GROUP_SEPARATOR: &str = "--";

/// Substituted for unknown names in tolerant mode
pub const PLACEHOLDER: &str = "<UNDEFINED>";

/// Prefix of the output path variables exposed to content templates
pub const OUTPUT_PREFIX: &str = "ez_";
