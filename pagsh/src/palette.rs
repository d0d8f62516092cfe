//! ASCII colours for catppuccin theme.

pub const MAUVE: &str = "\x1b[38;2;203;166;247m"; // #CBA6F7
pub const RED: &str = "\x1b[38;2;243;139;168m"; // #F38BA8
pub const YELLOW: &str = "\x1b[38;2;249;226;175m"; // #F9E2AF
pub const GREEN: &str = "\x1b[38;2;166;227;161m"; // #A6E3A1
pub const OVERLAY: &str = "\x1b[38;2;108;112;134m"; // #6C7086

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
