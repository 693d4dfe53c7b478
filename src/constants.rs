pub mod callback {
    pub const SCHEME: &str = "bear";
    pub const HOST: &str = "x-callback-url";
    /// Characters the application's URL parser mishandles. Anything else,
    /// including `/ = ' [ ] ( ) . $ , * - ! @ + ? ~`, is sent verbatim.
    pub const ESCAPED_CHARS: &[char] = &[
        '%', ' ', '#', '"', '\n', '\t', '>', '<', '^', '&', '{', '}', '|', '\\', '`',
    ];
    pub const ERROR_MESSAGE_KEY: &str = "errorMessage";
    pub const NOTE_KEY: &str = "note";
}

pub mod env {
    pub const XCALL_PATH: &str = "BEAR_XCALL_PATH";
    pub const TOKEN_FILE: &str = "BEAR_TOKEN_FILE";
    pub const TIMEOUT_MS: &str = "BEAR_XCALL_TIMEOUT_MS";
    pub const LOG_LEVEL: &[&str] = &["BEAR_LOG_LEVEL", "LOG_LEVEL"];
}

pub mod defaults {
    pub const XCALL_PATH: &str = "~/prj/bear/lib/xcall.app/Contents/MacOS/xcall";
    pub const TOKEN_FILE: &str = "token";
}

pub mod appearance {
    pub const FONTS: &[&str] = &[
        "Avenir Next",
        "System",
        "Helvetica Neue",
        "Menlo",
        "Georgia",
        "Courier",
        "Open Dyslexic",
    ];

    pub const THEMES: &[&str] = &[
        "Red Graphite",
        "Charcoal",
        "Solarized Light",
        "Solarized Dark",
        "Panic Mode",
        "Dracula",
        "Gotham",
        "Toothpaste",
        "Cobalt",
        "Duotone Light",
        "Duotone Snow",
        "Dieci",
        "Ayu",
        "Dark Graphite",
        "Duotone Heat",
    ];

    pub const ADD_MODES: &[&str] = &["prepend", "append", "replace", "replace_all"];
}

pub mod limits {
    pub const STDERR_DETAIL_BYTES: usize = 4 * 1024;
    pub const REPLY_DETAIL_BYTES: usize = 512;
    pub const TAG_LINE_WIDTH: usize = 65;
    pub const SUGGESTION_LIMIT: usize = 3;
}
