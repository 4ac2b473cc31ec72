//! Internationalization (i18n) module.
//!
//! Provides localized strings for the resolver's user-facing labels and the
//! CLI output. Portuguese is the default language (the product ships to a
//! Brazilian user base); English is available as an alternative. The
//! architecture supports adding more languages in the future.
//!
//! The language is set at most once per process, before any resolution, so
//! render plans stay deterministic for the lifetime of the process.

use std::sync::OnceLock;

static CURRENT_LANG: OnceLock<Lang> = OnceLock::new();

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    /// Portuguese (default)
    Pt,
    /// English
    En,
}

impl Lang {
    /// Parse a language code string (e.g. "pt", "en", "pt_BR", "en-US").
    /// Returns `None` for unrecognized codes.
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.to_lowercase();
        let prefix = normalized.split(['_', '-']).next().unwrap_or("");
        match prefix {
            "pt" => Some(Self::Pt),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    /// Return the ISO 639-1 code for this language.
    pub fn code(self) -> &'static str {
        match self {
            Self::Pt => "pt",
            Self::En => "en",
        }
    }
}

/// Initialize the global language. Call once at startup.
/// If already initialized, this is a no-op.
pub fn set_lang(lang: Lang) {
    let _ = CURRENT_LANG.set(lang);
}

/// Get the currently configured language (defaults to Portuguese).
pub fn lang() -> Lang {
    CURRENT_LANG.get().copied().unwrap_or(Lang::Pt)
}

/// Detect language from the `LANG` / `LC_MESSAGES` environment variables.
pub fn detect_system_lang() -> Lang {
    std::env::var("MEDIAPLAN_LANG")
        .ok()
        .and_then(|v| Lang::from_code(&v))
        .or_else(|| {
            std::env::var("LC_MESSAGES")
                .ok()
                .and_then(|v| Lang::from_code(&v))
        })
        .or_else(|| std::env::var("LANG").ok().and_then(|v| Lang::from_code(&v)))
        .unwrap_or(Lang::Pt)
}

/// Macro for defining translatable message functions.
/// Each function returns a `&'static str` based on the current language.
macro_rules! msg {
    ($name:ident, $pt:expr, $en:expr) => {
        /// Returns a localized string for the current language.
        pub fn $name() -> &'static str {
            match lang() {
                Lang::Pt => $pt,
                Lang::En => $en,
            }
        }
    };
}

// ── General ──────────────────────────────────────────────────────

msg!(app_name, "mediaplan", "mediaplan");
msg!(
    app_about,
    "mediaplan \u{2014} Resolve anexos de mensagens em planos de apresenta\u{e7}\u{e3}o. L\u{ea} descritores JSON do backend e decide como cada m\u{ed}dia deve ser exibida (imagem, \u{e1}udio, v\u{ed}deo, documento).",
    "mediaplan \u{2014} Resolve message attachments into presentation plans. Reads backend JSON descriptors and decides how each media item should be displayed (image, audio, video, document)."
);
msg!(
    app_long_about,
    "mediaplan \u{2014} Resolve anexos de mensagens em planos de apresenta\u{e7}\u{e3}o.\nL\u{ea} descritores de anexo (um JSON por linha) exportados do backend de\nmensageria e produz planos de renderiza\u{e7}\u{e3}o independentes de interface.\nEscrito em Rust.",
    "mediaplan \u{2014} Resolve message attachments into presentation plans.\nReads attachment descriptors (one JSON per line) exported from the\nmessaging backend and produces UI-independent render plans.\nBuilt in Rust."
);

// ── Resolver labels ──────────────────────────────────────────────
// Fixed user-facing strings emitted inside render plans.

msg!(
    media_unavailable,
    "M\u{ed}dia n\u{e3}o dispon\u{ed}vel",
    "Media not available"
);
msg!(image_generic_alt, "Imagem", "Image");
msg!(document_default_name, "Documento", "Document");
msg!(fallback_download_label, "Baixar arquivo", "Download file");

// ── CLI help strings ─────────────────────────────────────────────

msg!(
    help_file_arg,
    "Arquivo de descritores (um JSON por linha). Use '-' ou omita para ler da entrada padr\u{e3}o",
    "Descriptor file (one JSON per line). Use '-' or omit to read from standard input"
);
msg!(
    help_verbose,
    "Registro detalhado (-v info, -vv debug, -vvv trace)",
    "Verbose logging (-v info, -vv debug, -vvv trace)"
);
msg!(
    help_lang,
    "Idioma (pt, en). Por padr\u{e3}o usa o idioma do sistema",
    "Language (pt, en). Defaults to system locale"
);
msg!(
    help_format,
    "Formato de sa\u{ed}da: json ou table",
    "Output format: json or table"
);
msg!(
    help_output,
    "Arquivo de sa\u{ed}da (padr\u{e3}o: sa\u{ed}da padr\u{e3}o)",
    "Output file (default: standard output)"
);
msg!(
    help_pretty,
    "JSON indentado em vez de uma linha por plano",
    "Indented JSON instead of one line per plan"
);
msg!(
    help_cmd_resolve,
    "Resolver descritores de anexo em planos de renderiza\u{e7}\u{e3}o",
    "Resolve attachment descriptors into render plans"
);
msg!(
    help_cmd_completions,
    "Gerar autocompletar para o shell",
    "Generate shell completions"
);
msg!(
    help_cmd_manpage,
    "Gerar uma p\u{e1}gina de manual",
    "Generate a man page"
);

// ── CLI messages ─────────────────────────────────────────────────

msg!(msg_resolving, "Resolvendo", "Resolving");
msg!(msg_input, "Entrada", "Input");
msg!(msg_input_size, "Tamanho da entrada", "Input size");
msg!(msg_resolved, "Planos resolvidos", "Plans resolved");
msg!(msg_skipped, "Linhas ignoradas", "Lines skipped");
msg!(msg_elapsed, "Tempo", "Time");
msg!(
    err_file_not_found,
    "Arquivo n\u{e3}o encontrado",
    "File not found"
);

// ── Table column headers ─────────────────────────────────────────

msg!(col_variant, "Varia\u{e7}\u{e3}o", "Variant");
msg!(col_detail, "Detalhe", "Detail");
msg!(col_labels, "R\u{f3}tulos", "Labels");
