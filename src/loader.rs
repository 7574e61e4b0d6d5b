//! Loader selection by file extension (spec.md §4.5 step 2).
//!
//! Each loader turns raw bytes into text the lowering pass can parse as
//! JS/TS/JSX. `TEXT`/`BASE64`/`JSON` synthesize a `module.exports = ...`
//! wrapper so the rest of the pipeline (Classifier, Binder, Printer) never
//! needs to special-case non-code assets — they just see a CommonJS module
//! whose one statement assigns the decoded payload.

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loader {
    Js,
    Jsx,
    Ts,
    Tsx,
    Json,
    Text,
    Base64,
    File,
    DataUrl,
}

impl Loader {
    pub fn for_path(path: &Path) -> Option<Loader> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Some(match ext {
            "js" | "mjs" | "cjs" => Loader::Js,
            "jsx" => Loader::Jsx,
            "ts" | "mts" | "cts" => Loader::Ts,
            "tsx" => Loader::Tsx,
            "json" => Loader::Json,
            "txt" => Loader::Text,
            "b64" | "base64" => Loader::Base64,
            "bin" => Loader::File,
            "dataurl" => Loader::DataUrl,
            _ => return None,
        })
    }

    pub fn is_typescript(self) -> bool {
        matches!(self, Loader::Ts | Loader::Tsx)
    }

    pub fn is_jsx(self) -> bool {
        matches!(self, Loader::Jsx | Loader::Tsx)
    }

    /// Transforms raw file contents into parseable JS source text
    /// (spec.md §4.5 step 2: "TEXT wraps content into `module.exports =
    /// \"...\"`, BASE64 into the base64-encoded string, JSON into
    /// `module.exports = <json>`").
    pub fn transform(self, raw: &str, pretty_path: &str) -> String {
        match self {
            Loader::Js | Loader::Jsx | Loader::Ts | Loader::Tsx => raw.to_string(),
            Loader::Json => format!("module.exports = {raw};"),
            Loader::Text => format!("module.exports = {};", quote_js_string(raw)),
            Loader::Base64 => {
                use base64_lite::encode;
                format!("module.exports = {};", quote_js_string(&encode(raw.as_bytes())))
            }
            Loader::File | Loader::DataUrl => {
                format!("module.exports = {};", quote_js_string(pretty_path))
            }
        }
    }
}

fn quote_js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Tiny self-contained base64 encoder; avoids pulling in a whole extra crate
/// for the one BASE64 loader call site.
mod base64_lite {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

    pub fn encode(data: &[u8]) -> String {
        let mut out = String::with_capacity((data.len() + 2) / 3 * 4);
        for chunk in data.chunks(3) {
            let b0 = chunk[0];
            let b1 = *chunk.get(1).unwrap_or(&0);
            let b2 = *chunk.get(2).unwrap_or(&0);
            let n = ((b0 as u32) << 16) | ((b1 as u32) << 8) | (b2 as u32);
            out.push(CHARS[((n >> 18) & 0x3F) as usize] as char);
            out.push(CHARS[((n >> 12) & 0x3F) as usize] as char);
            out.push(if chunk.len() > 1 { CHARS[((n >> 6) & 0x3F) as usize] as char } else { '=' });
            out.push(if chunk.len() > 2 { CHARS[(n & 0x3F) as usize] as char } else { '=' });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_loader_by_extension() {
        assert_eq!(Loader::for_path(Path::new("a.ts")), Some(Loader::Ts));
        assert_eq!(Loader::for_path(Path::new("a.tsx")), Some(Loader::Tsx));
        assert_eq!(Loader::for_path(Path::new("a.json")), Some(Loader::Json));
        assert_eq!(Loader::for_path(Path::new("a.weird")), None);
    }

    #[test]
    fn text_loader_wraps_in_module_exports() {
        let out = Loader::Text.transform("hello\n\"world\"", "a.txt");
        assert_eq!(out, "module.exports = \"hello\\n\\\"world\\\"\";");
    }

    #[test]
    fn json_loader_passes_through_raw_json() {
        let out = Loader::Json.transform("{\"a\":1}", "a.json");
        assert_eq!(out, "module.exports = {\"a\":1};");
    }

    #[test]
    fn base64_loader_encodes_bytes() {
        let out = Loader::Base64.transform("Man", "a.b64");
        assert_eq!(out, "module.exports = \"TWFu\";");
    }
}
