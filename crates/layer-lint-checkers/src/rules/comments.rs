//! Comment and docstring discipline.
//!
//! Docstrings are one short sentence. Comments earn their keep: banners
//! and restatements of the code on the same line are noise.

use std::collections::HashSet;
use std::sync::LazyLock;

use layer_lint_core::{registry, CheckContext, FileRule, Violation};
use layer_lint_py::{Docstring, PyModule};
use regex::Regex;

use super::violation;

fn sentence_count(text: &str) -> usize {
    text.chars().filter(|c| matches!(c, '.' | '!' | '?')).count()
}

fn tokens(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| t.len() > 2)
        .map(str::to_lowercase)
        .collect()
}

/// Docstrings must be a single sentence within the length limit. Both
/// failures are reported independently, on the owner's definition line
/// (line 1 for the module docstring).
pub struct DocstringDiscipline {
    /// Maximum docstring length in characters.
    pub max_chars: usize,
}

impl Default for DocstringDiscipline {
    fn default() -> Self {
        Self {
            max_chars: registry::MAX_DOCSTRING_CHARS,
        }
    }
}

impl DocstringDiscipline {
    fn check_one(
        &self,
        ctx: &CheckContext<'_>,
        owner: &str,
        line: usize,
        doc: &Docstring,
        out: &mut Vec<Violation>,
    ) {
        if doc.text.chars().count() > self.max_chars {
            out.push(violation(
                ctx,
                "LLG01",
                "comments",
                line,
                format!(
                    "docstring of {owner} is {} characters; keep it under {}",
                    doc.text.chars().count(),
                    self.max_chars
                ),
            ));
        }
        let sentences = sentence_count(&doc.text);
        if sentences > 1 {
            out.push(violation(
                ctx,
                "LLG02",
                "comments",
                line,
                format!("docstring of {owner} has {sentences} sentences; say it in one"),
            ));
        }
    }
}

impl FileRule for DocstringDiscipline {
    fn name(&self) -> &'static str {
        "comments"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        if let Some(doc) = &module.docstring {
            self.check_one(ctx, "the module", 1, doc, &mut out);
        }
        for class in &module.classes {
            if let Some(doc) = &class.docstring {
                self.check_one(ctx, &format!("`{}`", class.name), class.line, doc, &mut out);
            }
            for method in &class.methods {
                if let Some(doc) = &method.docstring {
                    self.check_one(
                        ctx,
                        &format!("`{}.{}`", class.name, method.name),
                        method.line,
                        doc,
                        &mut out,
                    );
                }
            }
        }
        for function in &module.functions {
            if let Some(doc) = &function.docstring {
                self.check_one(ctx, &format!("`{}`", function.name), function.line, doc, &mut out);
            }
        }
        out
    }
}

/// A docstring that only repeats the signature's names and types says
/// nothing; measured by token overlap against the signature.
pub struct DocstringRestatesSignature {
    /// Overlap ratio above which the docstring is a restatement.
    pub threshold: f64,
}

impl Default for DocstringRestatesSignature {
    fn default() -> Self {
        Self {
            threshold: registry::COMMENT_OVERLAP_THRESHOLD,
        }
    }
}

impl FileRule for DocstringRestatesSignature {
    fn name(&self) -> &'static str {
        "comments"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for function in super::all_functions(module) {
            let Some(doc) = &function.docstring else {
                continue;
            };
            let mut signature = String::new();
            signature.push_str(&function.name);
            for param in &function.params {
                signature.push(' ');
                signature.push_str(&param.name);
                if let Some(ann) = &param.annotation {
                    signature.push(' ');
                    signature.push_str(ann);
                }
            }
            if let Some(ret) = &function.returns {
                signature.push(' ');
                signature.push_str(ret);
            }
            let signature_tokens = tokens(&signature);
            let doc_tokens = tokens(&doc.text);
            if doc_tokens.is_empty() {
                continue;
            }
            let shared = doc_tokens
                .iter()
                .filter(|t| signature_tokens.contains(*t) || ["returns", "return", "the"].contains(&t.as_str()))
                .count();
            #[allow(clippy::cast_precision_loss)]
            let overlap = shared as f64 / doc_tokens.len() as f64;
            if overlap > self.threshold {
                out.push(violation(
                    ctx,
                    "LLG03",
                    self.name(),
                    doc.line,
                    format!(
                        "docstring of `{}` restates the signature; document intent or delete it",
                        function.name
                    ),
                ));
            }
        }
        out
    }
}

static BANNER: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[=\-\*#_~\s]{4,}$").unwrap()
});

/// Bans banner comments (`# =====`, `# ----- section -----`).
pub struct NoBannerComments;

impl FileRule for NoBannerComments {
    fn name(&self) -> &'static str {
        "comments"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let mut out = Vec::new();
        for comment in &module.comments {
            let framed = comment.text.len() >= 6
                && comment.text.starts_with("===")
                && comment.text.ends_with("===");
            if BANNER.is_match(&comment.text) || framed {
                out.push(violation(
                    ctx,
                    "LLG04",
                    self.name(),
                    comment.line,
                    "banner comment; delete it and let the structure speak",
                ));
            }
        }
        out
    }
}

/// Inline comments that restate the code on their own line, measured by
/// token overlap plus a list of stock phrases.
pub struct NoTrivialInlineComments {
    /// Overlap ratio above which a comment restates its line.
    pub threshold: f64,
}

impl Default for NoTrivialInlineComments {
    fn default() -> Self {
        Self {
            threshold: registry::COMMENT_OVERLAP_THRESHOLD,
        }
    }
}

impl FileRule for NoTrivialInlineComments {
    fn name(&self) -> &'static str {
        "comments"
    }

    fn check(&self, ctx: &CheckContext<'_>, module: &PyModule) -> Vec<Violation> {
        let lines: Vec<&str> = ctx.file.source.lines().collect();
        let mut out = Vec::new();
        for comment in &module.comments {
            let lowered = comment.text.to_lowercase();
            if registry::OBVIOUS_COMMENT_PATTERNS
                .iter()
                .any(|p| lowered.starts_with(p))
            {
                out.push(violation(
                    ctx,
                    "LLG05",
                    self.name(),
                    comment.line,
                    format!("comment `{}` restates the code; delete it", comment.text),
                ));
                continue;
            }

            let Some(line) = lines.get(comment.line.saturating_sub(1)) else {
                continue;
            };
            let Some(code) = line.split('#').next() else {
                continue;
            };
            if code.trim().is_empty() {
                continue;
            }
            let code_tokens = tokens(code);
            let comment_tokens = tokens(&comment.text);
            if comment_tokens.is_empty() {
                continue;
            }
            let shared = comment_tokens
                .iter()
                .filter(|t| code_tokens.contains(*t))
                .count();
            #[allow(clippy::cast_precision_loss)]
            let overlap = shared as f64 / comment_tokens.len() as f64;
            if overlap > self.threshold {
                out.push(violation(
                    ctx,
                    "LLG06",
                    self.name(),
                    comment.line,
                    format!("comment `{}` restates the code; delete it", comment.text),
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::check_file_at;
    use super::*;

    const IMPLS: &str = "src/modules/m/_05_impls/impl_log.py";

    #[test]
    fn long_multi_sentence_docstring_yields_two_violations() {
        let doc = "This method writes a line to the log. It also flushes the buffer when full. Finally it updates the last-write timestamp for the monitoring hook.";
        assert!(doc.len() > 100);
        let src = format!(
            "class ImplLog:\n    def write(self, line: str) -> None:\n        \"\"\"{doc}\"\"\"\n        pass\n"
        );
        let out = check_file_at(&DocstringDiscipline::default(), IMPLS, &src);
        assert_eq!(out.len(), 2);
        // Both findings sit on the `def` line, not on the docstring itself.
        assert_eq!(out[0].location.line, 2);
        assert_eq!(out[1].location.line, 2);
    }

    #[test]
    fn module_docstring_violations_sit_on_line_one() {
        let doc = "One sentence. Two sentences.";
        let src = format!("\"\"\"{doc}\"\"\"\nclass ImplLog:\n    pass\n");
        let out = check_file_at(&DocstringDiscipline::default(), IMPLS, &src);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].location.line, 1);
    }

    #[test]
    fn short_single_sentence_docstring_passes() {
        let src = "class ImplLog:\n    def write(self, line: str) -> None:\n        \"\"\"Appends one line to the active log segment.\"\"\"\n        pass\n";
        let out = check_file_at(&DocstringDiscipline::default(), IMPLS, src);
        assert!(out.is_empty());
    }

    #[test]
    fn signature_restating_docstring_is_reported() {
        let src = "class ImplLog:\n    def write(self, line: str) -> None:\n        \"\"\"Write the line.\"\"\"\n        pass\n";
        let out = check_file_at(&DocstringRestatesSignature::default(), IMPLS, src);
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("restates the signature"));
    }

    #[test]
    fn banner_comments_are_reported() {
        let src = "# ==========================\n# === helpers section ===\nx = 1\n";
        let out = check_file_at(&NoBannerComments, IMPLS, src);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn restating_inline_comment_is_reported() {
        let src = "class ImplLog:\n    def bump(self, counter: int) -> int:\n        counter += 1  # increment counter\n        return counter\n";
        let out = check_file_at(&NoTrivialInlineComments::default(), IMPLS, src);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn explanatory_comment_passes() {
        let src = "class ImplLog:\n    def wait(self, seconds: int) -> None:\n        limit = seconds * 3  # upstream gateway times out after 3x the configured wait\n        self.clock.sleep(limit)\n";
        let out = check_file_at(&NoTrivialInlineComments::default(), IMPLS, src);
        assert!(out.is_empty());
    }
}
