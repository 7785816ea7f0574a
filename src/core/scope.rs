//! Ensures a rewritten file can actually call the translation function.
//!
//! Two independent, idempotent steps run on the current buffer:
//! the hook import at the top of the file, and the hook binding inside the
//! first function body. Detection is textual and tolerant of whitespace.

use anyhow::Result;
use regex::Regex;

use crate::config::Config;

/// Block-open token for `function Name(...) {`.
const FUNCTION_BLOCK_OPEN: &str = ") {";
/// Block-open token for `const Name = (...) => {`.
const ARROW_BLOCK_OPEN: &str = ") => {";

const BODY_INDENT: &str = "  ";

/// What [`ScopeAugmenter::augment`] inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Augmentation {
    pub import_added: bool,
    pub binding_added: bool,
}

#[derive(Debug)]
pub struct ScopeAugmenter {
    import_line: String,
    binding_statement: String,
    import_regex: Regex,
    binding_regex: Regex,
    directive_regex: Option<Regex>,
    function_regex: Regex,
    arrow_regex: Regex,
}

impl ScopeAugmenter {
    pub fn new(config: &Config) -> Result<Self> {
        let hook = regex::escape(&config.hook_name);
        let module = regex::escape(&config.hook_module);
        let translate_fn = regex::escape(&config.translate_fn);

        let import_regex = Regex::new(&format!(
            r#"import\s*\{{[^}}]*\b{hook}\b[^}}]*\}}\s*from\s*['"]{module}['"]"#
        ))?;
        let binding_regex = Regex::new(&format!(
            r"(?:const|let|var)\s*\{{(?:[^}}]*,)?\s*{translate_fn}\s*(?:,[^}}]*)?\}}\s*=\s*{hook}\s*\("
        ))?;

        let directive_regex = if config.directives.is_empty() {
            None
        } else {
            let alternatives = config
                .directives
                .iter()
                .map(|directive| regex::escape(directive))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(
                r#"^\s*(?:"(?:{alternatives})"|'(?:{alternatives})')\s*;?\s*$"#
            ))?)
        };

        let function_regex = Regex::new(
            r"^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*[A-Za-z_$][\w$]*\s*(?:<[^>]*>)?\s*\(",
        )?;
        let arrow_regex = Regex::new(
            r"^\s*(?:export\s+)?(?:const|let)\s+[A-Za-z_$][\w$]*\s*(?::[^=]+)?=\s*(?:async\s*)?\(",
        )?;

        Ok(Self {
            import_line: format!(
                "import {{ {} }} from \"{}\";",
                config.hook_name, config.hook_module
            ),
            binding_statement: format!(
                "const {{ {} }} = {}();",
                config.translate_fn, config.hook_name
            ),
            import_regex,
            binding_regex,
            directive_regex,
            function_regex,
            arrow_regex,
        })
    }

    /// The file imports the hook from the expected module.
    ///
    /// Imports can span several lines, so the whole buffer is matched.
    pub fn has_hook_import(&self, lines: &[String]) -> bool {
        self.import_regex.is_match(&lines.join("\n"))
    }

    /// The file binds the translation function from the hook somewhere.
    pub fn has_hook_binding(&self, lines: &[String]) -> bool {
        self.binding_regex.is_match(&lines.join("\n"))
    }

    /// Insert the hook import unless present. Returns whether a line was added.
    pub fn ensure_import(&self, lines: &mut Vec<String>) -> bool {
        if self.has_hook_import(lines) {
            return false;
        }

        let starts_with_directive = match (&self.directive_regex, lines.first()) {
            (Some(regex), Some(first)) => regex.is_match(first),
            _ => false,
        };
        let at = if starts_with_directive { 1 } else { 0 };
        lines.insert(at, self.import_line.clone());
        true
    }

    /// Insert the hook binding at the top of the first function body unless
    /// present. Returns whether lines were added.
    pub fn ensure_binding(&self, lines: &mut Vec<String>) -> bool {
        if self.has_hook_binding(lines) {
            return false;
        }

        let Some((signature, block_open)) = self.first_function_body(lines) else {
            return false;
        };

        let indent: String = lines[signature]
            .chars()
            .take_while(|c| c.is_whitespace())
            .collect();
        let statement = format!("{}{}{}", indent, BODY_INDENT, self.binding_statement);

        lines.insert(block_open + 1, statement);
        lines.insert(block_open + 2, String::new());
        true
    }

    pub fn augment(&self, lines: &mut Vec<String>) -> Augmentation {
        let import_added = self.ensure_import(lines);
        let binding_added = self.ensure_binding(lines);
        Augmentation {
            import_added,
            binding_added,
        }
    }

    /// Finds the first function signature and the line opening its body.
    ///
    /// Only the first signature is considered. If its block-open token never
    /// appears, there is no insertion point.
    fn first_function_body(&self, lines: &[String]) -> Option<(usize, usize)> {
        let (signature, token) = lines.iter().enumerate().find_map(|(index, line)| {
            if self.function_regex.is_match(line) {
                Some((index, FUNCTION_BLOCK_OPEN))
            } else if self.arrow_regex.is_match(line) {
                Some((index, ARROW_BLOCK_OPEN))
            } else {
                None
            }
        })?;

        lines[signature..]
            .iter()
            .position(|line| line.contains(token))
            .map(|offset| (signature, signature + offset))
    }
}
