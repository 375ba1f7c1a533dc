use crate::error::{AppError, Result};
use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use log;
use std::path::Path;

/// Index of the `]` closing a class whose body starts at `start`, using the
/// `fnmatch` rule that a `]` right after `[` or `[!` is a member.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    (j < chars.len()).then_some(j)
}

fn push_class(out: &mut String, body: &[char]) {
    let (negated, members) = match body.split_first() {
        Some(('!', rest)) => (true, rest),
        _ => (false, body),
    };
    if negated || members.first() != Some(&'^') {
        out.push('[');
        if negated {
            out.push('!');
        }
        out.extend(members);
        out.push(']');
        return;
    }

    // A leading `^` is a plain member in fnmatch but negates in globset, so
    // leading `^`/`!` members become literal alternatives next to the class.
    let mut alternatives: Vec<String> = Vec::new();
    let mut tail = members;
    while let Some((&first, rest)) = tail.split_first() {
        let starts_range = rest.first() == Some(&'-') && rest.len() > 1;
        if first == '^' || (first == '!' && !starts_range) {
            alternatives.push(first.to_string());
            tail = rest;
        } else {
            break;
        }
    }
    if !tail.is_empty() {
        alternatives.push(format!("[{}]", tail.iter().collect::<String>()));
    }
    if alternatives.len() == 1 {
        out.push_str(&alternatives[0]);
    } else {
        out.push('{');
        out.push_str(&alternatives.join(","));
        out.push('}');
    }
}

/// Rewrites an `fnmatch` pattern into globset syntax. Unclosed brackets,
/// braces and stray `]` are literal text in `fnmatch`.
fn translate_fnmatch(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '*' => {
                while chars.get(i) == Some(&'*') {
                    i += 1;
                }
                out.push('*');
            }
            '?' => out.push('?'),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    push_class(&mut out, &chars[i..end]);
                    i = end + 1;
                }
                None => out.push_str("[[]"),
            },
            ']' | '{' | '}' | ',' => {
                out.push('[');
                out.push(c);
                out.push(']');
            }
            _ => out.push(c),
        }
    }
    out
}

/// Compiles a single shell-style pattern with `fnmatch` semantics: `*` is not
/// stopped by path separators and backslash is an ordinary character.
fn compile_glob(pattern: &str) -> Result<Glob> {
    let translated = translate_fnmatch(pattern);
    log::trace!("Pattern \"{}\" compiled as \"{}\"", pattern, translated);
    GlobBuilder::new(&translated)
        .literal_separator(false)
        .backslash_escape(false)
        .case_insensitive(false)
        .build()
        .map_err(|e| {
            log::error!("Invalid glob pattern \"{}\": {}", pattern, e);
            AppError::Glob(format!("Invalid glob pattern \"{}\": {}", pattern, e))
        })
}

/// Returns whether `text` matches the glob `pattern`.
pub fn matches(text: &str, pattern: &str) -> Result<bool> {
    Ok(compile_glob(pattern)?.compile_matcher().is_match(text))
}

fn build_glob_set_from_vec(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern_str in patterns {
        log::trace!("Adding exclude pattern: {}", pattern_str);
        builder.add(compile_glob(pattern_str)?);
    }
    builder.build().map_err(|e| {
        log::error!("Error building glob set: {}", e);
        AppError::Glob(e.to_string())
    })
}

/// Ordered exclude patterns; a candidate is excluded if any pattern matches.
#[derive(Debug, Clone)]
pub struct ExcludePatternSet {
    patterns: Vec<String>,
    set: GlobSet,
}

impl ExcludePatternSet {
    pub fn new(patterns: &[String]) -> Result<Self> {
        Ok(Self {
            patterns: patterns.to_vec(),
            set: build_glob_set_from_vec(patterns)?,
        })
    }

    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            set: GlobSet::empty(),
        }
    }

    pub fn is_excluded<P: AsRef<Path>>(&self, candidate: P) -> bool {
        !self.patterns.is_empty() && self.set.is_match(candidate)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Suffix whitelist; an empty set lets every file through.
#[derive(Debug, Clone, Default)]
pub struct IncludeExtensionSet {
    extensions: Vec<String>,
}

impl IncludeExtensionSet {
    pub fn new(extensions: &[String]) -> Self {
        Self {
            extensions: extensions.to_vec(),
        }
    }

    pub fn includes(&self, file_name: &str) -> bool {
        self.extensions.is_empty() || self.extensions.iter().any(|ext| file_name.ends_with(ext))
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(patterns: &[&str]) -> ExcludePatternSet {
        let owned: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        ExcludePatternSet::new(&owned).unwrap()
    }

    #[test]
    fn star_question_and_classes() {
        assert!(matches("main.js", "*.js").unwrap());
        assert!(!matches("main.ts", "*.js").unwrap());
        assert!(matches("a1.ts", "a?.ts").unwrap());
        assert!(!matches("a12.ts", "a?.ts").unwrap());
        assert!(matches("b.ts", "[abc].ts").unwrap());
        assert!(!matches("d.ts", "[abc].ts").unwrap());
        assert!(matches("d.ts", "[!abc].ts").unwrap());
        assert!(matches("", "*").unwrap());
    }

    #[test]
    fn star_crosses_separators_like_fnmatch() {
        assert!(matches("./node_modules", "*node_modules*").unwrap());
        assert!(matches("./web/.nuxt", "*.nuxt*").unwrap());
        assert!(matches("./a/b/c.json", "*.json").unwrap());
        // A bare name pattern does not match the joined directory path.
        assert!(!matches("./node_modules", "node_modules").unwrap());
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!matches("README.MD", "*.md").unwrap());
        assert!(matches("README.md", "*.md").unwrap());
    }

    #[test]
    fn unclosed_brackets_and_braces_are_literal() {
        assert!(matches("x[abc", "*[abc").unwrap());
        assert!(!matches("xa", "*[abc").unwrap());
        assert!(matches("a{b", "*{*").unwrap());
        assert!(matches("[!]", "[!]").unwrap());
        assert!(matches("a]", "a]").unwrap());
    }

    #[test]
    fn braces_are_not_alternation() {
        assert!(!matches("a", "{a,b}").unwrap());
        assert!(matches("{a,b}", "{a,b}").unwrap());
        assert!(matches("x,y.ts", "*,*").unwrap());
    }

    #[test]
    fn leading_caret_in_class_is_a_member() {
        assert!(!matches("bx", "[^a]x").unwrap());
        assert!(matches("ax", "[^a]x").unwrap());
        assert!(matches("^x", "[^a]x").unwrap());
        assert!(matches("^", "[^]").unwrap());
        assert!(matches("!", "[^!]").unwrap());
        assert!(!matches("b", "[^!]").unwrap());
        // Negation is still spelled with `!`.
        assert!(matches("bx", "[!a]x").unwrap());
        assert!(!matches("ax", "[!a]x").unwrap());
    }

    #[test]
    fn close_bracket_first_in_class_is_a_member() {
        assert!(matches("]", "[]a]").unwrap());
        assert!(matches("a", "[]a]").unwrap());
        assert!(!matches("]", "[!]a]").unwrap());
    }

    #[test]
    fn translation_keeps_plain_patterns() {
        assert_eq!(translate_fnmatch("*node_modules*"), "*node_modules*");
        assert_eq!(translate_fnmatch("a**b?"), "a*b?");
        assert_eq!(translate_fnmatch("[a-z].ts"), "[a-z].ts");
        assert_eq!(translate_fnmatch("[^a]"), "{^,[a]}");
        assert_eq!(translate_fnmatch("x[1"), "x[[]1");
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = ExcludePatternSet::new(&["[z-a]".to_string()]).unwrap_err();
        assert!(matches!(err, AppError::Glob(_)));
    }

    #[test]
    fn exclude_set_matches_any_pattern() {
        let excludes = set(&["*.js", "*.md"]);
        assert!(excludes.is_excluded("app.js"));
        assert!(excludes.is_excluded("README.md"));
        assert!(!excludes.is_excluded("app.ts"));
        assert_eq!(excludes.patterns().len(), 2);
    }

    #[test]
    fn empty_exclude_set_excludes_nothing() {
        assert!(!ExcludePatternSet::empty().is_excluded("anything.js"));
        assert!(!set(&[]).is_excluded("anything.js"));
        assert!(set(&[]).is_empty());
    }

    #[test]
    fn include_set_uses_plain_suffixes() {
        let includes = IncludeExtensionSet::new(&[".ts".to_string(), ".vue".to_string()]);
        assert!(includes.includes("index.ts"));
        assert!(includes.includes("App.vue"));
        assert!(includes.includes("types.d.ts"));
        assert!(!includes.includes("index.tsx"));
        assert!(!includes.includes("Makefile"));
    }

    #[test]
    fn empty_include_set_includes_files_without_extension() {
        let includes = IncludeExtensionSet::default();
        assert!(includes.includes("Makefile"));
        assert!(includes.includes("lib.rs"));
        assert!(includes.extensions().is_empty());
    }
}
