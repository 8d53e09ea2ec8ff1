//! Entity id globbing (`*` any run, `?` one char).

use hassprom_core::error::{HasspromError, Result};

#[derive(Debug, Clone)]
pub struct Glob {
    raw: String,
    pattern: Vec<char>,
}

impl Glob {
    pub fn compile(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(HasspromError::BadRequest("empty entity glob".into()));
        }
        Ok(Self {
            raw: raw.to_string(),
            pattern: raw.chars().collect(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Iterative wildcard match; backtracks to the last `*` only.
    pub fn matches(&self, text: &str) -> bool {
        let text: Vec<char> = text.chars().collect();
        let p = &self.pattern;
        let (mut pi, mut ti) = (0usize, 0usize);
        let mut star: Option<(usize, usize)> = None;

        while ti < text.len() {
            match p.get(pi) {
                Some('*') => {
                    star = Some((pi, ti));
                    pi += 1;
                }
                Some(&c) if c == '?' || c == text[ti] => {
                    pi += 1;
                    ti += 1;
                }
                _ => match star {
                    Some((sp, st)) => {
                        pi = sp + 1;
                        ti = st + 1;
                        star = Some((sp, st + 1));
                    }
                    None => return false,
                },
            }
        }
        p[pi..].iter().all(|c| *c == '*')
    }
}

pub fn compile_globs(raw: &[String]) -> Result<Vec<Glob>> {
    raw.iter().map(|s| Glob::compile(s)).collect()
}
